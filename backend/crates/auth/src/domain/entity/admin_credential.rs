//! Admin Credential Entity
//!
//! The single admin secret, supplied by the environment at startup.

use serde::Serialize;
use std::fmt;
use zeroize::Zeroizing;

use crate::domain::value_object::Role;

/// Display identity returned after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub email: String,
    pub full_name: String,
    pub role: Role,
}

/// Registration number / password pair plus the identity it unlocks.
pub struct AdminCredential {
    registration_number: String,
    password: Zeroizing<String>,
    profile: AdminProfile,
}

impl AdminCredential {
    pub fn new(
        registration_number: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            registration_number: registration_number.into().trim().to_string(),
            password: Zeroizing::new(password.into()),
            profile: AdminProfile {
                email: email.into(),
                full_name: full_name.into(),
                role: Role::Admin,
            },
        }
    }

    pub fn registration_number(&self) -> &str {
        &self.registration_number
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    pub fn profile(&self) -> &AdminProfile {
        &self.profile
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("registration_number", &self.registration_number)
            .field("password", &"<redacted>")
            .field("profile", &self.profile)
            .finish()
    }
}
