//! Credential Validator
//!
//! Compares a submitted registration number / password against the admin
//! credential built at startup.

use std::sync::Arc;

use platform::crypto::constant_time_eq;

use crate::domain::entity::{AdminCredential, AdminProfile};
use crate::error::{AuthError, AuthResult};

/// Submitted login fields; absent and blank are treated alike
#[derive(Debug, Clone, Default)]
pub struct CredentialInput {
    pub registration_number: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CredentialValidator {
    credential: Arc<AdminCredential>,
}

impl CredentialValidator {
    pub fn new(credential: AdminCredential) -> Self {
        Self {
            credential: Arc::new(credential),
        }
    }

    pub fn subject(&self) -> &str {
        self.credential.registration_number()
    }

    pub fn validate(&self, input: &CredentialInput) -> AuthResult<AdminProfile> {
        let registration_number = non_blank(input.registration_number.as_deref())
            .ok_or(AuthError::MissingFields)?;
        let password = input
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::MissingFields)?;

        // Both comparisons always run.
        let number_ok = constant_time_eq(
            registration_number.as_bytes(),
            self.credential.registration_number().as_bytes(),
        );
        let password_ok = constant_time_eq(password.as_bytes(), self.credential.password().as_bytes());

        if number_ok & password_ok {
            Ok(self.credential.profile().clone())
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
