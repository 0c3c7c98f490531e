//! Session Claims Entity
//!
//! Payload of the `admin-session` cookie. Signed by the server and never
//! readable by page scripts.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::admin_credential::AdminProfile;
use crate::domain::value_object::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (admin registration number)
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Expiry, Unix seconds
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `profile` expiring `ttl` after `now`.
    pub fn issue(subject: &str, profile: &AdminProfile, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.to_string(),
            email: profile.email.clone(),
            role: profile.role,
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}
