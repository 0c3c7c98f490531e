//! Session Issuer
//!
//! Mints the readable `admin-auth` flag and the signed `admin-session`
//! payload for one response. Re-issuing overwrites both.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenCodec;
use crate::domain::entity::{AdminProfile, SessionClaims};
use crate::error::AuthResult;

/// Value of the readable flag while a session is live
pub const FLAG_VALUE: &str = "true";

/// Both cookies of a fresh session, ready for `Set-Cookie`
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub claims: SessionClaims,
    pub flag_cookie: String,
    pub session_cookie: String,
}

impl IssuedSession {
    pub fn set_cookies(&self) -> [String; 2] {
        [self.flag_cookie.clone(), self.session_cookie.clone()]
    }
}

#[derive(Debug, Clone)]
pub struct SessionIssuer {
    codec: SessionTokenCodec,
    config: Arc<AuthConfig>,
}

impl SessionIssuer {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            codec: SessionTokenCodec::new(config.session_secret),
            config,
        }
    }

    pub fn issue(&self, subject: &str, profile: &AdminProfile) -> AuthResult<IssuedSession> {
        self.issue_at(subject, profile, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: &str,
        profile: &AdminProfile,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedSession> {
        let claims = SessionClaims::issue(subject, profile, now, self.config.session_ttl_chrono());
        let token = self.codec.encode(&claims)?;

        Ok(IssuedSession {
            flag_cookie: self.refresh_flag(),
            session_cookie: self.config.admin_session_cookie_config().build_set_cookie(&token),
            claims,
        })
    }

    /// Flag cookie with a full TTL; value never changes
    pub fn refresh_flag(&self) -> String {
        self.config
            .admin_flag_cookie_config()
            .build_set_cookie(FLAG_VALUE)
    }

    /// Clear both admin cookies
    pub fn revoke(&self) -> [String; 2] {
        [
            self.config.admin_flag_cookie_config().build_clear_cookie(),
            self.config.admin_session_cookie_config().build_clear_cookie(),
        ]
    }
}
