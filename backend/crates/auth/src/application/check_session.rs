//! Check Session Use Case
//!
//! Derives the caller's [`Authorization`] from the signed `admin-session`
//! cookie. The readable flag is never consulted here.

use std::sync::Arc;

use axum::http::HeaderMap;

use crate::application::config::AuthConfig;
use crate::application::session_token::SessionTokenCodec;
use crate::domain::authorization::Authorization;

#[derive(Debug, Clone)]
pub struct CheckSessionUseCase {
    codec: SessionTokenCodec,
    config: Arc<AuthConfig>,
}

impl CheckSessionUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            codec: SessionTokenCodec::new(config.session_secret),
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Anonymous when the cookie is absent or fails verification
    pub fn authorize(&self, headers: &HeaderMap) -> Authorization {
        let Some(token) =
            platform::cookie::extract_cookie(headers, &self.config.admin_session_cookie)
        else {
            return Authorization::anonymous();
        };

        match self.codec.decode(&token) {
            Ok(claims) => Authorization::from_verified(claims),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid admin session cookie");
                Authorization::anonymous()
            }
        }
    }

    /// Readable flag value, for the fast path only
    pub fn admin_flag(&self, headers: &HeaderMap) -> Option<String> {
        platform::cookie::extract_cookie(headers, &self.config.admin_flag_cookie)
    }

    pub fn user_flag(&self, headers: &HeaderMap) -> Option<String> {
        platform::cookie::extract_cookie(headers, &self.config.user_flag_cookie)
    }
}
