//! Application Configuration
//!
//! Cookie names, session lifetime, route prefixes and CORS policy for the
//! admin gate.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::domain::route::RoutePolicy;

/// Request headers allowed on cross-origin api calls
pub const DEFAULT_ALLOW_HEADERS: &[&str] = &[
    "X-CSRF-Token",
    "X-Requested-With",
    "Accept",
    "Accept-Version",
    "Content-Length",
    "Content-MD5",
    "Content-Type",
    "Date",
    "X-Api-Version",
];

pub const ALLOW_METHODS: &str = "GET,DELETE,PATCH,POST,PUT,OPTIONS";

/// CORS headers attached to every api response
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    /// `None` means `*`
    pub allow_origin: Option<String>,
    pub allow_headers: Vec<String>,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origin: None,
            allow_headers: DEFAULT_ALLOW_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl CorsPolicy {
    pub fn origin(&self) -> &str {
        self.allow_origin.as_deref().unwrap_or("*")
    }

    pub fn allow_headers_value(&self) -> String {
        self.allow_headers.join(", ")
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Readable admin flag cookie
    pub admin_flag_cookie: String,
    /// HttpOnly signed claims cookie
    pub admin_session_cookie: String,
    /// Readable user flag cookie, written outside this crate
    pub user_flag_cookie: String,
    /// HMAC key for the session payload (32 bytes)
    pub session_secret: [u8; 32],
    /// Lifetime of both admin cookies (1 week)
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    pub routes: RoutePolicy,
    /// Where a successful admin login sends the browser
    pub admin_home: String,
    pub cors: CorsPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_flag_cookie: "admin-auth".to_string(),
            admin_session_cookie: "admin-session".to_string(),
            user_flag_cookie: "user-auth".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            routes: RoutePolicy::default(),
            admin_home: "/admin".to_string(),
            cors: CorsPolicy::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.as_secs() as i64
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs())
    }

    /// Cookie attributes for the readable flag
    pub fn admin_flag_cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.admin_flag_cookie.clone(),
            secure: self.cookie_secure,
            http_only: false,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl_secs()),
        }
    }

    /// Cookie attributes for the signed payload
    pub fn admin_session_cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.admin_session_cookie.clone(),
            http_only: true,
            ..self.admin_flag_cookie_config()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.admin_flag_cookie, "admin-auth");
        assert_eq!(config.admin_session_cookie, "admin-session");
        assert_eq!(config.user_flag_cookie, "user-auth");
        assert_eq!(config.session_ttl_secs(), 604_800);
        assert_eq!(config.cors.origin(), "*");
    }

    #[test]
    fn test_cookie_configs_differ_only_in_visibility() {
        let config = AuthConfig::development();
        let flag = config.admin_flag_cookie_config();
        let session = config.admin_session_cookie_config();

        assert!(!flag.http_only);
        assert!(session.http_only);
        assert!(!session.secure);
        assert_eq!(flag.max_age_secs, session.max_age_secs);
        assert_eq!(session.name, "admin-session");
    }

    #[test]
    fn test_random_secret_is_not_zero() {
        assert_ne!(AuthConfig::with_random_secret().session_secret, [0u8; 32]);
    }
}
