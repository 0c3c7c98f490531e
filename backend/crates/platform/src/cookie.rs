//! Cookie Management Infrastructure
//!
//! `Set-Cookie` builders and `Cookie` header parsing shared by the gate,
//! the login handlers, and the resource extractors.

use axum::http::{HeaderMap, header};

/// Attributes written when a cookie is cleared.
pub const EXPIRED_MAX_AGE: i64 = -1;
const EPOCH_EXPIRES: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
///
/// `http_only = false` produces a cookie that page scripts can read.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build Set-Cookie header that removes the cookie: empty value,
    /// negative Max-Age and an epoch Expires for older agents.
    pub fn build_clear_cookie(&self) -> String {
        let cleared = Self {
            max_age_secs: Some(EXPIRED_MAX_AGE),
            ..self.clone()
        };
        format!("{}; Expires={}", cleared.build_set_cookie(""), EPOCH_EXPIRES)
    }
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is scanned; HTTP/2 clients may send several.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn readable(name: &str) -> CookieConfig {
        CookieConfig {
            name: name.to_string(),
            secure: false,
            http_only: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: Some(604_800),
        }
    }

    #[test]
    fn test_cookie_config_build() {
        let config = CookieConfig {
            name: "admin-session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            max_age_secs: Some(3600),
        };

        let cookie = config.build_set_cookie("abc.def");
        assert!(cookie.starts_with("admin-session=abc.def"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn test_readable_cookie_has_no_http_only() {
        let cookie = readable("admin-auth").build_set_cookie("true");
        assert!(cookie.starts_with("admin-auth=true"));
        assert!(!cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_cookie() {
        let cookie = readable("admin-auth").build_clear_cookie();
        assert!(cookie.starts_with("admin-auth=;"));
        assert!(cookie.contains("Max-Age=-1"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; admin-auth=true; other=xyz"),
        );

        assert_eq!(extract_cookie(&headers, "admin-auth"), Some("true".to_string()));
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::COOKIE, HeaderValue::from_static("admin-session=tok.sig"));

        assert_eq!(
            extract_cookie(&headers, "admin-session"),
            Some("tok.sig".to_string())
        );
    }
}
