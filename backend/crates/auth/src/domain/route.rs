//! Route Classification
//!
//! Partitions request paths into admin-protected, user-protected and api.
//! The three flags are independent; a path may carry more than one.

/// Path prefixes that decide how a request is gated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Every path starting with this prefix needs an admin session
    pub admin_root: String,
    /// Paths that need the user flag
    pub user_prefixes: Vec<String>,
    /// Paths that receive CORS headers
    pub api_prefix: String,
    /// Sign-in page used as redirect target
    pub auth_page: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            admin_root: "/admin".to_string(),
            user_prefixes: vec!["/dashboard".to_string(), "/profile".to_string()],
            api_prefix: "/api".to_string(),
            auth_page: "/auth".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteClassification {
    pub admin_protected: bool,
    pub user_protected: bool,
    pub api: bool,
}

/// Resolves a raw request path the way the static file service does:
/// percent-decoded, empty and `.` segments dropped, `..` applied.
///
/// Returns `None` when the decoded bytes are not UTF-8.
pub fn normalize_path(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    Some(format!("/{}", segments.join("/")))
}

impl RoutePolicy {
    /// Protection applies if either the raw path (what the router matches)
    /// or its normalized form (what the file service opens) is protected.
    /// Paths that cannot be normalized are treated as protected.
    pub fn classify(&self, path: &str) -> RouteClassification {
        let raw = self.classify_exact(path);
        match normalize_path(path) {
            Some(normalized) => {
                let resolved = self.classify_exact(&normalized);
                RouteClassification {
                    admin_protected: raw.admin_protected || resolved.admin_protected,
                    user_protected: raw.user_protected || resolved.user_protected,
                    api: raw.api || resolved.api,
                }
            }
            None => RouteClassification {
                admin_protected: true,
                user_protected: true,
                api: raw.api,
            },
        }
    }

    fn classify_exact(&self, path: &str) -> RouteClassification {
        RouteClassification {
            admin_protected: path.starts_with(&self.admin_root),
            user_protected: self
                .user_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str())),
            api: path.starts_with(&self.api_prefix),
        }
    }

    /// Sign-in URL that brings the visitor back to `path` afterwards.
    pub fn login_redirect(&self, path: &str, admin_mode: bool) -> String {
        let mut url = format!(
            "{}?callbackUrl={}",
            self.auth_page,
            urlencoding::encode(path)
        );
        if admin_mode {
            url.push_str("&mode=admin");
        }
        url
    }
}
