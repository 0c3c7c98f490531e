//! Request Gate
//!
//! Pure per-request decision: allow, redirect to sign-in, or answer a CORS
//! preflight. The middleware applies the decision to the response.

use axum::http::{HeaderMap, Method};

use crate::application::check_session::CheckSessionUseCase;
use crate::application::issue_session::FLAG_VALUE;
use crate::domain::route::{RouteClassification, normalize_path};
use crate::domain::value_object::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Continue to the handler; `refresh_admin_flag` slides the flag TTL
    Allow { refresh_admin_flag: bool },
    /// Send the browser to the sign-in page
    Redirect { location: String },
    /// `OPTIONS` under the api prefix, answered without a handler
    Preflight,
}

#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub classification: RouteClassification,
    pub decision: GateDecision,
}

#[derive(Debug, Clone)]
pub struct RequestGate {
    sessions: CheckSessionUseCase,
}

impl RequestGate {
    pub fn new(sessions: CheckSessionUseCase) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &CheckSessionUseCase {
        &self.sessions
    }

    pub fn decide(&self, method: &Method, path: &str, headers: &HeaderMap) -> GateOutcome {
        let config = self.sessions.config();
        let classification = config.routes.classify(path);

        let decision = if classification.api && *method == Method::OPTIONS {
            GateDecision::Preflight
        } else if classification.admin_protected && !self.admin_allowed(headers) {
            tracing::info!(path = %path, "Admin route requested without a valid admin session");
            GateDecision::Redirect {
                location: config.routes.login_redirect(&callback_path(path), true),
            }
        } else if classification.user_protected
            && self.sessions.user_flag(headers).as_deref() != Some(FLAG_VALUE)
        {
            tracing::debug!(path = %path, "User route requested without user flag");
            GateDecision::Redirect {
                location: config.routes.login_redirect(&callback_path(path), false),
            }
        } else {
            GateDecision::Allow {
                refresh_admin_flag: classification.admin_protected,
            }
        };

        GateOutcome {
            classification,
            decision,
        }
    }

    /// The flag is only the fast path; the signed payload must agree.
    fn admin_allowed(&self, headers: &HeaderMap) -> bool {
        if self.sessions.admin_flag(headers).as_deref() != Some(FLAG_VALUE) {
            return false;
        }
        self.sessions.authorize(headers).has_role(Role::Admin)
    }
}

/// Callback target for the sign-in page. A raw `//host` would be
/// protocol-relative, so only the normalized form is echoed back.
fn callback_path(path: &str) -> String {
    normalize_path(path).unwrap_or_else(|| "/".to_string())
}
