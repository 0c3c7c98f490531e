//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::CredentialValidator;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{GateState, request_gate};

/// Admin login/logout/status routes, to be nested under `/api/auth`
pub fn auth_router(validator: CredentialValidator, config: Arc<AuthConfig>) -> Router {
    let state = AuthAppState { validator, config };

    Router::new()
        .route("/admin/login", post(handlers::admin_login))
        .route("/admin/logout", post(handlers::admin_logout))
        .route("/admin/session", get(handlers::session_status))
        .with_state(state)
}

/// Wrap a whole application router in the request gate.
pub fn with_request_gate(router: Router, state: GateState) -> Router {
    router.layer(middleware::from_fn_with_state(state, request_gate))
}
