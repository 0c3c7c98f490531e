//! Request Gate Middleware
//!
//! Applies [`RequestGate`] decisions to every request and attaches the
//! fixed CORS headers to api responses.

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, SET_COOKIE,
};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use crate::application::config::{ALLOW_METHODS, AuthConfig};
use crate::application::{CheckSessionUseCase, GateDecision, RequestGate, SessionIssuer};
use crate::error::{AuthError, AuthResult};

/// Pre-rendered CORS header values
#[derive(Clone, Debug)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(config: &AuthConfig) -> AuthResult<Self> {
        let invalid = |what: &str| AuthError::Internal(format!("Invalid CORS {what} value"));
        Ok(Self {
            allow_origin: HeaderValue::from_str(config.cors.origin())
                .map_err(|_| invalid("origin"))?,
            allow_headers: HeaderValue::from_str(&config.cors.allow_headers_value())
                .map_err(|_| invalid("allow-headers"))?,
        })
    }

    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

/// Middleware state
#[derive(Clone)]
pub struct GateState {
    pub gate: RequestGate,
    pub issuer: SessionIssuer,
    pub cors: CorsHeaders,
}

impl GateState {
    pub fn new(config: Arc<AuthConfig>) -> AuthResult<Self> {
        Ok(Self {
            cors: CorsHeaders::from_config(&config)?,
            gate: RequestGate::new(CheckSessionUseCase::new(config.clone())),
            issuer: SessionIssuer::new(config),
        })
    }
}

/// Gate every request: redirect unauthenticated visitors away from
/// protected paths and decorate api responses with CORS headers.
pub async fn request_gate(
    State(state): State<GateState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let outcome = state
        .gate
        .decide(req.method(), req.uri().path(), req.headers());

    let mut response = match outcome.decision {
        GateDecision::Redirect { location } => Redirect::temporary(&location).into_response(),
        GateDecision::Preflight => StatusCode::NO_CONTENT.into_response(),
        GateDecision::Allow { refresh_admin_flag } => {
            let mut response = next.run(req).await;
            if refresh_admin_flag {
                refresh_flag(&state, response.headers_mut());
            }
            response
        }
    };

    if outcome.classification.api {
        state.cors.apply(response.headers_mut());
    }

    response
}

/// Slide the readable flag's expiry unless the handler already wrote it.
fn refresh_flag(state: &GateState, headers: &mut HeaderMap) {
    let flag_name = &state.gate.sessions().config().admin_flag_cookie;
    let prefix = format!("{flag_name}=");

    let already_set = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&prefix));
    if already_set {
        return;
    }

    match HeaderValue::from_str(&state.issuer.refresh_flag()) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to build admin flag refresh cookie"),
    }
}
