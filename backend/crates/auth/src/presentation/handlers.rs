//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::{StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AdminSignInUseCase, CheckSessionUseCase, CredentialInput, CredentialValidator, SessionIssuer,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AdminLoginRequest, AdminLoginResponse, SessionStatusResponse, SessionUser,
};
use crate::presentation::extractor::CurrentAuthorization;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState {
    pub validator: CredentialValidator,
    pub config: Arc<AuthConfig>,
}

impl FromRef<AuthAppState> for CheckSessionUseCase {
    fn from_ref(state: &AuthAppState) -> Self {
        CheckSessionUseCase::new(state.config.clone())
    }
}

// ============================================================================
// Admin Login
// ============================================================================

/// POST /api/auth/admin/login
pub async fn admin_login(
    State(state): State<AuthAppState>,
    payload: Result<Json<AdminLoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse> {
    let Json(req) = payload.map_err(|e| AuthError::MalformedBody(e.body_text()))?;

    let issuer = SessionIssuer::new(state.config.clone());
    let use_case = AdminSignInUseCase::new(&state.validator, &issuer);

    let output = use_case.execute(CredentialInput {
        registration_number: req.registration_number,
        password: req.password,
    })?;

    let [flag_cookie, session_cookie] = output.session.set_cookies();

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (header::SET_COOKIE, flag_cookie),
            (header::SET_COOKIE, session_cookie),
        ]),
        Json(AdminLoginResponse {
            message: "Login successful".to_string(),
            redirect_url: state.config.admin_home.clone(),
            user: SessionUser::from(&output.session.claims),
            profile: output.profile,
        }),
    ))
}

// ============================================================================
// Admin Logout
// ============================================================================

/// POST /api/auth/admin/logout
///
/// Always succeeds; clearing cookies needs no valid session.
pub async fn admin_logout(
    State(state): State<AuthAppState>,
    CurrentAuthorization(authorization): CurrentAuthorization,
) -> impl IntoResponse {
    let [flag_cookie, session_cookie] = SessionIssuer::new(state.config.clone()).revoke();

    if let Some(claims) = authorization.claims() {
        tracing::info!(sub = %claims.sub, "Admin signed out");
    }

    (
        StatusCode::NO_CONTENT,
        AppendHeaders([
            (header::SET_COOKIE, flag_cookie),
            (header::SET_COOKIE, session_cookie),
        ]),
    )
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/admin/session
pub async fn session_status(
    CurrentAuthorization(authorization): CurrentAuthorization,
) -> Json<SessionStatusResponse> {
    match authorization.claims().filter(|_| authorization.is_authenticated()) {
        Some(claims) => Json(SessionStatusResponse {
            authenticated: true,
            user: Some(SessionUser::from(claims)),
            expires_at_ms: claims.expires_at().map(|at| at.timestamp_millis()),
        }),
        None => Json(SessionStatusResponse {
            authenticated: false,
            user: None,
            expires_at_ms: None,
        }),
    }
}
