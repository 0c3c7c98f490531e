//! Request Extractors
//!
//! Resolve the caller's authorization from the signed session cookie, for
//! handlers in any router whose state can produce a [`CheckSessionUseCase`].

use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::application::CheckSessionUseCase;
use crate::domain::authorization::Authorization;
use crate::domain::entity::SessionClaims;
use crate::domain::value_object::Role;
use crate::error::AuthError;

/// Caller's authorization, anonymous when no valid session is present.
pub struct CurrentAuthorization(pub Authorization);

impl<S> FromRequestParts<S> for CurrentAuthorization
where
    S: Send + Sync,
    CheckSessionUseCase: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = CheckSessionUseCase::from_ref(state);
        Ok(Self(sessions.authorize(&parts.headers)))
    }
}

/// Claims of a caller holding the admin role; 401/403 otherwise.
///
/// ```rust,ignore
/// async fn delete_resource(RequireAdmin(claims): RequireAdmin) -> impl IntoResponse {
///     format!("deleted by {}", claims.sub)
/// }
/// ```
pub struct RequireAdmin(pub SessionClaims);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    CheckSessionUseCase: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authorization = CheckSessionUseCase::from_ref(state).authorize(&parts.headers);
        let claims = authorization.require(Role::Admin)?;
        Ok(Self(claims.clone()))
    }
}
