//! Auth (Admin Gate) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Claims, roles, route classification, authorization capability
//! - `application/` - Credential validation, session issuing, gate decisions
//! - `presentation/` - HTTP handlers, DTOs, extractors, router, gate middleware
//! - `client/` - Browser-side auth state hook
//!
//! ## Security Model
//! - The admin credential is injected at startup, never compiled in
//! - `admin-auth` is a readable UI hint only
//! - Every privileged decision is re-derived from the HMAC-signed,
//!   HttpOnly `admin-session` payload
//! - No server-side revocation: sessions end at expiry or logout

pub mod application;
pub mod client;
pub mod domain;
pub mod error;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{CredentialValidator, RequestGate, SessionIssuer};
pub use domain::authorization::Authorization;
pub use domain::entity::{AdminCredential, AdminProfile, SessionClaims};
pub use domain::route::{RouteClassification, RoutePolicy};
pub use domain::value_object::Role;
pub use error::{AuthError, AuthResult};
pub use presentation::router::{auth_router, with_request_gate};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

pub mod extract {
    pub use crate::presentation::extractor::*;
}

#[cfg(test)]
mod tests;
