//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and the request gate middleware.

pub mod dto;
pub mod extractor;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extractor::{CurrentAuthorization, RequireAdmin};
pub use handlers::AuthAppState;
pub use middleware::{CorsHeaders, GateState, request_gate};
pub use router::{auth_router, with_request_gate};
