//! Resource Library Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Resource entity, validation, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Access Model
//! - Listing metadata is public
//! - Downloads need any signed session
//! - Create, update and delete need the admin role, checked per handler
//!   from the signed `admin-session` payload

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ResourceConfig;
pub use domain::entity::{Resource, ResourceFile};
pub use domain::repository::ResourceRepository;
pub use error::{ResourceError, ResourceResult};
pub use infra::memory::InMemoryResourceRepository;
pub use infra::postgres::PgResourceRepository;
pub use presentation::router::{resources_router, resources_router_generic};

pub use kernel::id::ResourceId;
