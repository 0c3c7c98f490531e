//! Entities

pub mod admin_credential;
pub mod session_claims;

pub use admin_credential::{AdminCredential, AdminProfile};
pub use session_claims::SessionClaims;
