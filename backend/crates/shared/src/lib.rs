//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by the auth gate and the resource library:
//! - Common error types and result aliases
//! - Typed ID wrappers

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
