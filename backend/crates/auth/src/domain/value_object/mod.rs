//! Value Objects

pub mod role;

pub use role::Role;
