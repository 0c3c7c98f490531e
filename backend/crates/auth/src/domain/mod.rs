//! Domain Layer
//!
//! Entities, value objects, route classification and the authorization
//! capability. No I/O.

pub mod authorization;
pub mod entity;
pub mod route;
pub mod value_object;
