//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the web crates:
//! - Cryptographic utilities (HMAC-SHA256, base64, constant-time compare)
//! - Cookie building and parsing
//! - Environment configuration helpers

pub mod config;
pub mod cookie;
pub mod crypto;
