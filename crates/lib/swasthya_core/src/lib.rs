//! # swasthya_core
//!
//! Core domain logic for the Swasthya Portal.

pub mod auth;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
