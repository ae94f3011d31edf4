//! # Tatboard Shared Library
//!
//! This crate contains shared types, utilities, and business logic used by
//! the Tatboard API server.
//!
//! ## Module Organization
//!
//! - `models`: MongoDB document models and collection operations
//! - `db`: MongoDB client construction and health checks
//! - `auth`: Password hashing utilities
//! - `pagination`: Shared page/limit arithmetic for list endpoints
//! - `validation`: Input parsing helpers (ObjectIds, dates)

pub mod auth;
pub mod db;
pub mod models;
pub mod pagination;
pub mod validation;

/// Current version of the Tatboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
