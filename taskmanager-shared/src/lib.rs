//! # TaskManager Shared Library
//!
//! This crate contains the data layer and business logic used by the
//! TaskManager API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool, embedded migrations and per-request sessions
//! - `models`: Database models and their queries
//! - `service`: User operations (list, get, create, update, delete)
//! - `slug`: URL-safe slug derivation

pub mod db;
pub mod models;
pub mod service;
pub mod slug;

/// Current version of the TaskManager shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
