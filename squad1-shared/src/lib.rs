//! # Squad1 Shared Library
//!
//! Domain types and data access for the Squad1 support demo, used by the API
//! server.
//!
//! ## Module Organization
//!
//! - `models`: Users, sellers, orders, shipments and tickets
//! - `fixtures`: Demo dataset generation
//! - `database`: The dataset and its synchronous queries
//! - `store`: Repository trait with in-memory and JSON file backends
//! - `lookup`: Loose order reference resolution
//! - `accountability`: Who is responsible for a stalled order
//! - `tracker`: Tracker card summaries
//! - `assistant`: Scripted support chat

pub mod accountability;
pub mod assistant;
pub mod database;
pub mod fixtures;
pub mod lookup;
pub mod models;
pub mod store;
pub mod tracker;

/// Current version of the Squad1 shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
