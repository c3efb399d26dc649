/// Resource access layer
///
/// Every read and write against users, boards, and tasks goes through this
/// module. It owns the two rules the rest of the system depends on:
///
/// 1. **Ownership**: boards are checked against `board.owner_id`, tasks
///    against their board's owner via a single joined query. A resource that
///    fails the check is reported exactly like one that does not exist.
/// 2. **Cache consistency**: list reads go through the per-user cache keys in
///    [`crate::cache::keys`]; every successful write deletes the keys whose
///    cached value it may have changed, including cross-resource casualties
///    (a board delete clears the task list, an account delete clears both).
///
/// Handlers stay thin: decode the request, call in here, encode the result.
///
/// # Modules
///
/// - `users`: account listing (globally cached), create/update/delete
/// - `boards`: per-user board CRUD
/// - `tasks`: per-user task CRUD with the transitive ownership gate

pub mod boards;
pub mod error;
pub mod tasks;
pub mod users;

pub use error::ResourceError;

use serde::{Deserialize, Serialize};

/// Where a read was answered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Served from the cache tier
    Cache,

    /// Served from PostgreSQL
    Db,
}

/// A read result tagged with its source
///
/// The tag is part of the wire format (`"source": "cache" | "db"`) and what
/// the consistency tests assert against: after a mutation, the next list for
/// that principal must come back `Db`-sourced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sourced<T> {
    /// The payload
    pub data: T,

    /// Which tier answered
    pub source: DataSource,
}

impl<T> Sourced<T> {
    /// Tags a cache hit
    pub fn cached(data: T) -> Self {
        Self {
            data,
            source: DataSource::Cache,
        }
    }

    /// Tags a database read
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            source: DataSource::Db,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tags_serialize_lowercase() {
        let cached = Sourced::cached(vec![1u32]);
        let json = serde_json::to_value(&cached).unwrap();
        assert_eq!(json["source"], "cache");

        let fresh = Sourced::fresh(vec![1u32]);
        let json = serde_json::to_value(&fresh).unwrap();
        assert_eq!(json["source"], "db");
    }
}
