//! Ownergraph Storage Layer
//!
//! Implementations of the `GraphStore` persistence seam.
//!
//! - [`MemoryGraphStore`]: mutex-guarded in-process map, for tests and dry runs
//! - [`SqliteGraphStore`]: SQLite table keyed by `(from, to, type)`
//!
//! Both upsert, so writing the same resolution twice is a no-op.
//!
//! # Examples
//!
//! ```
//! use ownergraph_domain::{GraphStore, Relationship};
//! use ownergraph_store::SqliteGraphStore;
//!
//! let store = SqliteGraphStore::new(":memory:").unwrap();
//! let edge = Relationship::owns("team-api", "deploy/api", 0.7, "kubernetes", "2024-05-01");
//! store.upsert_edges(&[edge]).unwrap();
//! assert_eq!(store.count().unwrap(), 1);
//! ```

#![warn(missing_docs)]

mod memory;
mod sqlite;

pub use memory::MemoryGraphStore;
pub use sqlite::SqliteGraphStore;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be turned back into an edge
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A writer panicked while holding the store lock
    #[error("Store lock poisoned")]
    Poisoned,
}
