//! Trait definitions for external interactions
//!
//! These traits define the boundaries between fusion logic and
//! infrastructure. Implementations live in other crates.

use crate::Relationship;

/// Trait for persisting resolved ownership edges
///
/// Implemented by the infrastructure layer (ownergraph-store). Upserts are
/// keyed by `(from, to, type)`, so writing the same resolution twice leaves
/// the store unchanged and a failed run can simply be retried.
///
/// Methods take `&self`; implementations that need mutation guard their own
/// state. The orchestrator moves the store onto a blocking worker and holds
/// no lock of its own while it runs.
pub trait GraphStore {
    /// Error type for store operations
    type Error;

    /// Insert or update a single edge
    fn upsert_edge(&self, edge: &Relationship) -> Result<(), Self::Error>;

    /// Insert or update a batch of edges
    ///
    /// The default calls [`GraphStore::upsert_edge`] once per edge and stops
    /// at the first failure. Stores that can write atomically should
    /// override it.
    fn upsert_edges(&self, edges: &[Relationship]) -> Result<(), Self::Error> {
        for edge in edges {
            self.upsert_edge(edge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct CountingStore {
        writes: RefCell<usize>,
        fail_at: Option<usize>,
    }

    impl GraphStore for CountingStore {
        type Error = String;

        fn upsert_edge(&self, _edge: &Relationship) -> Result<(), Self::Error> {
            let mut writes = self.writes.borrow_mut();
            if Some(*writes) == self.fail_at {
                return Err("store unavailable".to_string());
            }
            *writes += 1;
            Ok(())
        }
    }

    fn edges(n: usize) -> Vec<Relationship> {
        (0..n)
            .map(|i| Relationship::owns(format!("user{}", i), "res", 0.5, "aws", "2024-01-01"))
            .collect()
    }

    #[test]
    fn test_default_batch_writes_each_edge() {
        let store = CountingStore {
            writes: RefCell::new(0),
            fail_at: None,
        };
        store.upsert_edges(&edges(3)).unwrap();
        assert_eq!(*store.writes.borrow(), 3);
    }

    #[test]
    fn test_default_batch_stops_at_first_failure() {
        let store = CountingStore {
            writes: RefCell::new(0),
            fail_at: Some(1),
        };
        let result = store.upsert_edges(&edges(3));
        assert!(result.is_err());
        assert_eq!(*store.writes.borrow(), 1);
    }
}
