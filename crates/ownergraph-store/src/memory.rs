//! In-memory graph store

use crate::StoreError;
use ownergraph_domain::{ClaimKey, GraphStore, Relationship};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Edges {
    index: HashMap<ClaimKey, usize>,
    ordered: Vec<Relationship>,
}

/// Graph store backed by a map in process memory
///
/// Edges keep the position of their first insertion; later upserts of the
/// same `(from, to, type)` replace the stored edge in place.
#[derive(Debug, Default)]
pub struct MemoryGraphStore {
    edges: Mutex<Edges>,
}

impl MemoryGraphStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored edge in insertion order
    pub fn edges(&self) -> Result<Vec<Relationship>, StoreError> {
        let edges = self.edges.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(edges.ordered.clone())
    }

    /// Number of stored edges
    pub fn len(&self) -> Result<usize, StoreError> {
        let edges = self.edges.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(edges.ordered.len())
    }

    /// Whether the store holds no edges
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl GraphStore for MemoryGraphStore {
    type Error = StoreError;

    fn upsert_edge(&self, edge: &Relationship) -> Result<(), Self::Error> {
        self.upsert_edges(std::slice::from_ref(edge))
    }

    fn upsert_edges(&self, edges: &[Relationship]) -> Result<(), Self::Error> {
        let mut guard = self.edges.lock().map_err(|_| StoreError::Poisoned)?;
        let Edges { index, ordered } = &mut *guard;

        for edge in edges {
            let next = ordered.len();
            let position = *index.entry(edge.claim_key()).or_insert(next);
            if position == next {
                ordered.push(edge.clone());
            } else {
                ordered[position] = edge.clone();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store() {
        let store = MemoryGraphStore::new();
        assert!(store.is_empty().unwrap());
        assert!(store.edges().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let store = MemoryGraphStore::new();
        store
            .upsert_edges(&[
                Relationship::owns("a", "r1", 0.5, "aws", "2024-05-01"),
                Relationship::owns("b", "r2", 0.5, "aws", "2024-05-01"),
            ])
            .unwrap();

        let mut updated = Relationship::owns("a", "r1", 0.9, "codeowners", "2024-05-02");
        updated.has_conflict = true;
        store.upsert_edge(&updated).unwrap();

        let edges = store.edges().unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], updated);
        assert_eq!(edges[1].from, "b");
    }

    #[test]
    fn test_same_batch_twice_is_idempotent() {
        let store = MemoryGraphStore::new();
        let batch = vec![
            Relationship::owns("a", "r1", 0.5, "aws", "2024-05-01"),
            Relationship::owns("a", "r2", 0.5, "aws", "2024-05-01"),
        ];
        store.upsert_edges(&batch).unwrap();
        store.upsert_edges(&batch).unwrap();
        assert_eq!(store.edges().unwrap(), batch);
    }

    #[test]
    fn test_different_type_is_a_different_edge() {
        let store = MemoryGraphStore::new();
        store
            .upsert_edges(&[
                Relationship::owns("a", "r1", 0.5, "aws", "2024-05-01"),
                Relationship::new("a", "r1", "maintains", 0.5, "aws", "2024-05-01"),
            ])
            .unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }
}
