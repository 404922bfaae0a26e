//! Integration tests for ownergraph-store
//!
//! These tests exercise both stores through the `GraphStore` trait and the
//! SQLite store against a real file.

use ownergraph_domain::{GraphStore, Relationship};
use ownergraph_store::{MemoryGraphStore, SqliteGraphStore, StoreError};
use tempfile::TempDir;

fn resolved_batch() -> Vec<Relationship> {
    let mut conflicted =
        Relationship::owns("user2", "resourceA", 0.35, "codeowners", "2024-05-01T10:00:00Z");
    conflicted.has_conflict = true;

    let mut corroborated = Relationship::owns("team-api", "deploy/api", 0.74, "aws", "2024-05-02");
    corroborated.corroborated_by = vec!["kubernetes".to_string(), "aws".to_string()];

    vec![
        conflicted,
        corroborated,
        Relationship::owns("payments", "checkout", 0.3, "datadog", "1714564800"),
    ]
}

/// Write through the trait so both stores are driven the same way
fn persist<S: GraphStore>(store: &S, edges: &[Relationship]) -> Result<(), S::Error> {
    store.upsert_edges(edges)
}

#[test]
fn test_store_initialization() {
    let store = SqliteGraphStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
    assert_eq!(store.unwrap().count().unwrap(), 0);
}

#[test]
fn test_sqlite_round_trip_preserves_every_field() {
    let store = SqliteGraphStore::new(":memory:").unwrap();
    let batch = resolved_batch();

    persist(&store, &batch).unwrap();

    assert_eq!(store.edges().unwrap(), batch);
}

#[test]
fn test_sqlite_upsert_updates_existing_edge() {
    let store = SqliteGraphStore::new(":memory:").unwrap();
    persist(&store, &resolved_batch()).unwrap();

    let mut changed = Relationship::owns("user2", "resourceA", 0.9, "kubernetes", "2024-06-01");
    changed.has_conflict = false;
    store.upsert_edge(&changed).unwrap();

    assert_eq!(store.count().unwrap(), 3);
    let edges = store.edges_for_resource("resourceA").unwrap();
    assert_eq!(edges, vec![changed]);
}

#[test]
fn test_sqlite_rerun_is_idempotent() {
    let store = SqliteGraphStore::new(":memory:").unwrap();
    let batch = resolved_batch();

    persist(&store, &batch).unwrap();
    persist(&store, &batch).unwrap();

    assert_eq!(store.count().unwrap(), batch.len());
    assert_eq!(store.edges().unwrap(), batch);
}

#[test]
fn test_edges_for_resource_filters() {
    let store = SqliteGraphStore::new(":memory:").unwrap();
    let mut batch = resolved_batch();
    batch.push(Relationship::new("sre", "checkout", "maintains", 0.4, "datadog", "2024-05-01"));
    persist(&store, &batch).unwrap();

    let checkout = store.edges_for_resource("checkout").unwrap();
    assert_eq!(checkout.len(), 2);
    assert!(checkout.iter().all(|e| e.to == "checkout"));
    assert!(store.edges_for_resource("nothing-here").unwrap().is_empty());
}

#[test]
fn test_ownership_change_keeps_previous_owner_until_pruned() {
    let store = SqliteGraphStore::new(":memory:").unwrap();
    let before = Relationship::owns("user1", "resourceA", 0.6, "codeowners", "2024-04-01");
    let after = Relationship::owns("user2", "resourceA", 0.7, "codeowners", "2024-05-01");
    let untouched = Relationship::owns("user1", "resourceB", 0.5, "aws", "2024-04-01");

    persist(&store, &[before, untouched.clone()]).unwrap();
    persist(&store, std::slice::from_ref(&after)).unwrap();
    assert_eq!(store.edges_for_resource("resourceA").unwrap().len(), 2);

    let removed = store.prune_superseded(std::slice::from_ref(&after)).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(store.edges_for_resource("resourceA").unwrap(), vec![after.clone()]);
    assert_eq!(store.edges_for_resource("resourceB").unwrap(), vec![untouched]);

    // Nothing left to prune
    assert_eq!(store.prune_superseded(&[after]).unwrap(), 0);
}

#[test]
fn test_prune_ignores_other_relationship_types() {
    let store = SqliteGraphStore::new(":memory:").unwrap();
    let owner = Relationship::owns("user2", "resourceA", 0.7, "codeowners", "2024-05-01");
    let maintainer =
        Relationship::new("sre", "resourceA", "maintains", 0.4, "datadog", "2024-05-01");

    persist(&store, &[owner.clone(), maintainer]).unwrap();
    assert_eq!(store.prune_superseded(&[owner]).unwrap(), 0);
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_sqlite_file_persists_across_opens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ownergraph.db");

    {
        let store = SqliteGraphStore::new(&path).unwrap();
        persist(&store, &resolved_batch()).unwrap();
    }

    let reopened = SqliteGraphStore::new(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 3);
    assert_eq!(reopened.edges().unwrap(), resolved_batch());
}

#[test]
fn test_sqlite_bad_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("nested").join("graph.db");

    let result = SqliteGraphStore::new(&path);
    assert!(matches!(result, Err(StoreError::Database(_))));
}

#[test]
fn test_memory_and_sqlite_agree() {
    let memory = MemoryGraphStore::new();
    let sqlite = SqliteGraphStore::new(":memory:").unwrap();
    let batch = resolved_batch();

    persist(&memory, &batch).unwrap();
    persist(&sqlite, &batch).unwrap();
    persist(&memory, &batch[..1]).unwrap();
    persist(&sqlite, &batch[..1]).unwrap();

    assert_eq!(memory.edges().unwrap(), sqlite.edges().unwrap());
}

#[test]
fn test_stores_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<MemoryGraphStore>();
    assert_send_sync::<SqliteGraphStore>();
}
