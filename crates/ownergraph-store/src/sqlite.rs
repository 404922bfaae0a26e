//! SQLite graph store

use crate::StoreError;
use ownergraph_domain::{GraphStore, Relationship, Timestamp};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const UPSERT_EDGE: &str = "
    INSERT INTO ownership_edges
        (from_owner, to_resource, relationship_type, confidence, has_conflict,
         source, observed_at, corroborated_by)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(from_owner, to_resource, relationship_type) DO UPDATE SET
        confidence = excluded.confidence,
        has_conflict = excluded.has_conflict,
        source = excluded.source,
        observed_at = excluded.observed_at,
        corroborated_by = excluded.corroborated_by";

const SELECT_EDGES: &str = "
    SELECT from_owner, to_resource, relationship_type, confidence, has_conflict,
           source, observed_at, corroborated_by
    FROM ownership_edges";

const PRUNE_SUPERSEDED: &str = "DELETE FROM ownership_edges
    WHERE to_resource = ?1 AND relationship_type = ?2 AND from_owner <> ?3";

/// SQLite-based implementation of GraphStore
///
/// The connection sits behind a mutex so the store can be shared with the
/// blocking worker that persists a run. A batch upsert is one transaction:
/// either the whole resolved set lands or none of it does.
///
/// Rows are keyed by `(from, to, type)`. When a later run hands a resource
/// to a new owner, the previous owner's row is kept until
/// [`SqliteGraphStore::prune_superseded`] removes it.
pub struct SqliteGraphStore {
    conn: Mutex<Connection>,
}

impl SqliteGraphStore {
    /// Open (or create) a store at `path`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ownergraph_store::SqliteGraphStore;
    ///
    /// let store = SqliteGraphStore::new("ownergraph.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch(include_str!("schema.sql"))?;
        debug!("Opened graph store at {}", path.as_ref().display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Every stored edge in first-insertion order
    pub fn edges(&self) -> Result<Vec<Relationship>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY rowid", SELECT_EDGES))?;
        let edges = stmt
            .query_map([], row_to_edge)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    /// Edges pointing at one resource, any owner or type
    ///
    /// May include owners superseded by a later run unless they were pruned.
    pub fn edges_for_resource(&self, resource: &str) -> Result<Vec<Relationship>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "{} WHERE to_resource = ?1 ORDER BY rowid",
            SELECT_EDGES
        ))?;
        let edges = stmt
            .query_map(params![resource], row_to_edge)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(edges)
    }

    /// Delete rows displaced by a newer resolution
    ///
    /// Removes every edge whose `(to, type)` appears in `resolved` under a
    /// different owner. Runs in one transaction and returns the number of
    /// rows deleted.
    pub fn prune_superseded(&self, resolved: &[Relationship]) -> Result<usize, StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut removed = 0;
        {
            let mut stmt = tx.prepare(PRUNE_SUPERSEDED)?;
            for edge in resolved {
                removed += stmt.execute(params![edge.to, edge.relationship_type, edge.from])?;
            }
        }
        tx.commit()?;

        debug!("Pruned {} superseded edges", removed);
        Ok(removed)
    }

    /// Number of stored edges
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM ownership_edges", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl GraphStore for SqliteGraphStore {
    type Error = StoreError;

    fn upsert_edge(&self, edge: &Relationship) -> Result<(), Self::Error> {
        let conn = self.conn()?;
        upsert(&conn, edge)
    }

    fn upsert_edges(&self, edges: &[Relationship]) -> Result<(), Self::Error> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for edge in edges {
            upsert(&tx, edge)?;
        }
        tx.commit()?;

        debug!("Upserted {} edges", edges.len());
        Ok(())
    }
}

fn upsert(conn: &Connection, edge: &Relationship) -> Result<(), StoreError> {
    let corroborated_by = serde_json::to_string(&edge.corroborated_by)
        .map_err(|e| StoreError::InvalidData(e.to_string()))?;

    conn.execute(
        UPSERT_EDGE,
        params![
            edge.from,
            edge.to,
            edge.relationship_type,
            edge.confidence,
            edge.has_conflict,
            edge.source,
            edge.timestamp.as_str(),
            corroborated_by,
        ],
    )?;

    Ok(())
}

fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<Relationship> {
    let corroborated: String = row.get(7)?;
    let corroborated_by: Vec<String> = serde_json::from_str(&corroborated).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Relationship {
        from: row.get(0)?,
        to: row.get(1)?,
        relationship_type: row.get(2)?,
        confidence: row.get(3)?,
        has_conflict: row.get(4)?,
        source: row.get(5)?,
        timestamp: Timestamp::new(row.get::<_, String>(6)?),
        corroborated_by,
    })
}
