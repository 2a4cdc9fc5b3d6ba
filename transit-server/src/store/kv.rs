//! SQLite-backed key-value collections with an in-process mirror.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use moka::sync::Cache as MokaCache;
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;

use super::error::StoreError;

/// Default path for the cache database file.
const DEFAULT_PATH: &str = "transit_cache.db";

/// Default maximum entries per in-process mirror.
const DEFAULT_MIRROR_CAPACITY: u64 = 10_000;

/// Schema for the two collections. Key uniqueness is maintained by the
/// delete-then-insert sequence in [`Collection::put`], not by a constraint.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS requests (key TEXT NOT NULL, value TEXT NOT NULL);
CREATE INDEX IF NOT EXISTS requests_key ON requests (key);
CREATE TABLE IF NOT EXISTS trips (key TEXT NOT NULL, value TEXT NOT NULL);
CREATE INDEX IF NOT EXISTS trips_key ON trips (key);
";

/// Configuration for the store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,

    /// Maximum number of entries held by each collection's mirror.
    pub mirror_capacity: u64,
}

impl StoreConfig {
    /// Create a new config with the given database path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mirror_capacity: DEFAULT_MIRROR_CAPACITY,
        }
    }

    /// Set the mirror capacity.
    pub fn with_mirror_capacity(mut self, capacity: u64) -> Self {
        self.mirror_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

/// Durable key-value store holding the two cache collections.
#[derive(Debug, Clone)]
pub struct Store {
    requests: Collection,
    trips: Collection,
}

impl Store {
    /// Open (creating if necessary) the store at the configured path.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&config.path)?;
        Self::with_connection(conn, config.mirror_capacity)
    }

    /// Open a transient in-memory store. Nothing survives the process;
    /// useful for tests and for running without a writable disk.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, DEFAULT_MIRROR_CAPACITY)
    }

    fn with_connection(conn: Connection, mirror_capacity: u64) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        let conn = Arc::new(Mutex::new(conn));

        Ok(Self {
            requests: Collection::new(conn.clone(), "requests", mirror_capacity),
            trips: Collection::new(conn, "trips", mirror_capacity),
        })
    }

    /// The collection of opaque request results, keyed by canonical URL or
    /// normalized geocoding address.
    pub fn requests(&self) -> &Collection {
        &self.requests
    }

    /// The collection of resolved trip records, keyed by trip id.
    pub fn trips(&self) -> &Collection {
        &self.trips
    }
}

/// One keyed collection: a durable table plus its bounded mirror.
///
/// Cheap to clone; clones share the underlying connection and mirror.
#[derive(Clone)]
pub struct Collection {
    conn: Arc<Mutex<Connection>>,
    table: &'static str,
    mirror: MokaCache<String, Value>,
}

impl Collection {
    fn new(conn: Arc<Mutex<Connection>>, table: &'static str, mirror_capacity: u64) -> Self {
        let mirror = MokaCache::builder().max_capacity(mirror_capacity).build();

        Self {
            conn,
            table,
            mirror,
        }
    }

    /// Look up a value by key.
    ///
    /// A mirror hit returns without touching the durable table. A durable
    /// miss is *not* mirrored, so a later `put` by another process remains
    /// observable on the next read.
    pub fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        if let Some(hit) = self.mirror.get(key) {
            return Ok(Some(hit));
        }

        let row: Option<String> = {
            let conn = self.lock();
            conn.query_row(
                &format!("SELECT value FROM {} WHERE key = ?1", self.table),
                params![key],
                |r| r.get(0),
            )
            .optional()?
        };

        match row {
            Some(text) => {
                let value: Value = serde_json::from_str(&text)?;
                self.mirror.insert(key.to_string(), value.clone());
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Replace the stored value for `key` wholesale.
    ///
    /// The delete-then-insert runs inside one transaction, so a concurrent
    /// `get` observes either the old or the new value, never neither.
    pub fn put(&self, key: &str, value: &Value) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;

        {
            let mut conn = self.lock();
            let tx = conn.transaction()?;
            tx.execute(
                &format!("DELETE FROM {} WHERE key = ?1", self.table),
                params![key],
            )?;
            tx.execute(
                &format!("INSERT INTO {} (key, value) VALUES (?1, ?2)", self.table),
                params![key, text],
            )?;
            tx.commit()?;
        }

        self.mirror.insert(key.to_string(), value.clone());
        Ok(())
    }

    /// Whether a value is stored for `key`.
    pub fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }

    /// Number of live rows in the durable table (for monitoring).
    pub fn durable_len(&self) -> Result<u64, StoreError> {
        let conn = self.lock();
        let count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |r| r.get(0),
        )?;
        Ok(count as u64)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned mutex only means another thread panicked mid-operation;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
