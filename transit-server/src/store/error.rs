//! Store error types.

/// Errors from the durable key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// SQLite operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored or to-be-stored value was not valid JSON
    #[error("cache value serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem error while opening the database
    #[error("cache database io error: {0}")]
    Io(#[from] std::io::Error),
}
