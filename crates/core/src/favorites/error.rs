use thiserror::Error;

/// Errors raised at the storage boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// Storage could not be read or written (I/O, quota, closed database).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored data exists but cannot be interpreted.
    #[error("Stored favorites are corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to serialize favorites: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(e: rusqlite::Error) -> Self {
        PersistenceError::Unavailable(e.to_string())
    }
}
