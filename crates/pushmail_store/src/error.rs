//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error occurred in the backing store.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The referenced record does not exist.
    #[error("no such record: {0}")]
    NotFound(String),

    /// The backing store rejected the write.
    #[error("write rejected: {0}")]
    WriteRejected(String),
}
