//! Error types for the sync engine.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Faults raised by a transport while sending a request or reading a
/// response.
///
/// The engine does not distinguish between these: any transport fault ends
/// the invocation with [`crate::SyncStatus::FailureIo`]. The variants exist
/// for transport implementations and their logs.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A network or socket fault.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The TLS layer rejected the connection.
    #[error("tls error: {0}")]
    Tls(String),

    /// The request did not complete in time. An external cancellation
    /// signal aborting blocking I/O also surfaces here.
    #[error("request timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        let err = TransportError::Io(std::io::Error::other("connection reset"));
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(TransportError::Timeout.to_string(), "request timed out");
    }
}
