//! The FolderSync operation.
//!
//! FolderSync reconciles the client's view of the remote folder hierarchy
//! using an opaque sync-key cursor. This module builds the request document
//! and defines the typed outcome contract of the response parser. The parser
//! itself is an external collaborator: it applies hierarchy changes and
//! persists whatever key the server issues, and callers only learn whether
//! another round is needed.

use crate::tags::folder_hierarchy;
use crate::wbxml::{Serializer, WbxmlResult};
use thiserror::Error;

/// Command name carried in the request URL.
pub const COMMAND: &str = "FolderSync";

/// Sync key requesting a full initial hierarchy sync.
pub const INITIAL_SYNC_KEY: &str = "0";

/// Builds the request body for one FolderSync round.
///
/// The document wraps the current sync key as the only leaf:
/// `FolderSync { SyncKey: <key> }`.
pub fn request(sync_key: &str) -> WbxmlResult<Vec<u8>> {
    let mut s = Serializer::new();
    s.start(folder_hierarchy::FOLDER_SYNC)
        .start(folder_hierarchy::SYNC_KEY)
        .text(sync_key)?
        .end()?
        .end()?;
    s.done()
}

/// Result of parsing a FolderSync response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderSyncOutcome {
    /// The hierarchy is up to date; no further rounds are required.
    Synced,
    /// The server reset or truncated the hierarchy; another round must be
    /// issued with the key the parser persisted.
    NeedsResync,
}

/// Errors surfaced while reading or interpreting a response body.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The server reported an in-band command status instead of sync data.
    /// See [`crate::status`] for the code groups.
    #[error("server reported command status {0}")]
    Status(u16),

    /// Reading the body failed mid-stream.
    #[error("i/o error while reading response body")]
    Io(#[from] std::io::Error),

    /// The body is not a well-formed hierarchy document.
    #[error("malformed response body: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_request_bytes() {
        let bytes = request(INITIAL_SYNC_KEY).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x03, 0x01, 0x6A, 0x00, // header
                0x00, 0x07, // FolderHierarchy page
                0x56, // FolderSync
                0x52, // SyncKey
                0x03, b'0', 0x00, // "0"
                0x01, 0x01,
            ]
        );
    }

    #[test]
    fn request_carries_current_key() {
        let bytes = request("1234-5678").unwrap();
        let key_bytes = b"1234-5678";
        assert!(bytes
            .windows(key_bytes.len())
            .any(|w| w == key_bytes.as_slice()));
    }

    #[test]
    fn status_error_display() {
        let err = ParseError::Status(142);
        assert_eq!(err.to_string(), "server reported command status 142");
    }
}
