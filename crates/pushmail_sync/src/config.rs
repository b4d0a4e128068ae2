//! Configuration for the sync engine.

use std::time::Duration;

/// Configuration for one account's sync cycle.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Protocol version advertised to the server.
    pub protocol_version: String,
    /// Stable device identifier sent with every request.
    pub device_id: String,
    /// Device type label sent with every request.
    pub device_type: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// Maximum request/response rounds per invocation. The server-driven
    /// resync/redirect loop terminates with
    /// [`crate::SyncStatus::FailureExhausted`] when this bound is hit.
    pub max_rounds: u32,
    /// Request timeout handed to the transport.
    pub timeout: Duration,
}

impl SyncConfig {
    /// Creates a configuration for the given device identifier.
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            protocol_version: "14.1".into(),
            device_id: device_id.into(),
            device_type: "Pushmail".into(),
            user_agent: "Pushmail/0.3".into(),
            max_rounds: 8,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the advertised protocol version.
    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    /// Sets the round bound.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("")
    }
}
