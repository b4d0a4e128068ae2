//! Account records and the sync-key cursor.

use crate::host_auth::HostAuthId;
use std::fmt;

/// Identifier of an [`Account`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub u64);

/// Opaque server-issued cursor representing folder-hierarchy sync progress.
///
/// The token's contents belong to the server; the client only stores it and
/// sends it back verbatim. The well-known value `"0"` requests a full
/// initial sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncKey(String);

impl SyncKey {
    /// The key requesting a full initial sync.
    pub fn initial() -> Self {
        Self("0".into())
    }

    /// Wraps a server-issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// True for the well-known initial value.
    pub fn is_initial(&self) -> bool {
        self.0 == "0"
    }

    /// The token as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyncKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mailbox being synchronized.
///
/// Holds the current sync cursor and a reference to the host configuration.
/// The sync engine reads accounts; only the response parser advances the
/// sync key (through the store) as a side effect of applying a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Record identifier.
    pub id: AccountId,
    /// Primary address of the mailbox.
    pub email_address: String,
    /// Current folder-hierarchy cursor, if any round has completed.
    pub sync_key: Option<SyncKey>,
    /// Host configuration used to reach this account's server.
    pub host_auth_id: HostAuthId,
}

impl Account {
    /// The key to send this round: the stored cursor, or the initial key
    /// when no sync has completed yet.
    pub fn effective_sync_key(&self) -> SyncKey {
        self.sync_key.clone().unwrap_or_else(SyncKey::initial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(sync_key: Option<SyncKey>) -> Account {
        Account {
            id: AccountId(1),
            email_address: "user@example.com".into(),
            sync_key,
            host_auth_id: HostAuthId(1),
        }
    }

    #[test]
    fn missing_key_syncs_from_zero() {
        assert_eq!(account(None).effective_sync_key().as_str(), "0");
        assert!(account(None).effective_sync_key().is_initial());
    }

    #[test]
    fn stored_key_is_sent_verbatim() {
        let acct = account(Some(SyncKey::new("17-abc")));
        assert_eq!(acct.effective_sync_key().as_str(), "17-abc");
        assert!(!acct.effective_sync_key().is_initial());
    }
}
