//! The account store trait and its in-memory implementation.

use crate::account::{Account, AccountId, SyncKey};
use crate::error::{StoreError, StoreResult};
use crate::host_auth::{HostAuth, HostAuthId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// A single-column change to an [`Account`] record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountChange {
    /// Replace the stored sync cursor.
    SyncKey(SyncKey),
}

/// A single-column change to a [`HostAuth`] record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAuthChange {
    /// Replace the server address.
    Address(String),
}

/// Persistence for account and host configuration records.
///
/// Updates are **minimal**: callers name exactly the columns they change,
/// and implementations must write only those columns, never the whole
/// record. This is what lets the sync engine persist a redirect as a
/// one-field write while the record may be concurrently extended elsewhere.
pub trait AccountStore: Send + Sync {
    /// Loads an account record.
    fn account(&self, id: AccountId) -> StoreResult<Account>;

    /// Loads a host configuration record.
    fn host_auth(&self, id: HostAuthId) -> StoreResult<HostAuth>;

    /// Applies column changes to an account record.
    fn update_account(&self, id: AccountId, changes: &[AccountChange]) -> StoreResult<()>;

    /// Applies column changes to a host configuration record.
    fn update_host_auth(&self, id: HostAuthId, changes: &[HostAuthChange]) -> StoreResult<()>;
}

/// A write observed by [`MemoryStore`], kept for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// An account column was written.
    Account(AccountId, AccountChange),
    /// A host configuration column was written.
    HostAuth(HostAuthId, HostAuthChange),
}

/// An in-memory account store.
///
/// Suitable for unit and integration tests. Every write is also appended to
/// a journal so tests can assert exactly which columns were touched.
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
    host_auths: RwLock<HashMap<HostAuthId, HostAuth>>,
    journal: RwLock<Vec<StoreEvent>>,
    fail_writes: RwLock<bool>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an account record.
    pub fn put_account(&self, account: Account) {
        self.accounts.write().insert(account.id, account);
    }

    /// Inserts or replaces a host configuration record.
    pub fn put_host_auth(&self, host_auth: HostAuth) {
        self.host_auths.write().insert(host_auth.id, host_auth);
    }

    /// Returns the writes applied so far, in order.
    pub fn journal(&self) -> Vec<StoreEvent> {
        self.journal.read().clone()
    }

    /// Makes every subsequent write fail, for fault-injection tests.
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.write() = fail;
    }

    fn check_writable(&self) -> StoreResult<()> {
        if *self.fail_writes.read() {
            Err(StoreError::Io(std::io::Error::other("injected write failure")))
        } else {
            Ok(())
        }
    }
}

impl AccountStore for MemoryStore {
    fn account(&self, id: AccountId) -> StoreResult<Account> {
        self.accounts
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("account {}", id.0)))
    }

    fn host_auth(&self, id: HostAuthId) -> StoreResult<HostAuth> {
        self.host_auths
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("host auth {}", id.0)))
    }

    fn update_account(&self, id: AccountId, changes: &[AccountChange]) -> StoreResult<()> {
        self.check_writable()?;
        let mut accounts = self.accounts.write();
        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("account {}", id.0)))?;
        let mut journal = self.journal.write();
        for change in changes {
            match change {
                AccountChange::SyncKey(key) => account.sync_key = Some(key.clone()),
            }
            journal.push(StoreEvent::Account(id, change.clone()));
        }
        Ok(())
    }

    fn update_host_auth(&self, id: HostAuthId, changes: &[HostAuthChange]) -> StoreResult<()> {
        self.check_writable()?;
        let mut host_auths = self.host_auths.write();
        let host_auth = host_auths
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("host auth {}", id.0)))?;
        let mut journal = self.journal.write();
        for change in changes {
            match change {
                HostAuthChange::Address(address) => host_auth.address = address.clone(),
            }
            journal.push(StoreEvent::HostAuth(id, change.clone()));
        }
        Ok(())
    }
}
