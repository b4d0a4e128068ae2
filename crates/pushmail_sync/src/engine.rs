//! The account sync cycle.

use crate::classifier::{classify, ResponseCategory};
use crate::config::SyncConfig;
use crate::provision::Provisioner;
use crate::redirect::apply_redirect;
use crate::transport::{Endpoint, SyncTransport};
use pushmail_protocol::folder_sync::{self, FolderSyncOutcome, ParseError};
use pushmail_protocol::status;
use pushmail_store::{Account, AccountStore, HostAuth};
use std::sync::Arc;
use tracing::{debug, warn};

/// Terminal outcome of one account-sync invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// The folder hierarchy is in sync.
    Success,
    /// A transport fault ended the cycle.
    FailureIo,
    /// The server demanded a security policy the client could not satisfy.
    FailureSecurity,
    /// The server rejected the client's credentials, or issued a redirect
    /// without a usable address.
    FailureLogin,
    /// An unclassified protocol failure.
    FailureOther,
    /// The round bound was reached before the server settled.
    FailureExhausted,
}

/// Counters for one invocation, reset by every
/// [`perform_sync`](AccountSyncEngine::perform_sync) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Request/response rounds completed or attempted.
    pub rounds: u32,
    /// Provisioning attempts made.
    pub provision_attempts: u32,
    /// Redirects applied and followed.
    pub redirects_followed: u32,
}

/// Contract of the folder-hierarchy response parser.
///
/// The parser owns the response payload: it applies folder changes to
/// local state and persists whatever sync key the server issued (through
/// its own store handle and `account`). The engine never advances the key
/// itself; it only learns whether another round is needed.
pub trait FolderSyncParser {
    /// Parses one response body for `account`.
    fn parse(&self, account: &mut Account, body: &[u8]) -> Result<FolderSyncOutcome, ParseError>;
}

/// What a finished round means for the cycle.
enum Round {
    /// The hierarchy is settled; the invocation succeeds.
    Complete,
    /// The server asked for another round.
    Again,
    /// The invocation fails with this status.
    Fail(SyncStatus),
}

/// Drives the account-level folder sync cycle.
///
/// One engine owns one account's invocation state: the account and host
/// configuration records plus injected collaborators - transport, parser,
/// provisioner and store. Callers guarantee single-flight access per
/// account; the engine holds no locks.
///
/// ```no_run
/// # use pushmail_sync::*;
/// # use pushmail_store::*;
/// # use std::sync::Arc;
/// # fn demo<T: SyncTransport, P: FolderSyncParser, V: Provisioner>(
/// #     transport: T, parser: P, provisioner: V,
/// #     store: Arc<MemoryStore>, account: Account, host_auth: HostAuth,
/// # ) {
/// let mut engine = AccountSyncEngine::new(
///     SyncConfig::new("DEV1"),
///     transport,
///     parser,
///     provisioner,
///     store,
///     account,
///     host_auth,
/// );
/// let status = engine.perform_sync();
/// assert_eq!(status, SyncStatus::Success);
/// # }
/// ```
pub struct AccountSyncEngine<T, P, V, S> {
    config: SyncConfig,
    transport: T,
    parser: P,
    provisioner: V,
    store: Arc<S>,
    account: Account,
    host_auth: HostAuth,
    stats: SyncStats,
}

impl<T, P, V, S> AccountSyncEngine<T, P, V, S>
where
    T: SyncTransport,
    P: FolderSyncParser,
    V: Provisioner,
    S: AccountStore,
{
    /// Creates an engine for one account.
    pub fn new(
        config: SyncConfig,
        transport: T,
        parser: P,
        provisioner: V,
        store: Arc<S>,
        account: Account,
        host_auth: HostAuth,
    ) -> Self {
        Self {
            config,
            transport,
            parser,
            provisioner,
            store,
            account,
            host_auth,
            stats: SyncStats::default(),
        }
    }

    /// The account record, including any sync key the parser persisted.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// The host configuration, including any applied redirect.
    pub fn host_auth(&self) -> &HostAuth {
        &self.host_auth
    }

    /// Counters from the most recent invocation.
    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// Runs the sync cycle to a terminal status.
    ///
    /// Rounds repeat while the server keeps the cycle open (hierarchy
    /// resync, redirect) and stop at the first terminal condition. The
    /// loop is bounded by [`SyncConfig::max_rounds`].
    pub fn perform_sync(&mut self) -> SyncStatus {
        self.stats = SyncStats::default();
        loop {
            if self.stats.rounds >= self.config.max_rounds {
                warn!(
                    rounds = self.stats.rounds,
                    "round bound reached before the server settled"
                );
                return SyncStatus::FailureExhausted;
            }
            self.stats.rounds += 1;

            match self.run_round() {
                Round::Complete => return SyncStatus::Success,
                Round::Again => {}
                Round::Fail(status) => return status,
            }
        }
    }

    /// One request/response exchange.
    fn run_round(&mut self) -> Round {
        let sync_key = self.account.effective_sync_key();
        let body = match folder_sync::request(sync_key.as_str()) {
            Ok(body) => body,
            Err(err) => {
                warn!(%err, "could not encode the request document");
                return Round::Fail(SyncStatus::FailureOther);
            }
        };

        let endpoint = Endpoint::from_host_auth(&self.host_auth);
        debug!(
            address = %endpoint.address,
            sync_key = %sync_key,
            round = self.stats.rounds,
            "sending folder sync"
        );

        let resp = match self.transport.send(&endpoint, folder_sync::COMMAND, &body) {
            Ok(resp) => resp,
            Err(err) => {
                warn!(%err, "transport fault");
                return Round::Fail(SyncStatus::FailureIo);
            }
        };

        // `resp` owns the round's network resource; it is dropped, and
        // thereby released, on every path out of this scope.
        match classify(resp.status()) {
            ResponseCategory::Ok => {
                if resp.is_empty() {
                    return Round::Complete;
                }
                match self.parser.parse(&mut self.account, resp.body()) {
                    Ok(FolderSyncOutcome::Synced) => Round::Complete,
                    Ok(FolderSyncOutcome::NeedsResync) => Round::Again,
                    Err(ParseError::Status(code)) if status::is_needs_provisioning(code) => {
                        self.provision(&endpoint)
                    }
                    Err(ParseError::Status(code)) => {
                        debug!(code, "command status ends the cycle");
                        Round::Fail(SyncStatus::FailureOther)
                    }
                    Err(ParseError::Io(err)) => {
                        warn!(%err, "i/o fault reading the response body");
                        Round::Fail(SyncStatus::FailureIo)
                    }
                    Err(ParseError::Malformed(reason)) => {
                        warn!(%reason, "unparseable response body");
                        Round::Fail(SyncStatus::FailureOther)
                    }
                }
            }
            ResponseCategory::ProvisionError => self.provision(&endpoint),
            ResponseCategory::AuthError => Round::Fail(SyncStatus::FailureLogin),
            ResponseCategory::RedirectError => self.redirect(resp.redirect_address()),
            ResponseCategory::Other => {
                warn!(status = resp.status(), "unclassified transport status");
                Round::Fail(SyncStatus::FailureOther)
            }
        }
    }

    /// One provisioning attempt; an attempt that cannot complete counts
    /// as rejected.
    fn provision(&mut self, endpoint: &Endpoint) -> Round {
        self.stats.provision_attempts += 1;
        let provisioned = match self.provisioner.provision(endpoint, &self.account) {
            Ok(accepted) => accepted,
            Err(err) => {
                debug!(%err, "provisioning attempt did not complete");
                false
            }
        };
        if provisioned {
            Round::Complete
        } else {
            Round::Fail(SyncStatus::FailureSecurity)
        }
    }

    /// Applies a redirect and keeps the cycle open, or fails the
    /// invocation when the server named no usable address.
    fn redirect(&mut self, new_address: Option<&str>) -> Round {
        match apply_redirect(self.store.as_ref(), &mut self.host_auth, new_address) {
            Ok(true) => {
                self.stats.redirects_followed += 1;
                Round::Again
            }
            Ok(false) => {
                warn!("redirect carried no address");
                Round::Fail(SyncStatus::FailureLogin)
            }
            Err(err) => {
                warn!(%err, "redirect could not be persisted");
                Round::Fail(SyncStatus::FailureIo)
            }
        }
    }
}
