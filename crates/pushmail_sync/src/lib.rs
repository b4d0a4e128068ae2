//! # Pushmail Sync
//!
//! Account-level sync cycle for the Pushmail client.
//!
//! This crate provides:
//! - [`AccountSyncEngine`]: the FolderSync round loop with recovery
//! - Response classification into a closed category set
//! - The provisioning and parser contracts the engine drives
//! - The address redirector
//! - Transport abstraction (mock for testing, HTTP skeleton)
//!
//! ## Architecture
//!
//! One invocation of [`AccountSyncEngine::perform_sync`] runs one or more
//! request/response **rounds**. Each round sends a FolderSync request
//! carrying the account's current sync key, classifies the server's answer,
//! and either finishes with a terminal [`SyncStatus`], remediates
//! (provisioning, redirect) or loops for another round.
//!
//! ## Key Invariants
//!
//! - Exactly one `SyncStatus` is returned per invocation
//! - At most one round is in flight; rounds are strictly sequential
//! - The response resource is released on every exit path of a round
//! - Transport faults are terminal, never retried here
//! - The round loop is bounded; a server that redirects or resyncs forever
//!   ends in [`SyncStatus::FailureExhausted`]
//! - Callers guarantee single-flight access per account; the engine takes
//!   `&mut self` and holds no locks of its own

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod classifier;
mod config;
mod engine;
mod error;
mod http;
mod provision;
mod redirect;
mod response;
mod transport;

pub use classifier::{
    classify, is_auth_error, is_provision_error, is_redirect_error, ResponseCategory,
    STATUS_FORBIDDEN, STATUS_NEED_PROVISIONING, STATUS_OK, STATUS_REDIRECT, STATUS_UNAUTHORIZED,
};
pub use config::SyncConfig;
pub use engine::{AccountSyncEngine, FolderSyncParser, SyncStats, SyncStatus};
pub use error::{TransportError, TransportResult};
pub use http::{HttpClient, HttpTransport, RawResponse};
pub use provision::{Provisioner, StaticProvisioner};
pub use redirect::apply_redirect;
pub use response::WireResponse;
pub use transport::{Endpoint, MockTransport, SentRequest, SyncTransport};
