//! # Pushmail Store
//!
//! Persistence model for the Pushmail sync client.
//!
//! This crate provides:
//! - [`Account`] and [`HostAuth`] records with their identifiers
//! - [`SyncKey`], the opaque server-issued sync cursor
//! - [`AccountStore`], the column-keyed persistence trait
//! - [`MemoryStore`], an in-memory store for testing
//!
//! ## Key Invariants
//!
//! - Updates are minimal: callers name the columns they change, and a store
//!   must not rewrite the rest of the record
//! - After a successful address update, the backing store and any in-memory
//!   `HostAuth` the caller holds must agree
//! - Connection identity derives from `HostAuth::fingerprint()`, never from
//!   state cached independently of the record

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod account;
mod error;
mod host_auth;
mod store;

pub use account::{Account, AccountId, SyncKey};
pub use error::{StoreError, StoreResult};
pub use host_auth::{Fingerprint, HostAuth, HostAuthId};
pub use store::{AccountChange, AccountStore, HostAuthChange, MemoryStore, StoreEvent};
