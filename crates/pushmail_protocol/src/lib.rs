//! # Pushmail Protocol
//!
//! Wire-format types for the Pushmail sync client.
//!
//! This crate provides:
//! - A WBXML 1.3 writer for building request documents
//! - The FolderHierarchy tag table
//! - The in-band command-status code table
//! - The FolderSync request builder and parse-outcome contract
//!
//! This is a pure protocol crate with no I/O operations. Transport-level
//! concerns (HTTP status classification, redirects) live in the sync engine.
//!
//! ## Usage
//!
//! ```
//! use pushmail_protocol::folder_sync;
//!
//! // Build a FolderSync request for an initial sync.
//! let body = folder_sync::request("0").unwrap();
//! assert_eq!(body[0], 0x03); // WBXML version 1.3
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod folder_sync;
pub mod status;
pub mod tags;
mod wbxml;

pub use wbxml::{Serializer, Tag, WbxmlError, WbxmlResult};
