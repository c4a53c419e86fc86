//! Foundation types for the generic-discrete-message (GDM) transaction
//! family.
//!
//! This crate provides the shared vocabulary of the GDM system. Every other
//! GDM crate depends on `gdm-types`.
//!
//! # Key Types
//!
//! - [`Record`] — An immutable subject–predicate–object message fact
//! - [`StateAddress`] — 70-hex-char ledger address derived from a record key
//! - [`CreatePayload`] — Parsed form of the delimited wire payload

pub mod address;
pub mod payload;
pub mod record;

pub use address::{StateAddress, namespace_prefix, FAMILY_NAME, FAMILY_VERSION};
pub use payload::{CreatePayload, PayloadError, BUCKET_DELIMITER, FIELD_DELIMITER};
pub use record::Record;
