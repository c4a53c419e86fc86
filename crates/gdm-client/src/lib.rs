//! Client for the generic-discrete-message family.
//!
//! Builds, signs, and submits creation transactions to a ledger REST API,
//! optionally waiting for commit confirmation, and reads records back out
//! of ledger state. The client never retries on its own; transient
//! failures surface to the caller, who owns retry policy.

pub mod client;
pub mod envelope;
pub mod error;
pub mod rest;
pub mod signer;

pub use client::MessageClient;
pub use envelope::{build_create_batch, Batch, BatchHeader, BatchList, Transaction, TransactionHeader};
pub use error::{ClientError, ClientResult};
pub use rest::{BasicAuth, BatchStatus, HttpGateway, RestGateway};
pub use signer::TransactionSigner;

// Re-export key types
pub use gdm_types::{Record, StateAddress};
