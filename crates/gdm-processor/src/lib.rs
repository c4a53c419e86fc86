//! Validation and apply engine for the GDM family.
//!
//! This is the ledger-side half of the system: given an incoming
//! transaction, it decodes the payload, enforces the create-once rule
//! against ledger state, and commits the new record. The engine holds no
//! memory across transactions; the validator guarantees serial execution
//! per address.

pub mod error;
pub mod handler;

pub use error::{ApplyError, ApplyResult};
pub use handler::{Action, MessageHandler, TpRequest};
