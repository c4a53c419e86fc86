//! Ledger state access for the GDM family.
//!
//! Provides the canonical bucket encoding shared by every implementation
//! reading GDM state, the [`StateContext`] boundary to validator state,
//! and [`MessageStore`], the short-lived adapter one apply invocation uses
//! to read and write records.

pub mod bucket;
pub mod context;
pub mod error;
pub mod store;

pub use bucket::{decode_bucket, encode_bucket};
pub use context::{InMemoryStateContext, StateContext};
pub use error::{StateError, StateResult};
pub use store::MessageStore;
