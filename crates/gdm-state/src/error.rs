use gdm_types::StateAddress;
use thiserror::Error;

/// Errors from state access and bucket decoding.
#[derive(Debug, Error)]
pub enum StateError {
    /// Stored bucket bytes failed to decode into six-field members.
    ///
    /// This indicates a prior encoding bug, not a user error.
    #[error("corrupt state at {address}: {reason}")]
    CorruptState {
        address: StateAddress,
        reason: String,
    },

    /// A state round trip exceeded its time bound.
    #[error("state request timed out after {seconds}s")]
    StoreTimeout { seconds: u64 },

    /// The backing context reported a failure.
    #[error("state backend error: {0}")]
    Backend(String),
}

/// Result alias for state operations.
pub type StateResult<T> = Result<T, StateError>;
