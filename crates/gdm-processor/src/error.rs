use gdm_state::StateError;
use gdm_types::PayloadError;
use thiserror::Error;

/// Outcome classes for a rejected or failed apply.
///
/// `InvalidTransaction` is the caller's fault and non-retryable without a
/// changed submission; `Internal` indicates broken stored state or
/// infrastructure and is never the submitter's to fix.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PayloadError> for ApplyError {
    fn from(err: PayloadError) -> Self {
        ApplyError::InvalidTransaction(err.to_string())
    }
}

impl From<StateError> for ApplyError {
    fn from(err: StateError) -> Self {
        ApplyError::Internal(err.to_string())
    }
}

/// Result alias for apply operations.
pub type ApplyResult<T> = Result<T, ApplyError>;
