use thiserror::Error;

/// Errors surfaced to users of the GDM client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The private key file could not be read.
    #[error("failed to read private key {path}: {reason}")]
    KeyFile { path: String, reason: String },

    /// The key material was present but unparseable.
    #[error("unable to load private key: {0}")]
    InvalidKey(String),

    /// An operation that signs was attempted on a read-only client.
    #[error("no signing key configured")]
    NoSigningKey,

    /// Could not reach the ledger REST API.
    #[error("failed to connect to {url}: {reason}")]
    Connection { url: String, reason: String },

    /// The REST API answered with a non-success status.
    #[error("error {status}: {reason}")]
    Submission { status: u16, reason: String },

    /// The REST API answered 200 but the body was not what it should be.
    #[error("unexpected response from ledger: {0}")]
    InvalidResponse(String),

    /// Envelope serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
