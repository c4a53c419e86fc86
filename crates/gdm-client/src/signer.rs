use std::path::Path;

use crate::error::{ClientError, ClientResult};

/// Signing capability for transaction and batch headers.
///
/// Wraps an ed25519 key loaded from hex key material. Construction fails
/// on unreadable or unparseable material, before any network interaction
/// is attempted.
pub struct TransactionSigner {
    key: ed25519_dalek::SigningKey,
}

impl TransactionSigner {
    /// Load a signer from a file holding the hex-encoded 32-byte secret.
    ///
    /// Surrounding whitespace (trailing newline) is tolerated.
    pub fn from_key_file(path: impl AsRef<Path>) -> ClientResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| ClientError::KeyFile {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_hex(contents.trim())
    }

    /// Load a signer from a hex-encoded 32-byte secret.
    pub fn from_hex(private_key_hex: &str) -> ClientResult<Self> {
        let bytes = hex::decode(private_key_hex)
            .map_err(|err| ClientError::InvalidKey(err.to_string()))?;
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| ClientError::InvalidKey("expected 32-byte key".into()))?;
        Ok(Self {
            key: ed25519_dalek::SigningKey::from_bytes(&seed),
        })
    }

    /// Generate a random signer. For tests and key provisioning.
    pub fn generate() -> Self {
        let mut csprng = rand::thread_rng();
        Self {
            key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Hex of the secret key, as written to a key file.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.key.as_bytes())
    }

    /// Hex identifier of the corresponding public key.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.key.verifying_key().to_bytes())
    }

    /// Sign header bytes; returns the hex-encoded signature.
    pub fn sign(&self, header: &[u8]) -> String {
        use ed25519_dalek::Signer;
        hex::encode(self.key.sign(header).to_bytes())
    }
}

impl std::fmt::Debug for TransactionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransactionSigner({})", self.public_key_hex())
    }
}
