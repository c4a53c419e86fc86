use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

/// Transaction family name, hashed to produce the namespace prefix.
pub const FAMILY_NAME: &str = "generic-discrete-message";

/// Transaction family version declared on every transaction header.
pub const FAMILY_VERSION: &str = "1.0";

/// First 6 hex characters of SHA-512 of the family name.
///
/// Every address in this family starts with this prefix; the validator
/// routes transactions to the handler by it.
pub fn namespace_prefix() -> String {
    let digest = Sha512::digest(FAMILY_NAME.as_bytes());
    hex::encode(digest)[..6].to_string()
}

/// A 70-hex-character ledger state address.
///
/// Derived deterministically from a record key: the family namespace
/// prefix followed by the first 64 hex characters of SHA-512 of the key
/// bytes. Distinct keys may collide at the same address; colliding keys
/// share a bucket in state rather than overwriting each other.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateAddress(String);

impl StateAddress {
    /// Derive the address for a record key.
    pub fn derive_for_key(key: &str) -> Self {
        let digest = Sha512::digest(key.as_bytes());
        let mut address = namespace_prefix();
        address.push_str(&hex::encode(digest)[..64]);
        Self(address)
    }

    /// Wrap an already-computed 70-hex-char address. Used when decoding
    /// state listing responses; performs no validation.
    pub fn from_raw(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateAddress({})", self.0)
    }
}
