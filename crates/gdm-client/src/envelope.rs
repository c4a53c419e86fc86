//! Signed transaction and batch envelopes.
//!
//! A creation request travels as one signed transaction wrapped in one
//! signed batch. Headers are serialized with bincode; signatures cover
//! the serialized header bytes. The batch identifier used for status
//! polling is the batch header signature.

use gdm_types::{CreatePayload, Record, StateAddress, FAMILY_NAME, FAMILY_VERSION};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::error::{ClientError, ClientResult};
use crate::signer::TransactionSigner;

/// Header of a single signed transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub signer_public_key: String,
    pub family_name: String,
    pub family_version: String,
    /// Addresses this transaction may read. Always the one record address.
    pub inputs: Vec<String>,
    /// Addresses this transaction may write. Always the one record address.
    pub outputs: Vec<String>,
    pub dependencies: Vec<String>,
    /// Hex SHA-512 of the payload bytes, binding payload to header.
    pub payload_sha512: String,
    pub batcher_public_key: String,
    /// Random per-transaction value; makes identical payloads produce
    /// distinct transaction ids and defeats replay.
    pub nonce: String,
}

/// One signed transaction: serialized header, its signature, raw payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    pub header: Vec<u8>,
    pub header_signature: String,
    pub payload: Vec<u8>,
}

/// Header of a batch of transactions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchHeader {
    pub signer_public_key: String,
    pub transaction_ids: Vec<String>,
}

/// One signed batch, the atomic submission unit at the ledger boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Batch {
    pub header: Vec<u8>,
    pub header_signature: String,
    pub transactions: Vec<Transaction>,
}

/// Envelope submitted to the ledger: one or more batches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchList {
    pub batches: Vec<Batch>,
}

impl BatchList {
    pub fn to_bytes(&self) -> ClientResult<Vec<u8>> {
        bincode::serialize(self).map_err(|err| ClientError::Serialization(err.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> ClientResult<Self> {
        bincode::deserialize(data).map_err(|err| ClientError::Serialization(err.to_string()))
    }

    /// The identifier used to poll for commit status.
    pub fn batch_id(&self) -> &str {
        &self.batches[0].header_signature
    }
}

fn sha512_hex(data: &[u8]) -> String {
    hex::encode(Sha512::digest(data))
}

/// Build the signed single-transaction batch list for a creation request.
pub fn build_create_batch(signer: &TransactionSigner, record: &Record) -> ClientResult<BatchList> {
    let payload = CreatePayload::to_wire_string(record).into_bytes();
    let address = StateAddress::derive_for_key(&record.key).as_str().to_string();
    let public_key = signer.public_key_hex();

    let header = TransactionHeader {
        signer_public_key: public_key.clone(),
        family_name: FAMILY_NAME.to_string(),
        family_version: FAMILY_VERSION.to_string(),
        inputs: vec![address.clone()],
        outputs: vec![address],
        dependencies: vec![],
        payload_sha512: sha512_hex(&payload),
        batcher_public_key: public_key.clone(),
        nonce: format!("{:#x}", rand::random::<u64>()),
    };

    let header_bytes =
        bincode::serialize(&header).map_err(|err| ClientError::Serialization(err.to_string()))?;
    let header_signature = signer.sign(&header_bytes);

    let transaction = Transaction {
        header: header_bytes,
        header_signature: header_signature.clone(),
        payload,
    };

    let batch_header = BatchHeader {
        signer_public_key: public_key,
        transaction_ids: vec![header_signature],
    };
    let batch_header_bytes = bincode::serialize(&batch_header)
        .map_err(|err| ClientError::Serialization(err.to_string()))?;
    let batch_signature = signer.sign(&batch_header_bytes);

    Ok(BatchList {
        batches: vec![Batch {
            header: batch_header_bytes,
            header_signature: batch_signature,
            transactions: vec![transaction],
        }],
    })
}
