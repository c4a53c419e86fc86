use thiserror::Error;

use crate::record::Record;

/// Separates the six fields of one record on the wire and in state.
pub const FIELD_DELIMITER: char = ',';

/// Separates records sharing one state address. Reserved: keys must not
/// contain it, or the stored bucket encoding would be ambiguous.
pub const BUCKET_DELIMITER: char = '|';

/// Errors from parsing a creation payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload did not split into exactly six fields.
    #[error("malformed payload: expected 6 fields, got {0}")]
    MalformedPayload(usize),

    /// A required field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The key contains the reserved bucket delimiter.
    #[error("key cannot contain {BUCKET_DELIMITER:?}")]
    IllegalCharacter,

    /// The payload bytes were not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,
}

/// The parsed form of an incoming creation request.
///
/// The wire encoding is a comma-joined UTF-8 string of exactly six fields
/// in fixed order: key, subject, predicate, object, sender, receiver.
/// No trimming or case folding is applied on either side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatePayload {
    pub record: Record,
}

impl CreatePayload {
    /// Parse and validate payload bytes.
    pub fn from_bytes(payload: &[u8]) -> Result<Self, PayloadError> {
        let text = std::str::from_utf8(payload).map_err(|_| PayloadError::InvalidUtf8)?;

        let fields: Vec<&str> = text.split(FIELD_DELIMITER).collect();
        if fields.len() != 6 {
            return Err(PayloadError::MalformedPayload(fields.len()));
        }

        let names = ["key", "subject", "predicate", "object", "sender", "receiver"];
        for (value, name) in fields.iter().zip(names) {
            if value.is_empty() {
                return Err(PayloadError::MissingField(name));
            }
        }

        if fields[0].contains(BUCKET_DELIMITER) {
            return Err(PayloadError::IllegalCharacter);
        }

        Ok(Self {
            record: Record::new(
                fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
            ),
        })
    }

    /// Encode a record back into the six-field wire string.
    ///
    /// This is the exact byte sequence a client submits as the transaction
    /// payload and the exact per-record member string used in bucket
    /// storage.
    pub fn to_wire_string(record: &Record) -> String {
        [
            record.key.as_str(),
            record.subject.as_str(),
            record.predicate.as_str(),
            record.object.as_str(),
            record.sender.as_str(),
            record.receiver.as_str(),
        ]
        .join(&FIELD_DELIMITER.to_string())
    }
}
