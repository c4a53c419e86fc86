//! Canonical encoding of the records sharing one state address.
//!
//! A bucket is stored as the `|`-joined list of six-field `,`-joined
//! record strings, sorted ascending by the full joined member string (not
//! by key). The sort makes the encoding canonical: re-encoding unchanged
//! content is byte-identical, so equality checks on stored bytes are
//! meaningful.

use std::collections::BTreeMap;

use gdm_types::{CreatePayload, Record, StateAddress, BUCKET_DELIMITER, FIELD_DELIMITER};

use crate::error::{StateError, StateResult};

/// Serialize a bucket into its canonical stored byte form.
pub fn encode_bucket(records: &BTreeMap<String, Record>) -> Vec<u8> {
    let mut members: Vec<String> = records
        .values()
        .map(CreatePayload::to_wire_string)
        .collect();
    members.sort();
    members.join(&BUCKET_DELIMITER.to_string()).into_bytes()
}

/// Deserialize stored bucket bytes into a key-to-record map.
///
/// Zero-length input decodes to an empty map. Any member that does not
/// split into exactly six fields makes the whole bucket `CorruptState`.
pub fn decode_bucket(data: &[u8], address: &StateAddress) -> StateResult<BTreeMap<String, Record>> {
    if data.is_empty() {
        return Ok(BTreeMap::new());
    }

    let text = std::str::from_utf8(data).map_err(|_| StateError::CorruptState {
        address: address.clone(),
        reason: "stored bytes are not valid UTF-8".into(),
    })?;

    let mut records = BTreeMap::new();
    for member in text.split(BUCKET_DELIMITER) {
        let fields: Vec<&str> = member.split(FIELD_DELIMITER).collect();
        if fields.len() != 6 {
            return Err(StateError::CorruptState {
                address: address.clone(),
                reason: format!("member has {} fields, expected 6", fields.len()),
            });
        }
        let record = Record::new(
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
        );
        records.insert(record.key.clone(), record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> StateAddress {
        StateAddress::derive_for_key("test")
    }

    fn record(key: &str) -> Record {
        Record::new(key, "subject", "predicate", "object", "alice", "bob")
    }

    #[test]
    fn empty_bytes_decode_to_empty_map() {
        let records = decode_bucket(b"", &addr()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn encode_empty_map() {
        let encoded = encode_bucket(&BTreeMap::new());
        assert!(encoded.is_empty());
    }

    #[test]
    fn single_record_roundtrip() {
        let mut bucket = BTreeMap::new();
        bucket.insert("m1".to_string(), record("m1"));
        let encoded = encode_bucket(&bucket);
        assert_eq!(encoded, b"m1,subject,predicate,object,alice,bob");
        let decoded = decode_bucket(&encoded, &addr()).unwrap();
        assert_eq!(decoded, bucket);
    }

    #[test]
    fn multi_record_roundtrip() {
        let mut bucket = BTreeMap::new();
        for key in ["m3", "m1", "m2"] {
            bucket.insert(key.to_string(), record(key));
        }
        let decoded = decode_bucket(&encode_bucket(&bucket), &addr()).unwrap();
        assert_eq!(decoded, bucket);
    }

    #[test]
    fn encoding_is_canonical() {
        let mut bucket = BTreeMap::new();
        bucket.insert("b".to_string(), record("b"));
        bucket.insert("a".to_string(), record("a"));
        assert_eq!(encode_bucket(&bucket), encode_bucket(&bucket));
    }

    #[test]
    fn members_sorted_by_full_joined_string() {
        // Keys "m" and "m!" disagree between key order and member order:
        // "m" < "m!" as keys, but "m!,..." < "m,..." as joined strings
        // ('!' = 0x21 < ',' = 0x2c).
        let mut bucket = BTreeMap::new();
        bucket.insert("m".to_string(), record("m"));
        bucket.insert("m!".to_string(), record("m!"));
        let encoded = String::from_utf8(encode_bucket(&bucket)).unwrap();
        assert!(encoded.starts_with("m!,subject"));
    }

    #[test]
    fn corrupt_member_rejected() {
        let err = decode_bucket(b"m1,only,four,fields", &addr()).unwrap_err();
        assert!(matches!(err, StateError::CorruptState { .. }));
    }

    #[test]
    fn corrupt_second_member_rejected() {
        let data = b"m1,s,p,o,a,b|m2,too,few";
        let err = decode_bucket(data, &addr()).unwrap_err();
        assert!(matches!(err, StateError::CorruptState { .. }));
    }
}
