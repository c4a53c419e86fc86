use serde::{Deserialize, Serialize};

/// An immutable message fact stored in ledger state.
///
/// A record is a subject–predicate–object triple exchanged between two
/// parties, uniquely identified by a caller-supplied `key`. Records are
/// written once and never updated or deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier chosen by the creator. Must not contain `|`.
    pub key: String,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    /// Identifier of the sending party.
    pub sender: String,
    /// Identifier of the receiving party.
    pub receiver: String,
}

impl Record {
    pub fn new(
        key: impl Into<String>,
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        sender: impl Into<String>,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            sender: sender.into(),
            receiver: receiver.into(),
        }
    }
}
