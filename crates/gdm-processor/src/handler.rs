use gdm_state::{MessageStore, StateContext};
use gdm_types::{namespace_prefix, CreatePayload, FAMILY_NAME, FAMILY_VERSION};
use tracing::info;

use crate::error::{ApplyError, ApplyResult};

/// The operations this family supports.
///
/// A closed set with a single member today. Update and delete are
/// deliberate extension points, not omissions: adding them means adding
/// variants here and branches in [`MessageHandler::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Create,
}

/// The slice of an incoming transaction the handler reads: who signed it
/// and the raw payload bytes.
#[derive(Clone, Debug)]
pub struct TpRequest {
    pub signer_public_key: String,
    pub payload: Vec<u8>,
}

/// Transaction handler for the generic-discrete-message family.
///
/// Stateless across transactions; everything it knows lives in ledger
/// state behind the [`StateContext`] it is handed per apply.
#[derive(Clone, Copy, Debug, Default)]
pub struct MessageHandler;

impl MessageHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn family_name(&self) -> &'static str {
        FAMILY_NAME
    }

    pub fn family_versions(&self) -> Vec<&'static str> {
        vec![FAMILY_VERSION]
    }

    pub fn namespaces(&self) -> Vec<String> {
        vec![namespace_prefix()]
    }

    /// Execute one transaction against ledger state.
    ///
    /// The whole state machine: decode the payload, enforce create-once
    /// against the current bucket, commit the record. Decode failures and
    /// duplicate keys reject the transaction; corrupt state or a state
    /// timeout is an internal failure.
    pub fn apply(&self, request: &TpRequest, context: &mut dyn StateContext) -> ApplyResult<()> {
        let payload = CreatePayload::from_bytes(&request.payload)?;
        let record = payload.record;

        let mut store = MessageStore::new(context);

        // Every payload is a create today; other actions land in this match.
        let action = Action::Create;
        match action {
            Action::Create => {
                if store.get_message(&record.key)?.is_some() {
                    return Err(ApplyError::InvalidTransaction(format!(
                        "message already exists: {}",
                        record.key
                    )));
                }

                let key = record.key.clone();
                store.set_message(record)?;

                let signer = &request.signer_public_key;
                info!(
                    signer = %&signer[..6.min(signer.len())],
                    key = %key,
                    "message created"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdm_state::InMemoryStateContext;
    use gdm_types::StateAddress;

    const SIGNER: &str = "02aabbccddeeff00112233445566778899aabbccddeeff001122334455667788";

    fn request(payload: &[u8]) -> TpRequest {
        TpRequest {
            signer_public_key: SIGNER.to_string(),
            payload: payload.to_vec(),
        }
    }

    #[test]
    fn family_metadata() {
        let handler = MessageHandler::new();
        assert_eq!(handler.family_name(), "generic-discrete-message");
        assert_eq!(handler.family_versions(), vec!["1.0"]);
        assert_eq!(handler.namespaces(), vec![namespace_prefix()]);
    }

    #[test]
    fn create_commits_record() {
        let handler = MessageHandler::new();
        let mut ctx = InMemoryStateContext::new();
        handler
            .apply(&request(b"m1,ship,contains,crates,alice,bob"), &mut ctx)
            .unwrap();

        let address = StateAddress::derive_for_key("m1");
        let stored = ctx.raw(&address).unwrap();
        assert_eq!(stored, b"m1,ship,contains,crates,alice,bob");
    }

    #[test]
    fn duplicate_key_rejected() {
        let handler = MessageHandler::new();
        let mut ctx = InMemoryStateContext::new();
        handler
            .apply(&request(b"m1,ship,contains,crates,alice,bob"), &mut ctx)
            .unwrap();

        let err = handler
            .apply(&request(b"m1,other,says,thing,carol,dave"), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));

        // The first record survives untouched.
        let address = StateAddress::derive_for_key("m1");
        let stored = ctx.raw(&address).unwrap();
        assert_eq!(stored, b"m1,ship,contains,crates,alice,bob");
    }

    #[test]
    fn malformed_payload_rejected() {
        let handler = MessageHandler::new();
        let mut ctx = InMemoryStateContext::new();
        let err = handler
            .apply(&request(b"m1,only,five,fields,here"), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));
        assert_eq!(ctx.set_count, 0);
    }

    #[test]
    fn empty_field_rejected() {
        let handler = MessageHandler::new();
        let mut ctx = InMemoryStateContext::new();
        let err = handler
            .apply(&request(b"m1,,contains,crates,alice,bob"), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));
    }

    #[test]
    fn pipe_in_key_rejected() {
        let handler = MessageHandler::new();
        let mut ctx = InMemoryStateContext::new();
        let err = handler
            .apply(&request(b"m|1,ship,contains,crates,alice,bob"), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, ApplyError::InvalidTransaction(_)));
    }

    #[test]
    fn corrupt_state_is_internal() {
        let handler = MessageHandler::new();
        let mut ctx = InMemoryStateContext::new();
        ctx.seed(StateAddress::derive_for_key("m1"), b"bad,bucket".to_vec());
        let err = handler
            .apply(&request(b"m1,ship,contains,crates,alice,bob"), &mut ctx)
            .unwrap_err();
        assert!(matches!(err, ApplyError::Internal(_)));
    }

    #[test]
    fn distinct_keys_commit_independently() {
        let handler = MessageHandler::new();
        let mut ctx = InMemoryStateContext::new();
        handler
            .apply(&request(b"m1,ship,contains,crates,alice,bob"), &mut ctx)
            .unwrap();
        handler
            .apply(&request(b"m2,truck,carries,barrels,carol,dave"), &mut ctx)
            .unwrap();

        assert!(ctx.raw(&StateAddress::derive_for_key("m1")).is_some());
        assert!(ctx.raw(&StateAddress::derive_for_key("m2")).is_some());
    }
}
