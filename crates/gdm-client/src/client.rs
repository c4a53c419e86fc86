use std::time::Instant;

use gdm_state::decode_bucket;
use gdm_types::{namespace_prefix, Record, StateAddress};
use tracing::debug;

use crate::envelope::build_create_batch;
use crate::error::{ClientError, ClientResult};
use crate::rest::{BatchStatus, RestGateway};
use crate::signer::TransactionSigner;

/// High-level client for the GDM family.
///
/// Wraps a [`RestGateway`] and, for write operations, a signing key.
/// Read operations (`show`, `list`) work without one.
pub struct MessageClient<G> {
    gateway: G,
    signer: Option<TransactionSigner>,
}

impl<G: RestGateway> MessageClient<G> {
    pub fn new(gateway: G, signer: TransactionSigner) -> Self {
        Self {
            gateway,
            signer: Some(signer),
        }
    }

    /// A client that can only read state.
    pub fn read_only(gateway: G) -> Self {
        Self {
            gateway,
            signer: None,
        }
    }

    /// Submit a creation transaction for a new record.
    ///
    /// If `wait` is positive, polls the batch status until it leaves
    /// `PENDING` or `wait` seconds of wall-clock time elapse. The original
    /// submission response is returned either way; a caller that needs to
    /// know the final status re-checks it separately.
    pub fn create(&self, record: &Record, wait: Option<u64>) -> ClientResult<String> {
        let signer = self.signer.as_ref().ok_or(ClientError::NoSigningKey)?;

        let batch_list = build_create_batch(signer, record)?;
        let batch_id = batch_list.batch_id().to_string();
        let response = self.gateway.submit_batches(batch_list.to_bytes()?)?;

        if let Some(wait) = wait.filter(|&w| w > 0) {
            let start = Instant::now();
            loop {
                let elapsed = start.elapsed().as_secs();
                if elapsed >= wait {
                    debug!(batch_id = %batch_id, "wait budget exhausted, batch still pending");
                    break;
                }
                let status = self.gateway.batch_status(&batch_id, wait - elapsed)?;
                if status != BatchStatus::Pending {
                    debug!(batch_id = %batch_id, ?status, "batch resolved");
                    break;
                }
            }
        }

        Ok(response)
    }

    /// The record stored under `key`, or `None` if not found.
    ///
    /// Absent address, missing key, and undecodable bucket bytes all
    /// collapse to `None` here; the read path deliberately does not
    /// distinguish "never written" from "corrupt".
    pub fn show(&self, key: &str) -> ClientResult<Option<Record>> {
        let address = StateAddress::derive_for_key(key);
        let data = match self.gateway.state_entry(&address)? {
            Some(data) => data,
            None => return Ok(None),
        };
        match decode_bucket(&data, &address) {
            Ok(mut bucket) => Ok(bucket.remove(key)),
            Err(_) => Ok(None),
        }
    }

    /// Every record stored under the family namespace.
    pub fn list(&self) -> ClientResult<Vec<Record>> {
        let entries = self.gateway.state_list(&namespace_prefix())?;
        let mut records = Vec::new();
        for (address, data) in entries {
            let address = StateAddress::from_raw(address);
            let bucket = decode_bucket(&data, &address)
                .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
            records.extend(bucket.into_values());
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    use gdm_state::encode_bucket;

    fn record(key: &str) -> Record {
        Record::new(key, "ship", "contains", "crates", "alice", "bob")
    }

    /// Scripted gateway: canned state plus a queue of batch statuses.
    #[derive(Default)]
    struct StubGateway {
        state: HashMap<String, Vec<u8>>,
        statuses: RefCell<Vec<BatchStatus>>,
        submissions: RefCell<Vec<Vec<u8>>>,
        status_calls: RefCell<Vec<u64>>,
    }

    impl StubGateway {
        fn with_statuses(statuses: Vec<BatchStatus>) -> Self {
            Self {
                statuses: RefCell::new(statuses),
                ..Self::default()
            }
        }

        fn seed_bucket(&mut self, seed_key: &str, records: &[Record]) {
            let address = StateAddress::derive_for_key(seed_key);
            let bucket = records
                .iter()
                .map(|r| (r.key.clone(), r.clone()))
                .collect();
            self.state
                .insert(address.as_str().to_string(), encode_bucket(&bucket));
        }
    }

    impl RestGateway for StubGateway {
        fn submit_batches(&self, batch_bytes: Vec<u8>) -> ClientResult<String> {
            self.submissions.borrow_mut().push(batch_bytes);
            Ok("{\"link\": \"http://ledger/batch_statuses?id=abc\"}".to_string())
        }

        fn batch_status(&self, _batch_id: &str, wait: u64) -> ClientResult<BatchStatus> {
            self.status_calls.borrow_mut().push(wait);
            let mut statuses = self.statuses.borrow_mut();
            if statuses.is_empty() {
                Ok(BatchStatus::Committed)
            } else {
                Ok(statuses.remove(0))
            }
        }

        fn state_entry(&self, address: &StateAddress) -> ClientResult<Option<Vec<u8>>> {
            Ok(self.state.get(address.as_str()).cloned())
        }

        fn state_list(&self, prefix: &str) -> ClientResult<Vec<(String, Vec<u8>)>> {
            Ok(self
                .state
                .iter()
                .filter(|(addr, _)| addr.starts_with(prefix))
                .map(|(addr, data)| (addr.clone(), data.clone()))
                .collect())
        }
    }

    #[test]
    fn create_without_wait_submits_once() {
        let gateway = StubGateway::default();
        let client = MessageClient::new(gateway, TransactionSigner::generate());
        let response = client.create(&record("m1"), None).unwrap();
        assert!(response.contains("link"));
        assert_eq!(client.gateway.submissions.borrow().len(), 1);
        assert!(client.gateway.status_calls.borrow().is_empty());
    }

    #[test]
    fn create_with_zero_wait_does_not_poll() {
        let gateway = StubGateway::default();
        let client = MessageClient::new(gateway, TransactionSigner::generate());
        client.create(&record("m1"), Some(0)).unwrap();
        assert!(client.gateway.status_calls.borrow().is_empty());
    }

    #[test]
    fn create_polls_until_resolved() {
        let gateway = StubGateway::with_statuses(vec![
            BatchStatus::Pending,
            BatchStatus::Pending,
            BatchStatus::Committed,
        ]);
        let client = MessageClient::new(gateway, TransactionSigner::generate());
        let response = client.create(&record("m1"), Some(5)).unwrap();

        // Polling stops at the first non-pending status, and the response
        // is the submission response, untouched by the polling outcome.
        assert!(response.contains("link"));
        assert_eq!(client.gateway.status_calls.borrow().len(), 3);
    }

    #[test]
    fn create_stops_polling_on_invalid() {
        let gateway =
            StubGateway::with_statuses(vec![BatchStatus::Pending, BatchStatus::Invalid]);
        let client = MessageClient::new(gateway, TransactionSigner::generate());
        client.create(&record("m1"), Some(5)).unwrap();
        assert_eq!(client.gateway.status_calls.borrow().len(), 2);
    }

    #[test]
    fn poll_passes_remaining_budget() {
        let gateway = StubGateway::with_statuses(vec![BatchStatus::Committed]);
        let client = MessageClient::new(gateway, TransactionSigner::generate());
        client.create(&record("m1"), Some(5)).unwrap();
        let calls = client.gateway.status_calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0] <= 5);
        assert!(calls[0] > 0);
    }

    #[test]
    fn create_requires_signer() {
        let client = MessageClient::read_only(StubGateway::default());
        let err = client.create(&record("m1"), None).unwrap_err();
        assert!(matches!(err, ClientError::NoSigningKey));
    }

    #[test]
    fn show_absent_key_is_none() {
        let client = MessageClient::read_only(StubGateway::default());
        assert!(client.show("never-written").unwrap().is_none());
    }

    #[test]
    fn show_finds_stored_record() {
        let mut gateway = StubGateway::default();
        gateway.seed_bucket("m1", &[record("m1")]);
        let client = MessageClient::read_only(gateway);
        assert_eq!(client.show("m1").unwrap(), Some(record("m1")));
    }

    #[test]
    fn show_missing_key_in_existing_bucket_is_none() {
        let mut gateway = StubGateway::default();
        // Contrived collision: a bucket at m1's address holding only m2.
        gateway.seed_bucket("m1", &[record("m2")]);
        let client = MessageClient::read_only(gateway);
        assert!(client.show("m1").unwrap().is_none());
    }

    #[test]
    fn show_collapses_corrupt_bucket_to_none() {
        let mut gateway = StubGateway::default();
        let address = StateAddress::derive_for_key("m1");
        gateway
            .state
            .insert(address.as_str().to_string(), b"garbage,bytes".to_vec());
        let client = MessageClient::read_only(gateway);
        assert!(client.show("m1").unwrap().is_none());
    }

    #[test]
    fn show_retrieves_both_colliding_records() {
        let mut gateway = StubGateway::default();
        // Both records stored in one bucket at m1's address; show("m1")
        // still resolves its own key out of the shared mapping.
        gateway.seed_bucket("m1", &[record("m1"), record("m2-collider")]);
        let client = MessageClient::read_only(gateway);
        assert_eq!(client.show("m1").unwrap(), Some(record("m1")));
    }

    #[test]
    fn list_returns_all_records() {
        let mut gateway = StubGateway::default();
        gateway.seed_bucket("m1", &[record("m1")]);
        gateway.seed_bucket("m2", &[record("m2")]);
        let client = MessageClient::read_only(gateway);
        let mut keys: Vec<String> = client
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.key)
            .collect();
        keys.sort();
        assert_eq!(keys, vec!["m1", "m2"]);
    }

    #[test]
    fn list_on_empty_namespace() {
        let client = MessageClient::read_only(StubGateway::default());
        assert!(client.list().unwrap().is_empty());
    }
}
