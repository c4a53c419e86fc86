use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use gdm_types::{Record, StateAddress};

use crate::bucket::{decode_bucket, encode_bucket};
use crate::context::StateContext;
use crate::error::StateResult;

/// Bound on every round trip to the state context.
const STATE_TIMEOUT: Duration = Duration::from_secs(3);

/// Per-apply adapter between record keys and bucket-addressed state.
///
/// A `MessageStore` is constructed for a single apply invocation and
/// dropped when it returns. It caches the last-seen bytes per address so
/// that repeated reads within one apply cost one round trip, and so that
/// two keys hashing to the same address observe each other's writes
/// before anything reaches the validator. The cache must never outlive
/// the apply or be shared across transactions.
pub struct MessageStore<'a> {
    context: &'a mut dyn StateContext,
    addresser: fn(&str) -> StateAddress,
    // None records a confirmed-absent address, distinct from un-probed.
    address_cache: HashMap<StateAddress, Option<Vec<u8>>>,
}

impl<'a> MessageStore<'a> {
    pub fn new(context: &'a mut dyn StateContext) -> Self {
        Self::with_addresser(context, StateAddress::derive_for_key)
    }

    /// Construct with a custom key-to-address mapping.
    ///
    /// Exists so tests can force distinct keys into one bucket; production
    /// code always uses [`MessageStore::new`].
    pub fn with_addresser(
        context: &'a mut dyn StateContext,
        addresser: fn(&str) -> StateAddress,
    ) -> Self {
        Self {
            context,
            addresser,
            address_cache: HashMap::new(),
        }
    }

    /// The record stored under `key`, if any.
    pub fn get_message(&mut self, key: &str) -> StateResult<Option<Record>> {
        Ok(self.load_bucket(key)?.remove(key))
    }

    /// Insert a record into its bucket and write the bucket through.
    ///
    /// An existing record under the same key is overwritten in the bucket;
    /// the create-once rule is the engine's to enforce, not the store's.
    pub fn set_message(&mut self, record: Record) -> StateResult<()> {
        let mut bucket = self.load_bucket(&record.key)?;
        let address = (self.addresser)(&record.key);
        bucket.insert(record.key.clone(), record);

        let data = encode_bucket(&bucket);
        self.address_cache
            .insert(address.clone(), Some(data.clone()));
        self.context.set_state(&address, data, STATE_TIMEOUT)
    }

    /// The decoded bucket for `key`'s address, from cache when possible.
    fn load_bucket(&mut self, key: &str) -> StateResult<BTreeMap<String, Record>> {
        let address = (self.addresser)(key);

        let data = match self.address_cache.get(&address) {
            Some(cached) => cached.clone(),
            None => {
                let fetched = self.context.get_state(&address, STATE_TIMEOUT)?;
                self.address_cache.insert(address.clone(), fetched.clone());
                fetched
            }
        };

        match data {
            Some(bytes) => decode_bucket(&bytes, &address),
            None => Ok(BTreeMap::new()),
        }
    }
}
