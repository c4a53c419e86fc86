use std::collections::HashMap;
use std::time::Duration;

use gdm_types::StateAddress;

use crate::error::StateResult;

/// Boundary to validator-held ledger state.
///
/// Implementations must satisfy these invariants:
/// - `get_state` returns `Ok(None)` for an address that has never been
///   written; absent and empty are distinct outcomes.
/// - `set_state` replaces the full byte value at the address.
/// - Requests that exceed `timeout` fail with `StoreTimeout` rather than
///   blocking the apply indefinitely.
/// - The validator serializes applies touching a given address; the
///   context performs no locking of its own.
pub trait StateContext {
    /// Read the raw bytes last written at an address.
    fn get_state(&mut self, address: &StateAddress, timeout: Duration)
        -> StateResult<Option<Vec<u8>>>;

    /// Write raw bytes at an address.
    fn set_state(
        &mut self,
        address: &StateAddress,
        data: Vec<u8>,
        timeout: Duration,
    ) -> StateResult<()>;
}

/// In-process state backend for tests and local execution.
///
/// Counts round trips so tests can assert the per-apply cache is doing
/// its job.
#[derive(Debug, Default)]
pub struct InMemoryStateContext {
    entries: HashMap<StateAddress, Vec<u8>>,
    pub get_count: usize,
    pub set_count: usize,
}

impl InMemoryStateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read of stored bytes, bypassing the round-trip counter.
    pub fn raw(&self, address: &StateAddress) -> Option<&[u8]> {
        self.entries.get(address).map(Vec::as_slice)
    }

    /// Seed an address with bytes, bypassing the round-trip counter.
    pub fn seed(&mut self, address: StateAddress, data: Vec<u8>) {
        self.entries.insert(address, data);
    }
}

impl StateContext for InMemoryStateContext {
    fn get_state(
        &mut self,
        address: &StateAddress,
        _timeout: Duration,
    ) -> StateResult<Option<Vec<u8>>> {
        self.get_count += 1;
        Ok(self.entries.get(address).cloned())
    }

    fn set_state(
        &mut self,
        address: &StateAddress,
        data: Vec<u8>,
        _timeout: Duration,
    ) -> StateResult<()> {
        self.set_count += 1;
        self.entries.insert(address.clone(), data);
        Ok(())
    }
}
