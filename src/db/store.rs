//! Minimal key/value store interface and an in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::db::StoreError;

/// Opaque key/value persistence for client-side game state.
///
/// Values are JSON documents; the store does not interpret them.
pub trait RecordStore {
    /// Reads the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage fails.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `payload` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage fails.
    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError>;

    /// Stores every `(key, payload)` pair as one unit: either all are
    /// written or none are.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage fails; nothing is
    /// written in that case.
    fn write_all(&self, records: &[(&str, &str)]) -> Result<(), StoreError>;

    /// Removes the value stored under `key`. Clearing a missing key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage fails.
    fn clear(&self, key: &str) -> Result<(), StoreError>;
}

/// Store kept in process memory. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::new("Memory store lock poisoned"))
    }
}

impl RecordStore for MemoryStore {
    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self.lock()?.get(key).cloned();
        debug!(found = value.is_some(), "Memory read");
        Ok(value)
    }

    #[instrument(skip(self, payload))]
    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), payload.to_string());
        debug!(bytes = payload.len(), "Memory write");
        Ok(())
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    fn write_all(&self, records: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut map = self.lock()?;
        for (key, payload) in records {
            map.insert(key.to_string(), payload.to_string());
        }
        debug!("Memory batch write");
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
