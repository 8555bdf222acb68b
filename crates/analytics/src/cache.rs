//! SensorCache - weak-reference cache keyed by device id
//!
//! The cache never keeps a value alive. Entries stop resolving as soon as the
//! last strong owner drops, and `force_cleanup` purges them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use contracts::ContractError;
use tracing::debug;

use crate::Result;

/// Weak-reference cache
pub struct SensorCache<T: ?Sized> {
    entries: Mutex<HashMap<String, Weak<T>>>,
}

impl<T: ?Sized> SensorCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Remember `value` under `device_id` without taking ownership
    ///
    /// # Errors
    /// `InvalidArgument` if `device_id` is empty.
    pub fn add(&self, device_id: &str, value: &Arc<T>) -> Result<()> {
        if device_id.is_empty() {
            return Err(ContractError::invalid_argument(
                "device_id",
                "must be a non-empty string",
            ));
        }
        self.lock()
            .insert(device_id.to_string(), Arc::downgrade(value));
        Ok(())
    }

    /// Strong handle if the value is still alive
    pub fn get(&self, device_id: &str) -> Option<Arc<T>> {
        self.lock().get(device_id).and_then(Weak::upgrade)
    }

    /// Number of live entries
    pub fn size(&self) -> usize {
        self.lock().values().filter(|w| w.strong_count() > 0).count()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Drop entries whose value is gone; returns how many were removed
    pub fn force_cleanup(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, w| w.strong_count() > 0);
        let removed = before - entries.len();
        debug!(removed, remaining = entries.len(), "cache cleanup");
        removed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Weak<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: ?Sized> Default for SensorCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
