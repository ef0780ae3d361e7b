//! In-memory preference store.
//!
//! Nothing survives the process, but the store honors the full
//! [`PreferenceStore`] contract, including the closed state. It can be switched
//! unavailable to exercise persistence-failure paths.

use crate::domain::error::{BusError, Result};
use crate::storage::backend::PreferenceStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory [`PreferenceStore`].
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
    unavailable: AtomicBool,
    closed: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::default();
        store.values.lock().insert(key.into(), value.into());
        store
    }

    /// Makes every following read and write fail (`false`) or succeed (`true`).
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current stored value, bypassing availability checks.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    fn check(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(BusError::Storage("preference store is closed".to_string()));
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(BusError::Storage("preference store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.values.lock().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.check()?;
        self.values.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
