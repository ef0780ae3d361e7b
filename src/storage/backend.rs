//! Preference store abstraction.
//!
//! This module defines the [`PreferenceStore`] trait that abstracts over
//! durable key-value backends. The state layer only ever touches one key
//! ([`THEME_KEY`]), but the trait stays string-keyed so backends can be
//! substituted (a JSON file in production, memory in tests) without changing
//! the theme controller.
//!
//! # Lifecycle
//!
//! A store is opened at process start, shared behind an `Arc`, and closed at
//! shutdown with [`PreferenceStore::close`]. Operations on a closed store fail
//! with [`BusError::Storage`](crate::domain::BusError::Storage).

use crate::domain::error::Result;
use async_trait::async_trait;

/// Key under which the theme preference is stored.
pub const THEME_KEY: &str = "app_theme";

/// Durable, async string key-value store.
///
/// # Implementations
///
/// - [`JsonPreferenceStore`](crate::storage::JsonPreferenceStore): JSON file with atomic writes
/// - [`MemoryPreferenceStore`](crate::storage::MemoryPreferenceStore): in-memory, for tests and ephemeral runs
///
/// # Examples
///
/// ```
/// use slavgorod_bus::storage::{MemoryPreferenceStore, PreferenceStore, THEME_KEY};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MemoryPreferenceStore::new();
/// store.write(THEME_KEY, "DARK").await?;
/// assert_eq!(store.read(THEME_KEY).await?.as_deref(), Some("DARK"));
/// # Ok::<(), slavgorod_bus::BusError>(())
/// # }).unwrap();
/// ```
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable or closed.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Durably writes `value` under `key`.
    ///
    /// On error the previously stored value remains in effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unavailable, closed, or the write
    /// could not be made durable.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Flushes and closes the store. Later reads and writes fail.
    ///
    /// # Errors
    ///
    /// Returns an error if pending data could not be flushed.
    async fn close(&self) -> Result<()>;
}
