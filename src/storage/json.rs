//! JSON file-based preference store.
//!
//! Keeps the whole document in memory and rewrites the file on every write,
//! using an atomic write (write-to-temp + rename) so a crash never leaves a
//! half-written preference file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(log n) lookup in the in-memory document, no I/O
//! - **Write**: O(n) serialize + one temp write + one rename
//! - **Best for**: a handful of keys, infrequent writes

use crate::domain::error::{BusError, Result};
use crate::storage::backend::PreferenceStore;
use crate::storage::models::PreferenceDocument;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Mutable part of the store, guarded by one async lock so that a write's
/// document update and its file rename are never interleaved with another write.
#[derive(Debug)]
struct StoreState {
    document: PreferenceDocument,
    closed: bool,
}

/// JSON file preference store.
///
/// # Thread Safety
///
/// `Send + Sync`; share it behind an `Arc`. Writes are serialized internally.
///
/// # Examples
///
/// ```no_run
/// use slavgorod_bus::storage::{JsonPreferenceStore, PreferenceStore, THEME_KEY};
///
/// # async fn run() -> slavgorod_bus::Result<()> {
/// let store = JsonPreferenceStore::open("/tmp/slavgorod-bus/theme_preferences.json").await?;
/// store.write(THEME_KEY, "LIGHT").await?;
/// store.close().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JsonPreferenceStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    state: Mutex<StoreState>,
}

impl JsonPreferenceStore {
    /// Opens or creates a JSON preference store.
    ///
    /// If the file exists, loads it. Otherwise starts from an empty document;
    /// the file is created on the first write. Parent directories are created
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but cannot be read
    /// - File exists but contains invalid JSON
    pub async fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening JSON preference store");

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let document = if tokio::fs::try_exists(&file_path).await? {
            Self::load_from_file(&file_path).await?
        } else {
            tracing::debug!("initializing empty preference document");
            PreferenceDocument::default()
        };

        tracing::debug!(value_count = document.values.len(), "preference store opened");

        Ok(Self {
            file_path,
            state: Mutex::new(StoreState {
                document,
                closed: false,
            }),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn load_from_file(path: &Path) -> Result<PreferenceDocument> {
        let contents = tokio::fs::read_to_string(path).await?;
        let document: PreferenceDocument = serde_json::from_str(&contents)
            .map_err(|e| BusError::Storage(format!("failed to parse preferences: {e}")))?;

        tracing::debug!(
            version = document.version,
            values = document.values.len(),
            "loaded preference document"
        );

        Ok(document)
    }

    async fn save_to_file(&self, document: &PreferenceDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| BusError::Storage(format!("failed to serialize preferences: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        tokio::fs::write(&tmp_path, json).await?;

        tracing::trace!("renaming temporary file to final location");
        tokio::fs::rename(&tmp_path, &self.file_path).await?;

        Ok(())
    }

    fn ensure_open(state: &StoreState) -> Result<()> {
        if state.closed {
            Err(BusError::Storage("preference store is closed".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let state = self.state.lock().await;
        Self::ensure_open(&state)?;
        let value = state.document.values.get(key).cloned();
        tracing::debug!(key = %key, found = value.is_some(), "preference read");
        Ok(value)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!(key = %key, path = ?self.file_path, "writing preference");

        let mut state = self.state.lock().await;
        Self::ensure_open(&state)?;

        let mut next = state.document.clone();
        next.values.insert(key.to_string(), value.to_string());

        // The in-memory document only advances once the file is durable.
        self.save_to_file(&next).await?;
        state.document = next;

        tracing::debug!("preference saved");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if !state.closed {
            state.closed = true;
            tracing::debug!(path = ?self.file_path, "preference store closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::THEME_KEY;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::open(dir.path().join("prefs.json")).await.unwrap();
        assert_eq!(store.read(THEME_KEY).await.unwrap(), None);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let store = JsonPreferenceStore::open(&path).await.unwrap();
        store.write(THEME_KEY, "DARK").await.unwrap();
        store.close().await.unwrap();

        let reopened = JsonPreferenceStore::open(&path).await.unwrap();
        assert_eq!(reopened.read(THEME_KEY).await.unwrap().as_deref(), Some("DARK"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonPreferenceStore::open(&path).await.unwrap_err();
        assert!(matches!(err, BusError::Storage(_)));
    }

    #[tokio::test]
    async fn closed_store_rejects_operations() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPreferenceStore::open(dir.path().join("prefs.json")).await.unwrap();
        store.close().await.unwrap();

        assert!(store.read(THEME_KEY).await.is_err());
        assert!(store.write(THEME_KEY, "LIGHT").await.is_err());
    }
}
