//! Theme preference controller.
//!
//! Owns the in-memory theme cell and keeps it in step with the durable copy
//! in a [`PreferenceStore`]. The cell only ever holds values that were either
//! loaded from the store or confirmed written to it, so readers never observe
//! a theme that failed to persist.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use slavgorod_bus::app::ThemeController;
//! use slavgorod_bus::storage::MemoryPreferenceStore;
//! use slavgorod_bus::ThemePreference;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = Arc::new(MemoryPreferenceStore::new());
//! let controller = ThemeController::load(store.clone()).await;
//! assert_eq!(controller.current_theme(), ThemePreference::System);
//!
//! assert!(controller.set_theme(ThemePreference::Dark).await);
//! assert_eq!(ThemeController::load(store).await.current_theme(), ThemePreference::Dark);
//! # });
//! ```

use crate::app::observable::{Observable, ObservableReader, Subscription};
use crate::domain::ThemePreference;
use crate::storage::{PreferenceStore, THEME_KEY};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Observable theme cell backed by a preference store.
pub struct ThemeController {
    store: Arc<dyn PreferenceStore>,
    current: Observable<ThemePreference>,
    /// Serializes write-then-publish so publish order equals write order.
    write_gate: Mutex<()>,
}

impl ThemeController {
    /// Seeds the cell from the store.
    ///
    /// A missing key, an unknown stored value or a failed read all resolve to
    /// [`ThemePreference::System`].
    pub async fn load(store: Arc<dyn PreferenceStore>) -> Self {
        let initial = match store.read(THEME_KEY).await {
            Ok(stored) => {
                let theme = ThemePreference::from_stored(stored.as_deref());
                match stored.as_deref() {
                    None => tracing::debug!("no stored theme, using system default"),
                    Some(value) if value != theme.name() => {
                        tracing::warn!(stored = %value, "stored theme is malformed, using system default");
                    }
                    Some(_) => {}
                }
                theme
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored theme, using system default");
                ThemePreference::System
            }
        };

        tracing::debug!(theme = %initial, "theme controller loaded");

        Self {
            store,
            current: Observable::new(initial),
            write_gate: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn current_theme(&self) -> ThemePreference {
        self.current.get()
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription<ThemePreference> {
        self.current.subscribe()
    }

    #[must_use]
    pub fn reader(&self) -> ObservableReader<ThemePreference> {
        self.current.reader()
    }

    /// Persists `theme` and, once the write is confirmed, publishes it.
    ///
    /// Returns `false` if the store rejected the write; the cell then keeps
    /// its previous value.
    pub async fn set_theme(&self, theme: ThemePreference) -> bool {
        let _gate = self.write_gate.lock().await;
        tracing::debug!(theme = %theme, "persisting theme");

        match self.store.write(THEME_KEY, theme.name()).await {
            Ok(()) => {
                self.current.publish(theme);
                tracing::debug!(theme = %theme, "theme updated");
                true
            }
            Err(e) => {
                tracing::warn!(theme = %theme, error = %e, "failed to persist theme, keeping previous value");
                false
            }
        }
    }

    /// Fire-and-forget variant of [`ThemeController::set_theme`].
    ///
    /// Concurrent writes are serialized; the cell publishes in the order the
    /// writes complete.
    pub fn spawn_set_theme(self: &Arc<Self>, theme: ThemePreference) -> JoinHandle<bool> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.set_theme(theme).await })
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPreferenceStore;

    #[tokio::test]
    async fn first_boot_defaults_to_system() {
        let controller = ThemeController::load(Arc::new(MemoryPreferenceStore::new())).await;
        assert_eq!(controller.current_theme(), ThemePreference::System);
    }

    #[tokio::test]
    async fn malformed_stored_value_fails_closed() {
        let store = Arc::new(MemoryPreferenceStore::with_value(THEME_KEY, "NEON"));
        let controller = ThemeController::load(store).await;
        assert_eq!(controller.current_theme(), ThemePreference::System);
    }

    #[tokio::test]
    async fn unreadable_store_fails_closed() {
        let store = Arc::new(MemoryPreferenceStore::with_value(THEME_KEY, "DARK"));
        store.set_available(false);
        let controller = ThemeController::load(store).await;
        assert_eq!(controller.current_theme(), ThemePreference::System);
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_value_and_publishes_nothing() {
        let store = Arc::new(MemoryPreferenceStore::with_value(THEME_KEY, "LIGHT"));
        let controller = ThemeController::load(store.clone()).await;
        let mut sub = controller.subscribe();

        store.set_available(false);
        assert!(!controller.set_theme(ThemePreference::Dark).await);

        assert_eq!(controller.current_theme(), ThemePreference::Light);
        assert_eq!(store.peek(THEME_KEY).as_deref(), Some("LIGHT"));
        assert_eq!(sub.drain(), vec![ThemePreference::Light]);
    }

    #[tokio::test]
    async fn early_subscriber_receives_confirmed_value() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let controller = ThemeController::load(store.clone()).await;
        let mut sub = controller.subscribe();

        assert!(controller.set_theme(ThemePreference::Dark).await);

        assert_eq!(sub.drain(), vec![ThemePreference::System, ThemePreference::Dark]);
        assert_eq!(store.peek(THEME_KEY).as_deref(), Some("DARK"));
    }

    #[tokio::test]
    async fn every_stored_name_loads_back() {
        for theme in ThemePreference::ALL {
            let store = Arc::new(MemoryPreferenceStore::with_value(THEME_KEY, theme.name()));
            assert_eq!(ThemeController::load(store).await.current_theme(), theme);
        }
    }

    #[tokio::test]
    async fn early_and_late_subscribers_share_the_confirmed_sequence() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let controller = ThemeController::load(store.clone()).await;
        let mut early = controller.subscribe();

        assert!(controller.set_theme(ThemePreference::Light).await);
        let mut late = controller.reader().subscribe();

        store.set_available(false);
        assert!(!controller.set_theme(ThemePreference::System).await);
        store.set_available(true);
        assert!(controller.set_theme(ThemePreference::Dark).await);

        assert_eq!(
            early.drain(),
            vec![ThemePreference::System, ThemePreference::Light, ThemePreference::Dark]
        );
        assert_eq!(late.drain(), vec![ThemePreference::Light, ThemePreference::Dark]);
    }

    #[tokio::test]
    async fn spawned_writes_apply_in_call_order() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let controller = Arc::new(ThemeController::load(store.clone()).await);
        let mut sub = controller.subscribe();

        let first = controller.spawn_set_theme(ThemePreference::Light);
        let second = controller.spawn_set_theme(ThemePreference::Dark);
        assert!(first.await.unwrap());
        assert!(second.await.unwrap());

        assert_eq!(
            sub.drain(),
            vec![ThemePreference::System, ThemePreference::Light, ThemePreference::Dark]
        );
        assert_eq!(controller.current_theme(), ThemePreference::Dark);
        assert_eq!(store.write_count(), 2);
    }
}
