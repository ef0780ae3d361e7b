//! State layer of the Slavgorod bus timetable app.
//!
//! The crate holds everything behind the screens: the route catalog, the
//! search filter over it, pinned departure times, and the persisted theme
//! preference, all exposed as observable cells screens subscribe to.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Screens (outside this crate)                       │
//! └─────────────────────────────────────────────────────┘
//!            │ Intent                 ▲ snapshots
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - AppStateStore: routes, query, favorite times     │
//! │  - ThemeController: persisted theme                 │
//! │  - Observable cells                                 │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Storage       │   │ Worker        │
//! │ (catalog/)    │   │ (storage/)    │   │ (worker/)     │
//! │ - Seed routes │   │ - JSON prefs  │   │ - Notify queue│
//! │ - Schedules   │   │ - In-memory   │   │ - Delivery    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Route, schedule, theme types (domain/)           │
//! │  - Errors (domain/error)                            │
//! │  - Data directory paths (infrastructure/)           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a local JSON file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! data_dir = "~/.local/share/slavgorod-bus"
//! preferences_file = "preferences.json"
//! catalog_file = "~/routes.toml"
//! trace_level = "debug"
//! system_dark_mode = true
//! ```
//!
//! # Example
//!
//! ```rust
//! use slavgorod_bus::{handle_intent, App, Config, Intent, IntentOutcome, ThemePreference};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let dir = tempfile::tempdir().unwrap();
//! let config = Config { data_dir: dir.path().to_path_buf(), ..Default::default() };
//!
//! let mut app = App::start(config).await?;
//! handle_intent(&mut app, Intent::QueryChanged("яровое".to_string())).await;
//! assert_eq!(app.state().ui_state().routes.len(), 1);
//!
//! let outcome = handle_intent(&mut app, Intent::SelectTheme(ThemePreference::Dark)).await;
//! assert_eq!(outcome, IntentOutcome::ThemeApplied(ThemePreference::Dark));
//!
//! app.shutdown().await?;
//! # Ok::<(), slavgorod_bus::BusError>(())
//! # }).unwrap();
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod observability;

pub use app::{
    handle_intent, AppStateStore, Intent, IntentOutcome, ThemeController, ToggleOutcome,
    UiSnapshot,
};
pub use domain::{
    BusError, ColorScheme, FavoriteTime, Result, Route, ScheduleEntry, ThemePreference,
};

use catalog::{RouteCatalog, StaticScheduleTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storage::{JsonPreferenceStore, PreferenceStore};
use tokio::task::JoinHandle;
use worker::{NotificationSink, NotificationWorker, QueuedDispatcher, TracingSink, WorkerReport};

const DEFAULT_PREFERENCES_FILE: &str = "preferences.json";

/// Runtime configuration.
///
/// Every field has a default, so an empty map or an empty TOML document is a
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the preference file and trace output.
    ///
    /// Default: `~/.local/share/slavgorod-bus`
    pub data_dir: PathBuf,

    /// Preference file name, relative to `data_dir`. Default: `preferences.json`
    pub preferences_file: String,

    /// Optional TOML route catalog replacing the built-in one.
    pub catalog_file: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `slavgorod_bus=trace`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Whether the platform is in dark mode; resolves the `SYSTEM` theme.
    pub system_dark_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::default_data_dir(),
            preferences_file: DEFAULT_PREFERENCES_FILE.to_string(),
            catalog_file: None,
            trace_level: None,
            system_dark_mode: false,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs, as handed over by
    /// a host shell.
    ///
    /// Unknown keys are ignored and unparsable values fall back to defaults.
    /// `data_dir` and `catalog_file` expand a leading `~`.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use slavgorod_bus::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "/var/lib/bus".to_string());
    /// map.insert("system_dark_mode".to_string(), "true".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.preferences_path(), std::path::Path::new("/var/lib/bus/preferences.json"));
    /// assert!(config.system_dark_mode);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let non_empty = |key: &str| {
            map.get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
        };

        Self {
            data_dir: non_empty("data_dir").map_or(defaults.data_dir, infrastructure::expand_tilde),
            preferences_file: non_empty("preferences_file")
                .map_or(defaults.preferences_file, String::from),
            catalog_file: non_empty("catalog_file").map(infrastructure::expand_tilde),
            trace_level: non_empty("trace_level").map(String::from),
            system_dark_mode: non_empty("system_dark_mode")
                .and_then(|value| value.parse::<bool>().ok())
                .unwrap_or(defaults.system_dark_mode),
        }
    }

    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Config`] if the document is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| BusError::Config(format!("invalid config: {e}")))?;
        Ok(config.with_expanded_paths())
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Io`] if the file cannot be read, or
    /// [`BusError::Config`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    #[must_use]
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(&self.preferences_file)
    }

    fn with_expanded_paths(mut self) -> Self {
        self.data_dir = infrastructure::expand_tilde(&self.data_dir.to_string_lossy());
        self.catalog_file = self
            .catalog_file
            .map(|path| infrastructure::expand_tilde(&path.to_string_lossy()));
        self
    }
}

/// The assembled state layer: containers, preference store and notification
/// worker.
pub struct App {
    config: Config,
    state: AppStateStore,
    theme: Arc<ThemeController>,
    store: Arc<dyn PreferenceStore>,
    worker: JoinHandle<WorkerReport>,
}

impl App {
    /// Opens the JSON preference file under `config.data_dir` and starts the
    /// app with notifications delivered as tracing events.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference file exists but cannot be read or
    /// parsed, or if a configured catalog file is invalid.
    pub async fn start(config: Config) -> Result<Self> {
        let store = JsonPreferenceStore::open(config.preferences_path()).await?;
        Self::start_with(config, Arc::new(store), TracingSink).await
    }

    /// Starts the app on an existing preference store and notification sink.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file is invalid.
    pub async fn start_with<S>(
        config: Config,
        store: Arc<dyn PreferenceStore>,
        sink: S,
    ) -> Result<Self>
    where
        S: NotificationSink + 'static,
    {
        tracing::debug!(data_dir = %config.data_dir.display(), "starting app");

        let catalog = match &config.catalog_file {
            Some(path) => RouteCatalog::from_file(path).await?,
            None => RouteCatalog::seed(),
        };

        let theme = Arc::new(ThemeController::load(Arc::clone(&store)).await);

        let (dispatcher, queue) = QueuedDispatcher::channel();
        let worker = NotificationWorker::new(queue, sink).spawn();

        let state = AppStateStore::new(catalog, Arc::new(StaticScheduleTable), Arc::new(dispatcher));

        tracing::info!(
            routes = state.all_routes().len(),
            theme = %theme.current_theme(),
            "app started"
        );

        Ok(Self {
            config,
            state,
            theme,
            store,
            worker,
        })
    }

    /// Stops the notification worker once it has drained every queued
    /// request, then closes the preference store.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker task panicked or the store failed to
    /// close.
    pub async fn shutdown(self) -> Result<WorkerReport> {
        let Self {
            state,
            theme,
            store,
            worker,
            ..
        } = self;

        // The store owns the only dispatcher; dropping it ends the queue.
        drop(state);
        let report = worker
            .await
            .map_err(|e| BusError::Notification(format!("notification worker failed: {e}")))?;

        drop(theme);
        store.close().await?;

        tracing::info!(
            delivered = report.delivered,
            failed = report.failed,
            "app shut down"
        );
        Ok(report)
    }

    #[must_use]
    pub const fn state(&self) -> &AppStateStore {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppStateStore {
        &mut self.state
    }

    #[must_use]
    pub const fn theme(&self) -> &Arc<ThemeController> {
        &self.theme
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Scheme the UI should draw with, resolving `SYSTEM` against the
    /// configured platform mode.
    #[must_use]
    pub fn color_scheme(&self) -> ColorScheme {
        self.theme.current_theme().resolve(self.config.system_dark_mode)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_map(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn map_ignores_bad_values() {
        let mut map = BTreeMap::new();
        map.insert("system_dark_mode".to_string(), "sometimes".to_string());
        map.insert("preferences_file".to_string(), "  ".to_string());
        map.insert("trace_level".to_string(), "debug".to_string());

        let config = Config::from_map(&map);
        assert!(!config.system_dark_mode);
        assert_eq!(config.preferences_file, "preferences.json");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config = Config::from_toml_str("data_dir = \"/srv/bus\"\nsystem_dark_mode = true\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/bus"));
        assert!(config.system_dark_mode);
        assert_eq!(config.preferences_file, "preferences.json");
        assert!(config.catalog_file.is_none());
    }

    #[test]
    fn toml_type_errors_are_config_errors() {
        let err = Config::from_toml_str("system_dark_mode = \"yes\"").unwrap_err();
        assert!(matches!(err, BusError::Config(_)));
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bus.toml");
        std::fs::write(&path, "trace_level = \"warn\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }
}
