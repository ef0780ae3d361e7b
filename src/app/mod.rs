//! Application layer: observable state containers and intent handling.
//!
//! ```text
//! Screens → Intent → handle_intent → AppStateStore / ThemeController
//!                                          │                │
//!                               Observable cells      PreferenceStore
//!                                          │
//!                                  NotificationDispatcher → worker
//! ```
//!
//! # Modules
//!
//! - [`observable`]: replay-latest cells with ordered per-subscriber delivery
//! - [`search`]: case-insensitive route filter
//! - [`favorites`]: pinned departure times
//! - [`state`]: the route list, query and favorites container
//! - [`theme`]: persisted theme preference
//! - [`handler`]: intent dispatch

pub mod favorites;
pub mod handler;
pub mod observable;
pub mod search;
pub mod state;
pub mod theme;

pub use favorites::FavoriteRegistry;
pub use handler::{handle_intent, Intent, IntentOutcome};
pub use observable::{Observable, ObservableReader, Subscription};
pub use state::{AppStateStore, StateReaders, ToggleOutcome, UiSnapshot};
pub use theme::ThemeController;
