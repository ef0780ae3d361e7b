//! Storage layer for durable preferences.
//!
//! Routes and schedules are static and never persisted; the only durable
//! state is the display theme preference.
//!
//! # Modules
//!
//! - `backend`: [`PreferenceStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based implementation with atomic writes
//! - `memory`: in-memory implementation
//! - `models`: on-disk document format

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::{PreferenceStore, THEME_KEY};
pub use json::JsonPreferenceStore;
pub use memory::MemoryPreferenceStore;
pub use models::PreferenceDocument;
