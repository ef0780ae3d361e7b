//! Error types for the bus schedule state layer.
//!
//! This module defines the centralized error type [`BusError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only start-up paths (opening the preference file, parsing configuration or a
//! catalog override) surface these errors to callers. Once the app is running,
//! lookup misses are plain `Option`s and persistence failures are absorbed by
//! the theme controller.

use thiserror::Error;

/// The main error type for bus schedule state operations.
///
/// # Examples
///
/// ```
/// use slavgorod_bus::BusError;
///
/// fn open_preferences() -> Result<(), BusError> {
///     Err(BusError::Storage("preference file is locked".to_string()))
/// }
///
/// assert!(open_preferences().is_err());
/// ```
#[derive(Debug, Error)]
pub enum BusError {
    /// Preference store operation failed.
    ///
    /// Occurs when reading from or writing to the preference backend fails,
    /// or when the store has already been closed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Automatically converts from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Route catalog override could not be loaded.
    ///
    /// Raised for malformed TOML or duplicate route ids.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// A notification could not be delivered by the sink.
    #[error("Notification error: {0}")]
    Notification(String),
}

/// A specialized `Result` type for bus schedule operations.
pub type Result<T> = std::result::Result<T, BusError>;
