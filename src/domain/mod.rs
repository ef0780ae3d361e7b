//! Domain layer for the bus schedule app.
//!
//! This module contains the value records the state layer passes around,
//! independent of storage, notification delivery or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`route`]: Bus route record
//! - [`schedule`]: Schedule entries and pinned favorite times
//! - [`theme`]: Display theme preference
//!
//! # Examples
//!
//! ```
//! use slavgorod_bus::domain::{FavoriteTime, Route, ScheduleEntry};
//!
//! let route = Route::new("102", "102", "Славгород - Яровое", "");
//! let entry = ScheduleEntry::new("102_1", &route.id, "Славгород (Рынок)", "06:25", "07:00", 1);
//! let pinned = FavoriteTime::from(&entry);
//! assert_eq!(pinned.route_id, "102");
//! ```

pub mod error;
pub mod route;
pub mod schedule;
pub mod theme;

pub use error::{BusError, Result};
pub use route::Route;
pub use schedule::{FavoriteTime, ScheduleEntry};
pub use theme::{ColorScheme, ThemePreference};
