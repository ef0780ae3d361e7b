//! Bus route domain model.
//!
//! A [`Route`] is an immutable value record. The only field that changes at
//! runtime is `is_favorite`, and it only changes through
//! [`Route::with_favorite`], which produces a new record instead of mutating
//! the one held by the state store.

use serde::{Deserialize, Serialize};

/// Accent color used when a route does not specify one.
pub const DEFAULT_ROUTE_COLOR: &str = "#1976D2";

/// A bus line with a number, a name and display metadata.
///
/// # Fields
///
/// - `id`: Unique identifier across the catalog
/// - `route_number`: Number printed on the bus, e.g. `"102"`
/// - `name`: Human-readable line name, e.g. `"Славгород - Яровое"`
/// - `description`: Free-form description shown on the route card
/// - `is_active`: Whether the line is currently in service
/// - `is_favorite`: Route-level favorite flag (independent of favorite times)
/// - `color`: Hex accent color for the route card
/// - `price_primary` / `price_secondary`: Optional fare strings
/// - `direction_details`: Optional direction notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub route_number: String,
    pub name: String,
    pub description: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub price_primary: Option<String>,
    #[serde(default)]
    pub price_secondary: Option<String>,
    #[serde(default)]
    pub direction_details: Option<String>,
}

fn default_active() -> bool {
    true
}

fn default_color() -> String {
    DEFAULT_ROUTE_COLOR.to_string()
}

impl Route {
    /// Creates an active, non-favorite route with the default color and no
    /// optional metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use slavgorod_bus::Route;
    ///
    /// let route = Route::new("102", "102", "Славгород - Яровое", "Маршрут между Славгородом и Яровым");
    /// assert!(route.is_active);
    /// assert!(!route.is_favorite);
    /// assert_eq!(route.color, "#1976D2");
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        route_number: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            route_number: route_number.into(),
            name: name.into(),
            description: description.into(),
            is_active: true,
            is_favorite: false,
            color: default_color(),
            price_primary: None,
            price_secondary: None,
            direction_details: None,
        }
    }

    /// Returns a copy of this route with the favorite flag set to `is_favorite`.
    #[must_use]
    pub fn with_favorite(&self, is_favorite: bool) -> Self {
        Self {
            is_favorite,
            ..self.clone()
        }
    }

    /// Returns `true` if the route number or name contains `needle`.
    ///
    /// `needle` must already be lowercased; both fields are lowercased with
    /// Unicode rules so Cyrillic names match regardless of case.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.route_number.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}
