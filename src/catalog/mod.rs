//! Route catalog and schedule rule table.
//!
//! The catalog is the immutable-at-runtime source list of routes the state
//! store is seeded with. It ships with a built-in seed and can be replaced at
//! start-up by a TOML file:
//!
//! ```toml
//! [[routes]]
//! id = "102"
//! route_number = "102"
//! name = "Славгород - Яровое"
//! description = "Маршрут между Славгородом и Яровым"
//! price_primary = "35 руб. (по городу) 55 руб. (межгород)"
//! ```
//!
//! Omitted fields take the [`Route`] defaults (active, not favorite, default
//! color).

pub mod schedule;

pub use schedule::{ScheduleProvider, StaticScheduleTable};

use crate::domain::error::{BusError, Result};
use crate::domain::Route;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// On-disk shape of a catalog override file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    routes: Vec<Route>,
}

/// Ordered list of routes with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl RouteCatalog {
    /// Builds a catalog, rejecting duplicate route ids.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Catalog`] naming the first duplicated id.
    pub fn new(routes: Vec<Route>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !seen.insert(route.id.as_str()) {
                return Err(BusError::Catalog(format!("duplicate route id: {}", route.id)));
            }
        }
        Ok(Self { routes })
    }

    /// The built-in catalog.
    #[must_use]
    pub fn seed() -> Self {
        let mut route = Route::new(
            "102",
            "102",
            "Славгород - Яровое",
            "Маршрут между Славгородом и Яровым",
        );
        route.price_primary = Some("35 руб. (по городу) 55 руб. (межгород)".to_string());
        Self {
            routes: vec![route],
        }
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Catalog`] for malformed TOML or duplicate ids.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(contents)
            .map_err(|e| BusError::Catalog(format!("failed to parse catalog: {e}")))?;
        Self::new(file.routes)
    }

    /// Loads a catalog override from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Io`] if the file cannot be read, or the errors of
    /// [`RouteCatalog::from_toml_str`].
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading route catalog override");
        let contents = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_toml_str(&contents)?;
        tracing::debug!(route_count = catalog.routes.len(), "route catalog loaded");
        Ok(catalog)
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self::seed()
    }
}
