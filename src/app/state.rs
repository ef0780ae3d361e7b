//! Application state store and UI snapshot projection.
//!
//! This module defines [`AppStateStore`], the single source of truth for the
//! route list, the current search query and the pinned favorite times, along
//! with the [`UiSnapshot`] projection screens render from.
//!
//! # Architecture
//!
//! `AppStateStore` separates authoritative data (the route list and the
//! favorite registry) from derived state (the snapshot). Every mutation that
//! can change what a screen shows recomputes the snapshot as a whole value and
//! publishes it; nothing downstream ever sees a half-updated snapshot.
//!
//! Mutators take `&mut self`, so the borrow checker enforces the single-writer
//! discipline. All operations are synchronous; the only side effect, the
//! notification request, goes through a fire-and-forget dispatcher and is
//! issued after the state change has been published.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use slavgorod_bus::app::{AppStateStore, ToggleOutcome};
//! use slavgorod_bus::catalog::{RouteCatalog, StaticScheduleTable};
//! use slavgorod_bus::worker::QueuedDispatcher;
//!
//! let (dispatcher, _queue) = QueuedDispatcher::channel();
//! let mut store = AppStateStore::new(
//!     RouteCatalog::seed(),
//!     Arc::new(StaticScheduleTable),
//!     Arc::new(dispatcher),
//! );
//!
//! store.set_query("102");
//! assert_eq!(store.ui_state().routes.len(), 1);
//! assert_eq!(store.toggle_route_favorite("102"), ToggleOutcome::Favorited);
//! assert_eq!(store.toggle_route_favorite("missing"), ToggleOutcome::NotFound);
//! ```

use crate::app::favorites::FavoriteRegistry;
use crate::app::observable::{Observable, ObservableReader, Subscription};
use crate::app::search;
use crate::catalog::{RouteCatalog, ScheduleProvider};
use crate::domain::{FavoriteTime, Route, ScheduleEntry};
use crate::worker::NotificationDispatcher;
use std::sync::Arc;

/// Immutable projection consumed by screens.
///
/// `error` is reserved for I/O-backed route loading; no operation of the
/// store populates it while routes come from a static catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiSnapshot {
    /// Routes matching the current query, in catalog order.
    pub routes: Vec<Route>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Result of toggling a route's favorite flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The route went from not favorite to favorite.
    Favorited,
    /// The route went from favorite to not favorite.
    Unfavorited,
    /// No route has the requested id; nothing changed.
    NotFound,
}

/// Central application state container.
pub struct AppStateStore {
    /// Authoritative route list, in catalog order.
    routes: Vec<Route>,

    /// Pinned favorite times.
    favorites: FavoriteRegistry,

    ui_state: Observable<UiSnapshot>,
    search_query: Observable<String>,
    favorite_times: Observable<Vec<FavoriteTime>>,

    schedules: Arc<dyn ScheduleProvider>,
    notifier: Arc<dyn NotificationDispatcher>,
}

impl AppStateStore {
    /// Creates a store seeded with `catalog`, showing every route.
    #[must_use]
    pub fn new(
        catalog: RouteCatalog,
        schedules: Arc<dyn ScheduleProvider>,
        notifier: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        let routes = catalog.into_routes();
        tracing::debug!(route_count = routes.len(), "app state store created");

        let initial = UiSnapshot {
            routes: routes.clone(),
            is_loading: false,
            error: None,
        };

        Self {
            routes,
            favorites: FavoriteRegistry::new(),
            ui_state: Observable::new(initial),
            search_query: Observable::new(String::new()),
            favorite_times: Observable::new(Vec::new()),
            schedules,
            notifier,
        }
    }

    /// Stores `query` and republishes the snapshot filtered by it.
    pub fn set_query(&mut self, query: &str) {
        let _span = tracing::debug_span!("set_query", query_len = query.len()).entered();

        self.search_query.publish(query.to_string());
        self.publish_snapshot();
    }

    /// Flips the favorite flag of the route with `route_id`.
    ///
    /// The flag is replaced copy-on-write and the snapshot is republished
    /// under the current query. A notification is requested only when the
    /// route becomes favorite.
    pub fn toggle_route_favorite(&mut self, route_id: &str) -> ToggleOutcome {
        let _span = tracing::debug_span!("toggle_route_favorite", route_id = %route_id).entered();

        let Some(index) = self.routes.iter().position(|route| route.id == route_id) else {
            tracing::debug!("route not found, toggle ignored");
            return ToggleOutcome::NotFound;
        };

        let updated = self.routes[index].with_favorite(!self.routes[index].is_favorite);
        let now_favorite = updated.is_favorite;
        let route_number = updated.route_number.clone();
        let message = format!("Маршрут «{}» добавлен в избранное", updated.name);

        self.routes[index] = updated;
        self.publish_snapshot();

        if now_favorite {
            self.notifier.notify_favorite_route(&route_number, &message);
            tracing::debug!("route marked favorite");
            ToggleOutcome::Favorited
        } else {
            tracing::debug!("route unmarked favorite");
            ToggleOutcome::Unfavorited
        }
    }

    /// Looks up a route by id.
    #[must_use]
    pub fn get_route_by_id(&self, route_id: &str) -> Option<Route> {
        self.routes.iter().find(|route| route.id == route_id).cloned()
    }

    /// Looks up a route by an id that may itself be missing, as with an
    /// absent navigation argument.
    #[must_use]
    pub fn get_route_by_optional_id(&self, route_id: Option<&str>) -> Option<Route> {
        route_id.and_then(|id| self.get_route_by_id(id))
    }

    /// Schedule of a route, from the injected schedule provider.
    #[must_use]
    pub fn schedules_for(&self, route_id: &str) -> Vec<ScheduleEntry> {
        self.schedules.schedules_for(route_id)
    }

    /// Pins the departure time of `entry`.
    ///
    /// Returns `true` if it was newly pinned; only then is a departure
    /// notification requested.
    pub fn add_favorite_time(&mut self, entry: &ScheduleEntry) -> bool {
        let _span = tracing::debug_span!("add_favorite_time", favorite_id = %entry.id).entered();

        let favorite = FavoriteTime::from(entry);
        if !self.favorites.add(favorite) {
            return false;
        }
        self.favorite_times.publish(self.favorites.to_list());

        self.notifier
            .notify_departure(&entry.route_id, &entry.departure_time, &entry.stop_name);
        tracing::debug!(favorite_count = self.favorites.len(), "favorite time added");
        true
    }

    /// Unpins the time with `id`. Returns `true` if one was pinned.
    pub fn remove_favorite_time(&mut self, id: &str) -> bool {
        let _span = tracing::debug_span!("remove_favorite_time", favorite_id = %id).entered();

        if !self.favorites.remove(id) {
            tracing::debug!("favorite time not pinned, nothing to remove");
            return false;
        }
        self.favorite_times.publish(self.favorites.to_list());
        tracing::debug!(favorite_count = self.favorites.len(), "favorite time removed");
        true
    }

    #[must_use]
    pub fn is_favorite_time(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Pinned times of one route, in the order they were pinned.
    #[must_use]
    pub fn favorite_times_for_route(&self, route_id: &str) -> Vec<FavoriteTime> {
        self.favorites.for_route(route_id)
    }

    #[must_use]
    pub fn ui_state(&self) -> UiSnapshot {
        self.ui_state.get()
    }

    #[must_use]
    pub fn search_query(&self) -> String {
        self.search_query.get()
    }

    #[must_use]
    pub fn favorite_times(&self) -> Vec<FavoriteTime> {
        self.favorite_times.get()
    }

    /// Copy of the full route list, ignoring the current query.
    #[must_use]
    pub fn all_routes(&self) -> Vec<Route> {
        self.routes.clone()
    }

    #[must_use]
    pub fn subscribe_ui_state(&self) -> Subscription<UiSnapshot> {
        self.ui_state.subscribe()
    }

    #[must_use]
    pub fn subscribe_search_query(&self) -> Subscription<String> {
        self.search_query.subscribe()
    }

    #[must_use]
    pub fn subscribe_favorite_times(&self) -> Subscription<Vec<FavoriteTime>> {
        self.favorite_times.subscribe()
    }

    /// Read-only handles for screens that outlive a borrow of the store.
    #[must_use]
    pub fn readers(&self) -> StateReaders {
        StateReaders {
            ui_state: self.ui_state.reader(),
            search_query: self.search_query.reader(),
            favorite_times: self.favorite_times.reader(),
        }
    }

    /// Recomputes the snapshot from the authoritative list and current query.
    fn publish_snapshot(&self) {
        let query = self.search_query.get();
        let routes = search::filter(&self.routes, &query);

        tracing::debug!(visible_routes = routes.len(), "publishing ui snapshot");

        self.ui_state.publish(UiSnapshot {
            routes,
            is_loading: false,
            error: None,
        });
    }
}

impl std::fmt::Debug for AppStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStateStore")
            .field("routes", &self.routes.len())
            .field("favorites", &self.favorites.len())
            .field("search_query", &self.search_query.get())
            .finish_non_exhaustive()
    }
}

/// Cloneable read-only views of an [`AppStateStore`].
#[derive(Debug, Clone)]
pub struct StateReaders {
    pub ui_state: ObservableReader<UiSnapshot>,
    pub search_query: ObservableReader<String>,
    pub favorite_times: ObservableReader<Vec<FavoriteTime>>,
}
