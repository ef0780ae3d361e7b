//! Registry of pinned favorite times.
//!
//! Set semantics keyed by schedule entry id, enumerated in insertion order.
//! Both transitions are idempotent and report whether anything changed; the
//! "newly added" signal is what gates departure notifications upstream.

use crate::domain::FavoriteTime;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteRegistry {
    /// Entries in insertion order.
    entries: Vec<FavoriteTime>,
    /// Ids of `entries`, for keyed lookup.
    ids: HashSet<String>,
}

impl FavoriteRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry` unless an entry with the same id is present.
    ///
    /// Returns `true` if the entry was newly added.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slavgorod_bus::{app::FavoriteRegistry, FavoriteTime, ScheduleEntry};
    ///
    /// let entry = ScheduleEntry::new("102_1", "102", "Market", "06:25", "07:00", 1);
    /// let mut registry = FavoriteRegistry::new();
    /// assert!(registry.add(FavoriteTime::from(&entry)));
    /// assert!(!registry.add(FavoriteTime::from(&entry)));
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn add(&mut self, entry: FavoriteTime) -> bool {
        if self.ids.contains(&entry.id) {
            tracing::trace!(favorite_id = %entry.id, "favorite time already pinned");
            return false;
        }
        self.ids.insert(entry.id.clone());
        self.entries.push(entry);
        true
    }

    /// Removes the entry with `id`. Returns `true` if one was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.ids.remove(id) {
            return false;
        }
        self.entries.retain(|entry| entry.id != id);
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Copies of all entries in insertion order.
    #[must_use]
    pub fn to_list(&self) -> Vec<FavoriteTime> {
        self.entries.clone()
    }

    /// Pinned times of one route, in insertion order.
    #[must_use]
    pub fn for_route(&self, route_id: &str) -> Vec<FavoriteTime> {
        self.entries
            .iter()
            .filter(|entry| entry.route_id == route_id)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
