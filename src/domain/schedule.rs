//! Schedule entries and pinned favorite times.

use serde::{Deserialize, Serialize};

/// One scheduled departure/arrival pair for a route.
///
/// Times are wall-clock strings such as `"06:25"` and are not validated.
/// `day_of_week` runs from 1 (Monday) to 7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub route_id: String,
    pub stop_name: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub day_of_week: u8,
}

impl ScheduleEntry {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        route_id: impl Into<String>,
        stop_name: impl Into<String>,
        departure_time: impl Into<String>,
        arrival_time: impl Into<String>,
        day_of_week: u8,
    ) -> Self {
        Self {
            id: id.into(),
            route_id: route_id.into(),
            stop_name: stop_name.into(),
            departure_time: departure_time.into(),
            arrival_time: arrival_time.into(),
            day_of_week,
        }
    }
}

/// A schedule entry pinned by the user.
///
/// Tracked independently of route-level favoriting. Identity is the `id` of
/// the schedule entry it was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteTime {
    pub id: String,
    pub route_id: String,
    pub stop_name: String,
    pub departure_time: String,
    pub arrival_time: String,
}

impl FavoriteTime {
    /// Rebuilds a schedule entry for display on a schedule card.
    ///
    /// The day of week is not kept on a pinned time, so the entry is reported
    /// for day 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use slavgorod_bus::{FavoriteTime, ScheduleEntry};
    ///
    /// let entry = ScheduleEntry::new("102_1", "102", "Market", "06:25", "07:00", 3);
    /// let pinned = FavoriteTime::from(&entry);
    /// let card = pinned.to_schedule_entry();
    /// assert_eq!(card.id, "102_1");
    /// assert_eq!(card.day_of_week, 1);
    /// ```
    #[must_use]
    pub fn to_schedule_entry(&self) -> ScheduleEntry {
        ScheduleEntry {
            id: self.id.clone(),
            route_id: self.route_id.clone(),
            stop_name: self.stop_name.clone(),
            departure_time: self.departure_time.clone(),
            arrival_time: self.arrival_time.clone(),
            day_of_week: 1,
        }
    }
}

impl From<&ScheduleEntry> for FavoriteTime {
    fn from(entry: &ScheduleEntry) -> Self {
        Self {
            id: entry.id.clone(),
            route_id: entry.route_id.clone(),
            stop_name: entry.stop_name.clone(),
            departure_time: entry.departure_time.clone(),
            arrival_time: entry.arrival_time.clone(),
        }
    }
}

impl From<ScheduleEntry> for FavoriteTime {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            id: entry.id,
            route_id: entry.route_id,
            stop_name: entry.stop_name,
            departure_time: entry.departure_time,
            arrival_time: entry.arrival_time,
        }
    }
}
