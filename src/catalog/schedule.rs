//! Schedule rule table keyed by route id.
//!
//! Schedules are generated on demand and never persisted. Entry ids are
//! `<route_id>_<n>` with `n` counting from 1 in departure order.

use crate::domain::ScheduleEntry;

/// Source of schedule entries for a route.
///
/// Unknown route ids yield an empty list, never an error.
pub trait ScheduleProvider: Send + Sync {
    /// Returns the ordered schedule of `route_id`.
    fn schedules_for(&self, route_id: &str) -> Vec<ScheduleEntry>;
}

/// Departure stop of route 102.
const ROUTE_102_STOP: &str = "Славгород (Рынок)";

/// Weekday departure/arrival pairs of route 102.
const ROUTE_102_TIMES: [(&str, &str); 36] = [
    ("06:25", "07:00"),
    ("06:45", "07:20"),
    ("07:00", "07:35"),
    ("07:20", "07:55"),
    ("07:40", "08:20"),
    ("08:00", "08:40"),
    ("08:25", "09:00"),
    ("08:40", "09:20"),
    ("09:00", "09:40"),
    ("09:20", "10:00"),
    ("09:35", "10:15"),
    ("10:00", "10:35"),
    ("10:25", "11:10"),
    ("10:50", "11:30"),
    ("11:10", "11:55"),
    ("11:35", "12:20"),
    ("12:05", "12:40"),
    ("12:30", "13:05"),
    ("12:55", "13:30"),
    ("13:15", "13:55"),
    ("13:35", "14:15"),
    ("14:05", "14:45"),
    ("14:30", "15:10"),
    ("14:55", "15:30"),
    ("15:20", "15:55"),
    ("15:45", "16:20"),
    ("16:10", "16:45"),
    ("16:35", "17:10"),
    ("17:05", "17:40"),
    ("17:25", "18:10"),
    ("17:50", "18:35"),
    ("18:20", "19:00"),
    ("18:50", "19:25"),
    ("19:20", "20:00"),
    ("20:00", "20:30"),
    ("20:30", "21:00"),
];

/// Built-in static schedule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticScheduleTable;

impl StaticScheduleTable {
    fn expand(route_id: &str, stop_name: &str, times: &[(&str, &str)], day_of_week: u8) -> Vec<ScheduleEntry> {
        times
            .iter()
            .enumerate()
            .map(|(idx, (departure, arrival))| {
                ScheduleEntry::new(
                    format!("{route_id}_{}", idx + 1),
                    route_id,
                    stop_name,
                    *departure,
                    *arrival,
                    day_of_week,
                )
            })
            .collect()
    }
}

impl ScheduleProvider for StaticScheduleTable {
    fn schedules_for(&self, route_id: &str) -> Vec<ScheduleEntry> {
        match route_id {
            "102" => Self::expand(route_id, ROUTE_102_STOP, &ROUTE_102_TIMES, 1),
            _ => {
                tracing::debug!(route_id = %route_id, "no schedule rule for route");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_102_has_full_weekday_schedule() {
        let entries = StaticScheduleTable.schedules_for("102");
        assert_eq!(entries.len(), 36);

        let first = &entries[0];
        assert_eq!(first.id, "102_1");
        assert_eq!(first.departure_time, "06:25");
        assert_eq!(first.arrival_time, "07:00");
        assert_eq!(first.stop_name, "Славгород (Рынок)");
        assert_eq!(first.day_of_week, 1);

        let last = &entries[35];
        assert_eq!(last.id, "102_36");
        assert_eq!(last.departure_time, "20:30");
    }

    #[test]
    fn ids_are_unique_within_route() {
        let entries = StaticScheduleTable.schedules_for("102");
        let mut ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }

    #[test]
    fn unknown_route_yields_empty_schedule() {
        assert!(StaticScheduleTable.schedules_for("999").is_empty());
        assert!(StaticScheduleTable.schedules_for("").is_empty());
    }
}
