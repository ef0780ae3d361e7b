//! Intent handling.
//!
//! Screens never touch the containers directly: they describe what the user
//! did as an [`Intent`] and [`handle_intent`] routes it to the
//! [`AppStateStore`](crate::app::AppStateStore) or the
//! [`ThemeController`](crate::app::ThemeController). The returned
//! [`IntentOutcome`] says what actually changed.

use crate::app::state::ToggleOutcome;
use crate::domain::{ScheduleEntry, ThemePreference};
use crate::App;

/// User actions issued by the screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The search field changed.
    QueryChanged(String),
    /// The star on a route card was tapped.
    ToggleRouteFavorite { route_id: String },
    /// The star on a schedule card was tapped: pins the time if it is not
    /// pinned, unpins it otherwise.
    ToggleFavoriteTime(ScheduleEntry),
    /// A pinned time was removed from the favorites screen.
    RemoveFavoriteTime { id: String },
    /// A theme was picked in settings.
    SelectTheme(ThemePreference),
}

/// What an [`Intent`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    QueryApplied { visible_routes: usize },
    RouteToggled(ToggleOutcome),
    FavoriteTimePinned,
    FavoriteTimeUnpinned,
    /// A removal targeted a time that was not pinned.
    FavoriteTimeMissing,
    ThemeApplied(ThemePreference),
    /// The theme write failed; the previous theme stays in effect.
    ThemeRejected(ThemePreference),
}

/// Applies `intent` to the application containers.
pub async fn handle_intent(app: &mut App, intent: Intent) -> IntentOutcome {
    match intent {
        Intent::QueryChanged(query) => {
            let state = app.state_mut();
            state.set_query(&query);
            IntentOutcome::QueryApplied {
                visible_routes: state.ui_state().routes.len(),
            }
        }
        Intent::ToggleRouteFavorite { route_id } => {
            IntentOutcome::RouteToggled(app.state_mut().toggle_route_favorite(&route_id))
        }
        Intent::ToggleFavoriteTime(entry) => {
            let state = app.state_mut();
            if state.is_favorite_time(&entry.id) {
                state.remove_favorite_time(&entry.id);
                IntentOutcome::FavoriteTimeUnpinned
            } else {
                state.add_favorite_time(&entry);
                IntentOutcome::FavoriteTimePinned
            }
        }
        Intent::RemoveFavoriteTime { id } => {
            if app.state_mut().remove_favorite_time(&id) {
                IntentOutcome::FavoriteTimeUnpinned
            } else {
                IntentOutcome::FavoriteTimeMissing
            }
        }
        Intent::SelectTheme(theme) => {
            if app.theme().set_theme(theme).await {
                IntentOutcome::ThemeApplied(theme)
            } else {
                IntentOutcome::ThemeRejected(theme)
            }
        }
    }
}
