use async_trait::async_trait;
use parking_lot::Mutex;
use slavgorod_bus::storage::{MemoryPreferenceStore, THEME_KEY};
use slavgorod_bus::worker::{NotificationRequest, NotificationSink};
use slavgorod_bus::{
    handle_intent, App, BusError, ColorScheme, Config, Intent, IntentOutcome, ScheduleEntry,
    ThemePreference, ToggleOutcome,
};
use std::sync::Arc;

/// Sink that records every request and refuses all of them.
#[derive(Debug, Default, Clone)]
struct RefusingSink {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl NotificationSink for RefusingSink {
    async fn deliver(&self, request: &NotificationRequest) -> slavgorod_bus::Result<()> {
        self.seen.lock().push(request.title());
        Err(BusError::Notification("notifications disabled".to_string()))
    }
}

fn config_in(dir: &tempfile::TempDir) -> Config {
    Config {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    }
}

#[tokio::test]
async fn start_then_shutdown_with_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::start(config_in(&dir)).await.unwrap();

    assert_eq!(app.theme().current_theme(), ThemePreference::System);
    assert_eq!(app.state().ui_state().routes.len(), 1);

    let outcome = handle_intent(&mut app, Intent::SelectTheme(ThemePreference::Dark)).await;
    assert_eq!(outcome, IntentOutcome::ThemeApplied(ThemePreference::Dark));
    assert_eq!(app.color_scheme(), ColorScheme::Dark);

    let report = app.shutdown().await.unwrap();
    assert_eq!(report.delivered, 0);

    let restarted = App::start(config_in(&dir)).await.unwrap();
    assert_eq!(restarted.theme().current_theme(), ThemePreference::Dark);
    restarted.shutdown().await.unwrap();
}

#[tokio::test]
async fn queued_notifications_are_delivered_before_shutdown_returns() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::start(config_in(&dir)).await.unwrap();

    let entry = ScheduleEntry::new("102_1", "102", "Славгород (Рынок)", "06:25", "07:00", 1);
    handle_intent(&mut app, Intent::ToggleFavoriteTime(entry)).await;
    handle_intent(&mut app, Intent::ToggleRouteFavorite { route_id: "102".to_string() }).await;

    let report = app.shutdown().await.unwrap();
    assert_eq!(report.delivered, 2);
    assert_eq!(report.failed, 0);
}

#[tokio::test]
async fn failed_notifications_never_touch_state() {
    let dir = tempfile::tempdir().unwrap();
    let sink = RefusingSink::default();
    let mut app = App::start_with(
        config_in(&dir),
        Arc::new(MemoryPreferenceStore::new()),
        sink.clone(),
    )
    .await
    .unwrap();

    let outcome =
        handle_intent(&mut app, Intent::ToggleRouteFavorite { route_id: "102".to_string() }).await;
    assert_eq!(outcome, IntentOutcome::RouteToggled(ToggleOutcome::Favorited));

    let report = app_report_after_checks(app).await;
    assert_eq!(report.failed, 1);
    assert_eq!(*sink.seen.lock(), vec!["Маршрут №102".to_string()]);
}

async fn app_report_after_checks(app: App) -> slavgorod_bus::worker::WorkerReport {
    assert!(app.state().get_route_by_id("102").unwrap().is_favorite);
    app.shutdown().await.unwrap()
}

#[tokio::test]
async fn schedule_card_toggle_pins_then_unpins() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::start_with(
        config_in(&dir),
        Arc::new(MemoryPreferenceStore::new()),
        RefusingSink::default(),
    )
    .await
    .unwrap();

    let entry = app.state().schedules_for("102").remove(0);
    assert_eq!(
        handle_intent(&mut app, Intent::ToggleFavoriteTime(entry.clone())).await,
        IntentOutcome::FavoriteTimePinned
    );
    assert!(app.state().is_favorite_time(&entry.id));

    assert_eq!(
        handle_intent(&mut app, Intent::ToggleFavoriteTime(entry.clone())).await,
        IntentOutcome::FavoriteTimeUnpinned
    );
    assert_eq!(
        handle_intent(&mut app, Intent::RemoveFavoriteTime { id: entry.id.clone() }).await,
        IntentOutcome::FavoriteTimeMissing
    );

    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_theme_write_reports_and_keeps_theme() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryPreferenceStore::with_value(THEME_KEY, "LIGHT"));
    let mut app = App::start_with(config_in(&dir), store.clone(), RefusingSink::default())
        .await
        .unwrap();

    store.set_available(false);
    let outcome = handle_intent(&mut app, Intent::SelectTheme(ThemePreference::Dark)).await;

    assert_eq!(outcome, IntentOutcome::ThemeRejected(ThemePreference::Dark));
    assert_eq!(app.color_scheme(), ColorScheme::Light);

    store.set_available(true);
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn system_theme_follows_configured_platform_mode() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        system_dark_mode: true,
        ..config_in(&dir)
    };
    let app = App::start_with(config, Arc::new(MemoryPreferenceStore::new()), RefusingSink::default())
        .await
        .unwrap();

    assert_eq!(app.color_scheme(), ColorScheme::Dark);
    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn catalog_file_replaces_seed() {
    let dir = tempfile::tempdir().unwrap();
    let catalog_path = dir.path().join("routes.toml");
    std::fs::write(
        &catalog_path,
        "[[routes]]\nid = \"1\"\nroute_number = \"1\"\nname = \"Вокзал - Больница\"\ndescription = \"\"\n\n\
         [[routes]]\nid = \"7\"\nroute_number = \"7\"\nname = \"Рынок - Вокзал\"\ndescription = \"\"\n",
    )
    .unwrap();

    let config = Config {
        catalog_file: Some(catalog_path),
        ..config_in(&dir)
    };
    let mut app = App::start_with(config, Arc::new(MemoryPreferenceStore::new()), RefusingSink::default())
        .await
        .unwrap();

    assert_eq!(app.state().all_routes().len(), 2);
    assert_eq!(
        handle_intent(&mut app, Intent::QueryChanged("вокзал".to_string())).await,
        IntentOutcome::QueryApplied { visible_routes: 2 }
    );
    assert!(app.state().get_route_by_id("102").is_none());

    app.shutdown().await.unwrap();
}

#[tokio::test]
async fn corrupt_preference_file_fails_start() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("preferences.json"), "{ not json").unwrap();

    let err = App::start(config_in(&dir)).await.unwrap_err();
    assert!(matches!(err, BusError::Storage(_)));
}
