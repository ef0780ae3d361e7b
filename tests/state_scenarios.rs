use parking_lot::Mutex;
use slavgorod_bus::catalog::{RouteCatalog, StaticScheduleTable};
use slavgorod_bus::worker::NotificationDispatcher;
use slavgorod_bus::{AppStateStore, Route, ScheduleEntry, ToggleOutcome};
use std::sync::Arc;

#[derive(Debug, Default)]
struct RecordingDispatcher {
    requests: Mutex<Vec<(String, String)>>,
}

impl NotificationDispatcher for RecordingDispatcher {
    fn notify_departure(&self, route_id: &str, time: &str, _stop_name: &str) {
        self.requests.lock().push(("departure".to_string(), format!("{route_id} {time}")));
    }

    fn notify_favorite_route(&self, route_number: &str, message: &str) {
        self.requests.lock().push((route_number.to_string(), message.to_string()));
    }
}

fn single_route_store() -> (AppStateStore, Arc<RecordingDispatcher>) {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let catalog =
        RouteCatalog::new(vec![Route::new("102", "102", "Slavgorod-Yarovoe", "")]).unwrap();
    let store = AppStateStore::new(catalog, Arc::new(StaticScheduleTable), dispatcher.clone());
    (store, dispatcher)
}

#[test]
fn query_filters_snapshot() {
    let (mut store, _) = single_route_store();

    store.set_query("102");
    let ids: Vec<String> = store.ui_state().routes.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["102"]);

    store.set_query("xyz");
    assert!(store.ui_state().routes.is_empty());

    store.set_query("   ");
    assert_eq!(store.ui_state().routes.len(), 1);
}

#[test]
fn favorite_toggle_notifies_only_when_favorited() {
    let (mut store, dispatcher) = single_route_store();

    assert_eq!(store.toggle_route_favorite("102"), ToggleOutcome::Favorited);
    assert!(store.get_route_by_id("102").unwrap().is_favorite);
    assert_eq!(dispatcher.requests.lock().len(), 1);
    assert_eq!(dispatcher.requests.lock()[0].0, "102");

    assert_eq!(store.toggle_route_favorite("102"), ToggleOutcome::Unfavorited);
    assert!(!store.get_route_by_id("102").unwrap().is_favorite);
    assert_eq!(dispatcher.requests.lock().len(), 1);
}

#[test]
fn toggling_twice_restores_the_route() {
    let (mut store, _) = single_route_store();
    let before = store.get_route_by_id("102").unwrap();

    store.toggle_route_favorite("102");
    store.toggle_route_favorite("102");

    assert_eq!(store.get_route_by_id("102").unwrap(), before);
}

#[test]
fn favorite_time_pin_and_unpin() {
    let (mut store, _) = single_route_store();
    let entry = ScheduleEntry::new("102_1", "102", "Market", "06:25", "07:00", 1);

    assert!(store.add_favorite_time(&entry));
    assert!(store.is_favorite_time("102_1"));

    assert!(store.remove_favorite_time("102_1"));
    assert!(!store.is_favorite_time("102_1"));
    assert!(store.favorite_times().is_empty());
}

#[tokio::test]
async fn subscriber_sees_snapshots_in_publish_order() {
    let (mut store, _) = single_route_store();
    let mut snapshots = store.subscribe_ui_state();

    store.set_query("xyz");
    store.set_query("");

    assert_eq!(snapshots.recv().await.map(|s| s.routes.len()), Some(1));
    assert_eq!(snapshots.recv().await.map(|s| s.routes.len()), Some(0));
    assert_eq!(snapshots.recv().await.map(|s| s.routes.len()), Some(1));
}

#[test]
fn late_subscriber_gets_latest_query() {
    let (mut store, _) = single_route_store();
    store.set_query("10");
    store.set_query("102");

    let mut query = store.subscribe_search_query();
    assert_eq!(query.drain(), vec!["102".to_string()]);
}

#[test]
fn double_toggle_leaves_whole_catalog_and_filtered_view_unchanged() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let original = vec![
        Route::new("1", "1", "Вокзал - Больница", ""),
        Route::new("102", "102", "Slavgorod-Yarovoe", ""),
        Route::new("7", "7", "Рынок - Вокзал", ""),
    ];
    let mut store = AppStateStore::new(
        RouteCatalog::new(original.clone()).unwrap(),
        Arc::new(StaticScheduleTable),
        dispatcher.clone(),
    );

    store.set_query("вокзал");
    let filtered_before = store.ui_state();
    assert_eq!(filtered_before.routes.len(), 2);

    store.toggle_route_favorite("7");
    let after_first = store.all_routes();
    assert_eq!(after_first[0], original[0]);
    assert_eq!(after_first[1], original[1]);
    assert!(after_first[2].is_favorite);

    store.toggle_route_favorite("7");

    assert_eq!(store.all_routes(), original);
    assert_eq!(store.ui_state(), filtered_before);
    assert_eq!(store.search_query(), "вокзал");
    assert_eq!(dispatcher.requests.lock().len(), 1);
}
