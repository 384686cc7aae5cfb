// Logging contract of the store: the typed API logs one start and one
// end/end_error per operation; the legacy facade logs each failure at error
// level. Tests share a global capture, so each uses its own table name.

use estoque_core::logging_facility::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_TABLE,
};
use estoque_core::logging_facility::test_capture::init_test_capture;
use estoque_core::model::ProductFields;
use estoque_store::{legacy, ProductStore};
use serde_json::json;
use tracing::Level;
use tempfile::TempDir;

fn store_for(dir: &TempDir, table: &str) -> ProductStore {
    ProductStore::open(dir.path().join("estoque.db"), table).unwrap()
}

#[test]
fn test_insert_logs_start_and_end_with_id() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let store = store_for(&dir, "log_insert_table");
    store.ensure_schema().unwrap();

    let id = store.insert(&ProductFields::new("Widget", 1, 1.0)).unwrap();

    let events = capture.events_with(FIELD_TABLE, "log_insert_table");
    let insert_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some("product_insert"))
        .collect();
    assert_eq!(insert_events.len(), 2);
    assert_eq!(insert_events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(insert_events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(insert_events[1].field("product_id"), Some(id.to_string().as_str()));
}

#[test]
fn test_failed_delete_logs_end_error() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let store = store_for(&dir, "log_delete_table");
    store.ensure_schema().unwrap();

    assert!(store.delete(404).is_err());

    let events = capture.events_with(FIELD_TABLE, "log_delete_table");
    let error_event = events
        .iter()
        .find(|e| e.op.as_deref() == Some("product_delete") && e.event.as_deref() == Some(EVENT_END_ERROR))
        .expect("delete of a missing id should log end_error");
    assert_eq!(error_event.field("err_code"), Some("ERR_NOT_FOUND"));

    let ends = events
        .iter()
        .filter(|e| e.op.as_deref() == Some("product_delete") && e.event.as_deref() == Some(EVENT_END))
        .count();
    assert_eq!(ends, 0);
}

#[test]
fn test_missing_table_logs_persistence_error() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let store = store_for(&dir, "log_missing_table");

    assert!(store.list_all().is_err());

    let events = capture.events_with(FIELD_TABLE, "log_missing_table");
    assert!(events.iter().any(|e| {
        e.op.as_deref() == Some("product_list")
            && e.field("err_code") == Some("ERR_PERSISTENCE")
    }));
}

#[test]
fn test_legacy_insert_failure_logs_error() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("estoque.db");
    legacy::ensure_schema(&db_path, "log_legacy_insert");

    let nameless = json!({"Quantity": 1, "Purchase Price": 1.0});
    assert_eq!(
        legacy::insert(&db_path, "log_legacy_insert", nameless.as_object().unwrap()),
        None
    );

    let events = capture.events_with(FIELD_TABLE, "log_legacy_insert");
    let error_event = events
        .iter()
        .find(|e| e.level == Level::ERROR)
        .expect("failed legacy insert should log an error");
    assert_eq!(error_event.field("err_code"), Some("ERR_PERSISTENCE"));
    assert!(error_event
        .field("error")
        .is_some_and(|msg| msg.contains("constraint failed")));
}

#[test]
fn test_legacy_ensure_schema_logs_info_on_success() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();

    legacy::ensure_schema(dir.path().join("estoque.db"), "log_legacy_schema");

    let events = capture.events_with(FIELD_TABLE, "log_legacy_schema");
    assert!(events
        .iter()
        .any(|e| e.level == Level::INFO && e.field("message") == Some("table verified/created")));
    assert!(events.iter().all(|e| e.level != Level::ERROR));
}

#[test]
fn test_legacy_invalid_table_logs_invalid_input() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();

    assert!(!legacy::delete(dir.path().join("estoque.db"), "log legacy bad", 1));

    let events = capture.events_with(FIELD_TABLE, "log legacy bad");
    assert!(events
        .iter()
        .any(|e| e.level == Level::ERROR && e.field("err_code") == Some("ERR_INVALID_INPUT")));
}
