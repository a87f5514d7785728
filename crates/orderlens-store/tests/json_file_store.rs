//! Integration tests for `JsonFileStore` against a real temp directory.

use chrono::{TimeZone, Utc};
use orderlens_core::{NormalizedOrder, OrderSnapshot};
use orderlens_store::{JsonFileStore, OrderStore, StoreError};

fn order(name: &str, cost: f64) -> NormalizedOrder {
    NormalizedOrder {
        order_date: Utc.with_ymd_and_hms(2024, 6, 1, 15, 52, 0).unwrap(),
        total_cost: cost,
        restaurant_name: name.to_owned(),
    }
}

fn snapshot(orders: Vec<NormalizedOrder>) -> OrderSnapshot {
    OrderSnapshot::new(orders, Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap())
}

#[test]
fn load_returns_none_when_file_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("orders.json"));
    assert!(store.load().unwrap().is_none());
}

#[test]
fn save_then_load_returns_same_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("orders.json"));
    let original = snapshot(vec![order("Behrouz Biryani", 549.0), order("Faasos", 199.5)]);

    store.save(&original).unwrap();
    let loaded = store.load().unwrap().expect("snapshot should be present");

    assert_eq!(loaded, original);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("orders.json");
    let store = JsonFileStore::new(&path);

    store.save(&snapshot(vec![order("Faasos", 199.5)])).unwrap();

    assert!(path.exists());
}

#[test]
fn save_overwrites_previous_document_and_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    let store = JsonFileStore::new(&path);

    store
        .save(&snapshot(vec![order("A", 1.0), order("B", 2.0)]))
        .unwrap();
    store.save(&snapshot(vec![order("C", 3.0)])).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.orders.len(), 1);
    assert_eq!(loaded.orders[0].restaurant_name, "C");
    assert!(!dir.path().join("orders.json.tmp").exists());
}

#[test]
fn document_uses_collection_and_timestamp_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    let store = JsonFileStore::new(&path);
    store.save(&snapshot(vec![order("A", 1.0)])).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("orderCollection").is_some());
    assert!(raw.get("lastUpdated").is_some());
}

#[test]
fn load_reports_corrupt_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = JsonFileStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StoreError::Json { .. }), "got: {err:?}");
}

#[test]
fn empty_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orders.json");
    std::fs::write(&path, "").unwrap();

    assert!(JsonFileStore::new(&path).load().unwrap().is_none());
}
