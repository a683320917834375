//! Store persistence tests through the public API.

use super::temp_store;
use percentman::config::{CorruptStatePolicy, PercentmanConfig};
use percentman::models::{HeaderEntry, RequestSpec, ResponseResult};
use percentman::store::{RequestStore, StoreConfig, StoreError};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn sample_spec() -> RequestSpec {
    RequestSpec::new("POST", "api.example.com/users")
        .with_header(HeaderEntry::new("Accept", "application/json"))
        .with_header(HeaderEntry::disabled("X-Trace", "on"))
        .with_body(r#"{"name":"Ada"}"#)
}

fn sample_result() -> ResponseResult {
    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    ResponseResult {
        status_code: 201,
        status_line: "201 Created".to_string(),
        headers,
        body: r#"{"id":1}"#.to_string(),
        elapsed: Duration::from_millis(42),
        error: None,
    }
}

#[test]
fn test_files_use_documented_field_names() {
    let (_dir, store) = temp_store();
    store.save_template("Create user", &sample_spec()).unwrap();
    store.add_history(&sample_spec(), &sample_result()).unwrap();

    let templates: Value = serde_json::from_str(&fs::read_to_string(store.templates_path()).unwrap()).unwrap();
    let template = &templates[0];
    assert_eq!(template["name"], "Create user");
    assert!(template["id"].is_string());
    assert!(template["created_at"].is_string());
    assert!(template["updated_at"].is_string());
    assert_eq!(template["request"]["method"], "POST");
    assert_eq!(template["request"]["headers"][1]["enabled"], false);

    let history: Value = serde_json::from_str(&fs::read_to_string(store.history_path()).unwrap()).unwrap();
    let response = &history[0]["response"];
    assert_eq!(response["status_code"], 201);
    assert_eq!(response["status"], "201 Created");
    assert_eq!(response["response_time"], 42_000_000u64);
    assert!(response.get("error").is_none());
    assert!(history[0]["timestamp"].is_string());
}

#[test]
fn test_files_are_indented_with_two_spaces() {
    let (_dir, store) = temp_store();
    store.save_template("A", &RequestSpec::new("GET", "example.com")).unwrap();

    let text = fs::read_to_string(store.templates_path()).unwrap();
    assert!(text.starts_with("[\n  {\n    \""));
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let (template_id, entry_id) = {
        let store = RequestStore::open_in(dir.path()).unwrap();
        let template = store.save_template("Create user", &sample_spec()).unwrap();
        let entry = store.add_history(&sample_spec(), &sample_result()).unwrap();
        (template.id, entry.id)
    };

    let store = RequestStore::open_in(dir.path()).unwrap();
    let template = store.get_template(&template_id).unwrap();
    assert_eq!(template.request, sample_spec());
    let entry = store.get_history_entry(&entry_id).unwrap();
    assert_eq!(entry.response, sample_result());
}

#[test]
fn test_hand_edited_files_are_normalized_on_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("templates.json"),
        r#"[
          {"id": "t2", "name": "zeta", "request": {"method": "GET", "url": "z.example.com", "headers": null, "body": ""},
           "created_at": "2024-03-01T10:00:00Z", "updated_at": "2024-03-01T10:00:00Z"},
          {"id": "t1", "name": "alpha", "request": {"method": "GET", "url": "a.example.com", "headers": [{"key": "Accept", "value": "*/*"}], "body": ""},
           "created_at": "2024-03-01T12:00:00+02:00", "updated_at": "2024-03-01T12:00:00+02:00"}
        ]"#,
    )
    .unwrap();
    fs::write(dir.path().join("history.json"), "null").unwrap();

    let store = RequestStore::open_in(dir.path()).unwrap();
    let templates = store.list_templates();
    assert_eq!(templates[0].name, "alpha");
    assert_eq!(templates[1].name, "zeta");
    assert!(templates[1].request.headers.is_empty());
    assert!(templates[0].request.headers[0].enabled);
    assert!(store.list_history().is_empty());
}

#[test]
fn test_unparsable_history_with_fail_policy() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("history.json"), "{}").unwrap();

    let err = RequestStore::open(StoreConfig {
        corrupt_state: CorruptStatePolicy::Fail,
        ..StoreConfig::in_dir(dir.path())
    })
    .unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }));
    assert!(err.is_fatal());
    assert!(dir.path().join("history.json").exists());
}

#[test]
fn test_unparsable_history_starts_empty_by_default() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("history.json"), "{}").unwrap();

    let store = RequestStore::open_in(dir.path()).unwrap();
    assert!(store.list_history().is_empty());
    assert!(dir.path().join("history.json.corrupt").exists());
    assert!(!dir.path().join("history.json").exists());
}

#[test]
fn test_store_config_from_user_settings() {
    let dir = TempDir::new().unwrap();
    let settings = PercentmanConfig {
        history_limit: 2,
        data_dir: Some(dir.path().to_path_buf()),
        ..PercentmanConfig::default()
    };

    let store = RequestStore::open(StoreConfig::from(&settings)).unwrap();
    assert_eq!(store.data_dir(), dir.path());
    assert_eq!(store.history_limit(), 2);

    for _ in 0..3 {
        store.add_history(&sample_spec(), &sample_result()).unwrap();
    }
    assert_eq!(store.list_history().len(), 2);
}
