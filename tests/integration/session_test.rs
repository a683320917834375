//! Session workflows: send, record, save and replay.

use super::{temp_store, test_executor};
use percentman::models::{HeaderEntry, RequestSpec};
use percentman::session::Session;
use std::net::TcpListener;

#[test]
fn test_successful_send_is_recorded() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create();

    let (_dir, store) = temp_store();
    let mut session = Session::new(test_executor(), store.clone());
    *session.current_mut() = RequestSpec::new("GET", format!("{}/health", server.host_with_port()));

    let dispatch = session.send();
    assert!(!dispatch.response.is_error());
    assert!(dispatch.record_error.is_none());

    let entry = dispatch.recorded.unwrap();
    assert_eq!(store.list_history(), vec![entry.clone()]);
    assert_eq!(entry.request.url, session.current().url);
    assert_eq!(entry.response.body, r#"{"ok":true}"#);
}

#[test]
fn test_http_error_status_is_still_recorded() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/boom").with_status(500).create();

    let (_dir, store) = temp_store();
    let mut session = Session::new(test_executor(), store.clone());
    *session.current_mut() = RequestSpec::new("GET", format!("{}/boom", server.url()));

    let dispatch = session.send();
    assert_eq!(dispatch.response.status_code, 500);
    assert!(dispatch.recorded.is_some());
    assert_eq!(store.list_history().len(), 1);
}

#[test]
fn test_transport_failure_is_not_recorded() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };

    let (_dir, store) = temp_store();
    let mut session = Session::new(test_executor(), store.clone());
    *session.current_mut() = RequestSpec::new("GET", format!("http://{}/", addr));

    let dispatch = session.send();
    assert!(dispatch.response.is_error());
    assert!(dispatch.recorded.is_none());
    assert!(store.list_history().is_empty());
}

#[test]
fn test_template_round_trip_and_replay() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/users")
        .match_header("accept", "application/json")
        .match_body(r#"{"name":"Ada"}"#)
        .with_status(201)
        .expect(2)
        .create();

    let (_dir, store) = temp_store();
    let mut session = Session::new(test_executor(), store.clone());
    *session.current_mut() = RequestSpec::new("POST", format!("{}/users", server.url()))
        .with_header(HeaderEntry::new("Accept", "application/json"))
        .with_body(r#"{"name":"Ada"}"#);
    let template = session.save_as_template("Create user").unwrap();

    session.replace(RequestSpec::default());
    assert!(session.load_template(&template.id));
    let first = session.send().recorded.unwrap();

    session.replace(RequestSpec::default());
    assert!(session.load_history_entry(&first.id));
    let second = session.send().recorded.unwrap();

    mock.assert();
    assert_ne!(first.id, second.id);
    assert_eq!(first.request, second.request);
    let history = store.list_history();
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);
}
