//! Executor tests against local HTTP servers.

use super::{test_executor, test_executor_with};
use mockito::Matcher;
use percentman::executor::ExecutionConfig;
use percentman::models::{HeaderEntry, RequestSpec};
use std::io::Read;
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
fn test_get_without_scheme_gets_http_prepended() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"users":[]}"#)
        .create();

    let spec = RequestSpec::new("GET", format!("{}/users", server.host_with_port()));
    let result = test_executor().execute(&spec);

    mock.assert();
    assert!(!result.is_error(), "unexpected error: {:?}", result.error);
    assert_eq!(result.status_code, 200);
    assert_eq!(result.status_line, "200 OK");
    assert_eq!(result.body, r#"{"users":[]}"#);
    assert_eq!(result.content_type(), Some("application/json"));
    assert!(result.elapsed > Duration::ZERO);
}

#[test]
fn test_disabled_header_is_not_sent() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .match_header("x-debug", Matcher::Missing)
        .match_header("accept", "text/plain")
        .with_status(204)
        .create();

    let spec = RequestSpec::new("GET", server.url())
        .with_header(HeaderEntry::new("Accept", "text/plain"))
        .with_header(HeaderEntry::disabled("X-Debug", "1"));
    let result = test_executor().execute(&spec);

    mock.assert();
    assert_eq!(result.status_code, 204);
    assert_eq!(result.status_line, "204 No Content");
    assert!(result.body.is_empty());
}

#[test]
fn test_body_without_content_type_is_sent_as_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/users")
        .match_header("content-type", "application/json")
        .match_body(r#"{"name":"Ada"}"#)
        .with_status(201)
        .create();

    let spec = RequestSpec::new("POST", format!("{}/users", server.url())).with_body(r#"{"name":"Ada"}"#);
    let result = test_executor().execute(&spec);

    mock.assert();
    assert_eq!(result.status_line, "201 Created");
}

#[test]
fn test_explicit_content_type_is_kept() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PUT", "/notes/1")
        .match_header("content-type", "text/plain")
        .match_body("plain words")
        .with_status(200)
        .create();

    let spec = RequestSpec::new("PUT", format!("{}/notes/1", server.url()))
        .with_header(HeaderEntry::new("content-type", "text/plain"))
        .with_body("plain words");
    test_executor().execute(&spec);

    mock.assert();
}

#[test]
fn test_empty_body_sends_no_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/items/3")
        .match_header("content-type", Matcher::Missing)
        .match_body("")
        .with_status(200)
        .create();

    let spec = RequestSpec::new("DELETE", format!("{}/items/3", server.url()));
    let result = test_executor().execute(&spec);

    mock.assert();
    assert_eq!(result.status_code, 200);
}

#[test]
fn test_later_header_row_wins() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .match_header("x-token", "second")
        .with_status(200)
        .create();

    let spec = RequestSpec::new("GET", server.url())
        .with_header(HeaderEntry::new("X-Token", "first"))
        .with_header(HeaderEntry::new("x-token", "second"));
    test_executor().execute(&spec);

    mock.assert();
}

#[test]
fn test_default_user_agent_and_request_override() {
    let mut server = mockito::Server::new();
    let default_ua = server
        .mock("GET", "/default")
        .match_header("user-agent", Matcher::Regex("^percentman/".to_string()))
        .with_status(200)
        .create();
    let custom_ua = server
        .mock("GET", "/custom")
        .match_header("user-agent", "probe/1.0")
        .with_status(200)
        .create();

    let executor = test_executor();
    executor.execute(&RequestSpec::new("GET", format!("{}/default", server.url())));
    executor.execute(
        &RequestSpec::new("GET", format!("{}/custom", server.url()))
            .with_header(HeaderEntry::new("User-Agent", "probe/1.0")),
    );

    default_ua.assert();
    custom_ua.assert();
}

#[test]
fn test_spec_is_not_modified_by_execute() {
    let mut server = mockito::Server::new();
    server.mock("POST", "/").with_status(200).create();

    let spec = RequestSpec::new("POST", server.host_with_port())
        .with_header(HeaderEntry::disabled("X-Off", "1"))
        .with_body("{}");
    let before = spec.clone();
    test_executor().execute(&spec);

    assert_eq!(spec, before);
    assert!(!spec.url.starts_with("http://"));
}

#[test]
fn test_error_status_is_not_an_execution_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/missing")
        .with_status(404)
        .with_body("not here")
        .create();

    let result = test_executor().execute(&RequestSpec::new("GET", format!("{}/missing", server.url())));

    assert!(!result.is_error());
    assert!(!result.is_success());
    assert_eq!(result.status_line, "404 Not Found");
    assert_eq!(result.body, "not here");
}

#[test]
fn test_repeated_response_headers_are_joined() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/")
        .with_status(200)
        .with_header("x-multi", "a")
        .with_header("x-multi", "b")
        .create();

    let result = test_executor().execute(&RequestSpec::new("GET", server.url()));
    assert_eq!(result.header("X-Multi"), Some("a, b"));
}

#[test]
fn test_invalid_utf8_body_is_replaced() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/")
        .with_status(200)
        .with_body(b"ok\xff".as_slice())
        .create();

    let result = test_executor().execute(&RequestSpec::new("GET", server.url()));
    assert!(!result.is_error());
    assert_eq!(result.body, "ok\u{FFFD}");
}

#[test]
fn test_redirects_followed_by_default() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/old")
        .with_status(302)
        .with_header("location", "/new")
        .create();
    server.mock("GET", "/new").with_status(200).with_body("moved").create();

    let result = test_executor().execute(&RequestSpec::new("GET", format!("{}/old", server.url())));
    assert_eq!(result.status_code, 200);
    assert_eq!(result.body, "moved");
}

#[test]
fn test_redirects_not_followed_when_disabled() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/old")
        .with_status(302)
        .with_header("location", "/new")
        .create();

    let executor = test_executor_with(ExecutionConfig {
        follow_redirects: false,
        ..ExecutionConfig::with_timeout(Duration::from_secs(5))
    });
    let result = executor.execute(&RequestSpec::new("GET", format!("{}/old", server.url())));

    assert_eq!(result.status_code, 302);
    assert_eq!(result.header("location"), Some("/new"));
}

#[test]
fn test_timeout_is_reported_with_elapsed() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            thread::sleep(Duration::from_secs(2));
        }
    });

    let executor = test_executor_with(ExecutionConfig::with_timeout(Duration::from_millis(300)));
    let result = executor.execute(&RequestSpec::new("GET", addr.to_string()));

    let error = result.error.as_deref().unwrap_or_default();
    assert!(error.starts_with("Request timed out"), "got {:?}", error);
    assert_eq!(result.status_code, 0);
    assert!(result.elapsed >= Duration::from_millis(300));
    server.join().unwrap();
}

#[test]
fn test_executor_is_shared_across_threads() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", Matcher::Regex(r"^/n/\d+$".to_string()))
        .with_status(200)
        .with_body("ok")
        .expect(8)
        .create();

    let executor = Arc::new(test_executor());
    let base = server.url();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let executor = Arc::clone(&executor);
            let url = format!("{}/n/{}", base, i);
            thread::spawn(move || executor.execute(&RequestSpec::new("GET", url)))
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert_eq!(result.body, "ok");
    }
    mock.assert();
}
