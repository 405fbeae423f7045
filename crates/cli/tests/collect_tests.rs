//! Integration tests for `audit-collector collect`.
//!
//! # Invariants
//! - A bare invocation streams raw events to stdout as NDJSON
//! - `--from/--to` are whole days in `--utc-offset`
//! - `--name` appends flattened records to `<LOGS_DIR>/<NAME>.log`

mod common;

use common::*;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/json"))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                sample_event("evt-1", "user_logged_in"),
                sample_event("evt-2", "user_granted_role")
            ],
            "meta": { "next": "page-2" }
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sample_event("evt-3", "user_logged_out")],
            "meta": { "next": null }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_bare_invocation_streams_raw_events_to_stdout() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let output = collector_cmd_with_base_url(&server.uri())
        .assert()
        .success()
        .stderr(predicate::str::contains("Collected 3 events (2 pages"))
        .get_output()
        .clone();

    let lines = json_lines(&output.stdout);
    assert_eq!(
        lines,
        vec![
            sample_event("evt-1", "user_logged_in"),
            sample_event("evt-2", "user_granted_role"),
            sample_event("evt-3", "user_logged_out"),
        ]
    );
}

#[tokio::test]
async fn test_record_format_on_stdout() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let output = collector_cmd_with_base_url(&server.uri())
        .args(["collect", "--format", "record"])
        .assert()
        .success()
        .get_output()
        .clone();

    let lines = json_lines(&output.stdout);
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        json!({
            "time": "2025-01-01T00:00:00.000Z",
            "action": "user_logged_in",
            "actor_name": "Ada Lovelace",
            "actor_email": "ada@example.com",
            "ip": "203.0.113.9",
            "event_id": "evt-1"
        })
    );
}

#[tokio::test]
async fn test_date_range_is_sent_as_epoch_millis() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("limit", "500"))
        .and(query_param("from", "1735657200000"))
        .and(query_param("to", "1735743599999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    collector_cmd_with_base_url(&server.uri())
        .args(["collect", "--from", "2025-01-01", "--to", "2025-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[tokio::test]
async fn test_utc_offset_and_page_size_flags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("limit", "25"))
        .and(query_param("from", "1735689600000"))
        .and(query_param_is_missing("to"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    collector_cmd_with_base_url(&server.uri())
        .args([
            "--page-size",
            "25",
            "collect",
            "--from",
            "2025-01-01",
            "--utc-offset",
            "Z",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_from_after_to_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&server)
        .await;

    collector_cmd_with_base_url(&server.uri())
        .args(["collect", "--from", "2025-02-01", "--to", "2025-01-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("must not be after"));
}

#[tokio::test]
async fn test_named_log_receives_records() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let logs_dir = dir.path().join("logs");

    collector_cmd_with_base_url(&server.uri())
        .args(["collect", "--name", "january.log", "--logs-dir"])
        .arg(&logs_dir)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Saved to"));

    let contents = std::fs::read(logs_dir.join("january.log")).unwrap();
    let records = json_lines(&contents);
    let ids: Vec<_> = records
        .iter()
        .map(|record| record["event_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["evt-1", "evt-2", "evt-3"]);
    assert_eq!(records[2]["action"], "user_logged_out");
}

#[tokio::test]
async fn test_named_log_is_appended_with_raw_format() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sample_event("evt-9", "api_token_created")]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    for _ in 0..2 {
        collector_cmd_with_base_url(&server.uri())
            .env("LOGS_DIR", dir.path())
            .args(["collect", "--name", "raw", "--format", "raw"])
            .assert()
            .success();
    }

    let contents = std::fs::read(dir.path().join("raw.log")).unwrap();
    assert_eq!(
        json_lines(&contents),
        vec![
            sample_event("evt-9", "api_token_created"),
            sample_event("evt-9", "api_token_created"),
        ]
    );
}

#[tokio::test]
async fn test_absolute_url_cursor_is_followed() {
    let server = MockServer::start().await;
    let next = format!("{}/org-test/events-stream?cursor=abs-2&limit=500", server.uri());

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sample_event("evt-1", "user_logged_in")],
            "links": { "next": next }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("cursor", "abs-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sample_event("evt-2", "user_logged_out")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = collector_cmd_with_base_url(&server.uri())
        .assert()
        .success()
        .get_output()
        .clone();
    assert_eq!(json_lines(&output.stdout).len(), 2);
}

#[tokio::test]
async fn test_non_ascii_utc_offset_is_a_config_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(0)
        .mount(&server)
        .await;

    collector_cmd_with_base_url(&server.uri())
        .args(["collect", "--from", "2025-01-01", "--utc-offset", "+1é1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid UTC offset"));
}
