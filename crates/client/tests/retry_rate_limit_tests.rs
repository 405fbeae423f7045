//! Rate limiting (HTTP 429) retry tests.
//!
//! These run on a paused Tokio clock, so waits complete instantly in real
//! time while `tokio::time::Instant` still measures the virtual delay.
//!
//! # Invariants
//! - After a 429 with `Retry-After: N`, the next request is not sent before N seconds
//! - Without a usable `Retry-After`, the wait is `base * 2^(attempt - 1)`
//! - Retries are bounded; exhaustion surfaces `MaxRetriesExceeded` with the last error
//!
//! # What this does NOT handle
//! - Non-429 failures (see retry_tests.rs)

mod common;

use common::*;
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};

#[tokio::test(start_paused = true)]
async fn test_retry_after_then_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "5"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5, Duration::from_secs(1));
    let started = Instant::now();
    let (result, events) = collect_all(&client, EventQuery::new(500)).await;

    assert!(
        started.elapsed() >= Duration::from_secs(5),
        "second request must wait for Retry-After, waited {:?}",
        started.elapsed()
    );
    let summary = result.expect("collection should succeed after the pause");
    assert!(events.is_empty());
    assert_eq!(summary.pages, 1);
    assert_eq!(summary.requests, 2);
    assert_eq!(summary.rate_limit_pauses, 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_after_overrides_exponential_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sample_event("after-wait", "user_logged_in")]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5, Duration::from_secs(1));
    let started = Instant::now();
    let (result, events) = collect_all(&client, EventQuery::new(500)).await;

    assert!(started.elapsed() >= Duration::from_secs(14));
    assert_eq!(result.expect("should succeed").rate_limit_pauses, 2);
    assert_eq!(events.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_missing_retry_after_uses_exponential_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5, Duration::from_secs(3));
    let started = Instant::now();
    let (result, _) = collect_all(&client, EventQuery::new(500)).await;

    result.expect("should succeed after two backoffs");
    // 3s after the first attempt, 6s after the second.
    assert!(started.elapsed() >= Duration::from_secs(9));
    assert_eq!(request_count(&mock_server).await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_unparseable_retry_after_falls_back_to_backoff() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "later"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 5, Duration::from_secs(4));
    let started = Instant::now();
    let (result, _) = collect_all(&client, EventQuery::new(500)).await;

    result.expect("should succeed");
    assert!(started.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_past_http_date_retries_without_failing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(
            ResponseTemplate::new(429).insert_header("Retry-After", "Wed, 21 Oct 2015 07:28:00 GMT"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 1, Duration::from_secs(60));
    let (result, _) = collect_all(&client, EventQuery::new(500)).await;

    assert_eq!(result.expect("should succeed").rate_limit_pauses, 1);
    assert_eq!(request_count(&mock_server).await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 2, Duration::from_secs(2));
    let started = Instant::now();
    let (result, events) = collect_all(&client, EventQuery::new(500)).await;

    match result {
        Err(ClientError::MaxRetriesExceeded(attempts, last)) => {
            assert_eq!(attempts, 3);
            assert!(matches!(*last, ClientError::RateLimited(None)));
        }
        other => panic!("expected MaxRetriesExceeded, got {other:?}"),
    }
    assert!(events.is_empty());
    assert!(started.elapsed() >= Duration::from_secs(6));
    assert_eq!(request_count(&mock_server).await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_zero_retries_fails_on_first_429() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "30"))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 0, Duration::from_secs(1));
    let (result, _) = collect_all(&client, EventQuery::new(500)).await;

    match result {
        Err(ClientError::MaxRetriesExceeded(1, last)) => {
            assert!(matches!(*last, ClientError::RateLimited(Some(d)) if d == Duration::from_secs(30)));
        }
        other => panic!("expected MaxRetriesExceeded, got {other:?}"),
    }
    assert_eq!(request_count(&mock_server).await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_mid_pagination_resumes_same_cursor() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param_is_missing("cursor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sample_event("p1", "user_logged_in")],
            "meta": { "next": "c2" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(query_param("cursor", "c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [sample_event("p2", "user_logged_out")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server, 3, Duration::from_secs(1));
    let started = Instant::now();
    let (result, events) = collect_all(&client, EventQuery::new(500)).await;

    let summary = result.expect("should succeed");
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.requests, 3);
    let ids: Vec<_> = events.iter().filter_map(AuditEvent::id).collect();
    assert_eq!(ids, ["p1", "p2"]);
}
