//! Common test utilities for integration tests.
//!
//! This module provides shared helper functions and re-exports commonly used
//! types for testing the events-stream client. All integration tests should
//! use these utilities to ensure consistency.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Test clients never set a request timeout, so a paused Tokio clock cannot
//!   fire one while a mock response is in flight
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)
//! - Test-specific assertions or test logic

use std::time::Duration;

#[allow(unused_imports)]
pub use audit_client::testing::{load_fixture, sample_event};
#[allow(unused_imports)]
pub use audit_client::{
    AuditClient, AuditEvent, ClientError, CollectionSummary, Collector, EventQuery, FetchCursor,
};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ORG_ID: &str = "org-test";
pub const API_TOKEN: &str = "test-token";

/// Path of the events-stream endpoint for [`ORG_ID`] on a mock server.
#[allow(dead_code)]
pub const EVENTS_PATH: &str = "/org-test/events-stream";

/// Build a client against `server` with the given retry settings.
pub fn test_client(server: &MockServer, max_retries: usize, retry_base: Duration) -> AuditClient {
    AuditClient::builder()
        .base_url(server.uri())
        .org_id(ORG_ID.to_string())
        .api_token(secrecy::SecretString::new(API_TOKEN.to_string().into()))
        .max_retries(max_retries)
        .retry_base_delay(retry_base)
        .http_client(reqwest::Client::new())
        .build()
        .expect("test client should build")
}

/// Number of requests the mock server has seen.
#[allow(dead_code)]
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or_default()
}

/// Run a full collection into a vector sink.
#[allow(dead_code)]
pub async fn collect_all(
    client: &AuditClient,
    query: EventQuery,
) -> (Result<CollectionSummary, ClientError>, Vec<AuditEvent>) {
    let mut sink: Vec<AuditEvent> = Vec::new();
    let result = Collector::new(client, query).run(&mut sink).await;
    (result, sink)
}
