//! Shared test utilities for audit-collector integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide canned events-stream pages.
//!
//! Invariants / Assumptions:
//! - `ORG_ID` is "org-test" and `API_TOKEN` is "test-token" unless overridden.
//! - Retries are fast: zero base delay and a single retry.

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{Value, json};

pub const ORG_ID: &str = "org-test";
pub const API_TOKEN: &str = "test-token";
pub const EVENTS_PATH: &str = "/org-test/events-stream";

/// Returns a hermetic `audit-collector` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Credentials are set to dummy values to satisfy config validation.
/// - Other configuration env vars are cleared to ensure no leakage from the host.
pub fn collector_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("audit-collector");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    cmd.env("ORG_ID", ORG_ID).env("API_TOKEN", API_TOKEN);
    cmd.env("MAX_RETRIES", "1").env("RETRY_BASE_SECONDS", "0");

    // Clear potential host leakage
    cmd.env_remove("API_BASE_URL")
        .env_remove("PAGE_SIZE")
        .env_remove("REQUEST_TIMEOUT_SECONDS")
        .env_remove("LOGS_DIR")
        .env_remove("RUST_LOG");

    cmd
}

/// Hermetic command pointed at a mock server.
pub fn collector_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = collector_cmd();
    cmd.env("API_BASE_URL", base_url);
    cmd
}

pub fn sample_event(id: &str, action: &str) -> Value {
    json!({
        "id": id,
        "type": "events",
        "attributes": {
            "time": "2025-01-01T00:00:00.000Z",
            "action": action,
            "actor": { "id": "u-1", "name": "Ada Lovelace", "email": "ada@example.com" },
            "location": { "ip": "203.0.113.9" }
        }
    })
}

/// Parse newline-delimited JSON output.
pub fn json_lines(output: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(output)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect()
}
