//! Testing utilities for events-stream client tests.
//!
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use audit_client::testing::load_fixture;
//!
//! let page = load_fixture("events/page_with_cursor.json");
//! ```

use std::path::Path;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Arguments
/// * `fixture_path` - Relative path within the fixtures directory (e.g., "events/last_page.json")
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> serde_json::Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// Build an event shaped like the events-stream payload.
pub fn sample_event(id: &str, action: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "events",
        "attributes": {
            "time": "2025-03-04T05:06:07.890Z",
            "action": action,
            "actor": {
                "id": "actor-1",
                "name": "Test User",
                "email": "test.user@example.com"
            },
            "location": { "ip": "198.51.100.23" }
        }
    })
}
