//! Centralized constants for the audit collector workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default base URL of the organizations API. The organization id and the
/// events-stream path are appended to it.
pub const DEFAULT_BASE_URL: &str = "https://api.atlassian.com/admin/v1/orgs";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default maximum number of retries for failed or rate-limited requests.
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Default base delay for exponential backoff in seconds (3s, 6s, 12s, ...).
pub const DEFAULT_RETRY_BASE_SECS: u64 = 3;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Bounds
// =============================================================================

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed retry count.
pub const MAX_MAX_RETRIES: usize = 10;

/// Maximum allowed backoff base in seconds.
pub const MAX_RETRY_BASE_SECS: u64 = 300;

// =============================================================================
// Collection Defaults
// =============================================================================

/// Default number of events requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Default directory for JSON-lines event logs.
pub const DEFAULT_LOGS_DIR: &str = "./logs";

/// Default UTC offset used to turn calendar dates into epoch milliseconds.
pub const DEFAULT_UTC_OFFSET: &str = "+09:00";
