//! Events-stream API client.
//!
//! This module provides the [`AuditClient`] that holds the shared HTTP
//! connection pool, the organization being collected, its API token, and
//! the retry policy applied to every request.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Pagination across pages (handled by [`crate::collector::Collector`])

pub mod builder;

use secrecy::{ExposeSecret, SecretString};

use crate::endpoints::{self, RetryPolicy};
use crate::error::Result;
use crate::models::{EventQuery, EventsPage, FetchCursor};
use crate::stats::{RequestStats, StatsSnapshot};

/// Client for one organization's events stream.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use audit_client::AuditClient;
/// use secrecy::SecretString;
///
/// let client = AuditClient::builder()
///     .org_id("my-org".to_string())
///     .api_token(SecretString::new("my-token".to_string().into()))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct AuditClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) org_id: String,
    pub(crate) api_token: SecretString,
    pub(crate) retry: RetryPolicy,
    pub(crate) stats: RequestStats,
}

impl AuditClient {
    /// Create a new client builder.
    pub fn builder() -> builder::AuditClientBuilder {
        builder::AuditClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Request counters accumulated over the client's lifetime.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Fetch one page, starting from `cursor` or from the beginning of `query`.
    pub async fn fetch_page(
        &self,
        query: &EventQuery,
        cursor: Option<&FetchCursor>,
    ) -> Result<EventsPage> {
        endpoints::fetch_events_page(
            &self.http,
            &self.base_url,
            &self.org_id,
            self.api_token.expose_secret(),
            query,
            cursor,
            self.retry,
            Some(&self.stats),
        )
        .await
    }
}
