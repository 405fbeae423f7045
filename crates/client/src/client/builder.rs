//! Client builder for constructing [`AuditClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (org_id, api_token)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, redirects)
//!
//! # Invariants
//! - `org_id` and `api_token` must be provided before calling `build()`
//! - The base URL is always normalized to have no trailing slashes
//! - A caller-supplied `http_client` is used as-is; `timeout` then has no effect

use std::time::Duration;

use audit_config::{
    Config,
    constants::{
        DEFAULT_BASE_URL, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_SECS,
        DEFAULT_TIMEOUT_SECS,
    },
};
use secrecy::SecretString;

use crate::client::AuditClient;
use crate::endpoints::RetryPolicy;
use crate::error::{ClientError, Result};
use crate::stats::RequestStats;

/// Builder for creating a new [`AuditClient`].
///
/// Every option except `org_id` and `api_token` has a default matching the
/// configuration crate's defaults.
pub struct AuditClientBuilder {
    base_url: String,
    org_id: Option<String>,
    api_token: Option<SecretString>,
    timeout: Duration,
    max_retries: usize,
    retry_base_delay: Duration,
    http_client: Option<reqwest::Client>,
}

impl Default for AuditClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            org_id: None,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_secs(DEFAULT_RETRY_BASE_SECS),
            http_client: None,
        }
    }
}

impl AuditClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the organizations API base URL. Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    pub fn org_id(mut self, org_id: String) -> Self {
        self.org_id = Some(org_id);
        self
    }

    pub fn api_token(mut self, token: SecretString) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Set the per-request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries after the first attempt.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base of the exponential backoff used when the server gives no `Retry-After`.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Use an existing HTTP client instead of building one.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Create a client builder from configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = config.connection.base_url.clone();
        self.org_id = Some(config.auth.org_id.clone());
        self.api_token = Some(config.auth.api_token.clone());
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.retry_base_delay = config.connection.retry_base_delay;
        self
    }

    /// Build the [`AuditClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingSetting`] if `org_id` or `api_token` was not provided.
    /// Returns [`ClientError::InvalidUrl`] if the base URL is empty.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<AuditClient> {
        let org_id = self
            .org_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(ClientError::MissingSetting("org_id"))?;
        let api_token = self
            .api_token
            .ok_or(ClientError::MissingSetting("api_token"))?;

        let base_url = self.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is empty".to_string()));
        }

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
                .build()?,
        };

        Ok(AuditClient {
            http,
            base_url,
            org_id,
            api_token,
            retry: RetryPolicy::new(self.max_retries, self.retry_base_delay),
            stats: RequestStats::new(),
        })
    }
}
