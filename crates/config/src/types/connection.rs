//! Connection configuration types for the audit collector.
//!
//! Responsibilities:
//! - Define connection settings (URL, timeouts, retries, backoff base).
//! - Define the main `Config` structure combining connection, auth, and collection.
//! - Provide serialization helpers for `Duration`.
//!
//! Does NOT handle:
//! - Configuration loading from env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - All duration fields are serialized as seconds (integers).
//! - Default values come from `constants`, not magic numbers.

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_BASE_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::types::auth::AuthConfig;
use crate::types::collection::CollectionConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Module for serializing Duration as seconds (integer).
mod duration_seconds {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Connection settings for the events-stream API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Base URL of the organizations API, without trailing slash
    /// (e.g. https://api.atlassian.com/admin/v1/orgs)
    pub base_url: String,
    /// Per-request timeout (serialized as seconds)
    #[serde(with = "duration_seconds")]
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited or transient failures
    pub max_retries: usize,
    /// Base delay for exponential backoff when the server gives no Retry-After
    #[serde(with = "duration_seconds")]
    pub retry_base_delay: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_secs(DEFAULT_RETRY_BASE_SECS),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
}

impl Config {
    /// Create a config with default connection and collection settings.
    pub fn with_credentials(org_id: String, api_token: secrecy::SecretString) -> Self {
        Self {
            connection: ConnectionConfig::default(),
            auth: AuthConfig { org_id, api_token },
            collection: CollectionConfig::default(),
        }
    }
}
