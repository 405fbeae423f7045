//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse the collector's environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//! - Provide helper functions for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Building the final Config (see builder.rs).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const ENV_ORG_ID: &str = "ORG_ID";
pub const ENV_API_TOKEN: &str = "API_TOKEN";
pub const ENV_BASE_URL: &str = "API_BASE_URL";
pub const ENV_PAGE_SIZE: &str = "PAGE_SIZE";
pub const ENV_MAX_RETRIES: &str = "MAX_RETRIES";
pub const ENV_RETRY_BASE_SECONDS: &str = "RETRY_BASE_SECONDS";
pub const ENV_REQUEST_TIMEOUT_SECONDS: &str = "REQUEST_TIMEOUT_SECONDS";
pub const ENV_LOGS_DIR: &str = "LOGS_DIR";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_var<T: FromStr>(var: &str, raw: &str, message: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        message: message.to_string(),
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(org_id) = env_var_or_none(ENV_ORG_ID) {
        loader.set_org_id(Some(org_id));
    }
    if let Some(token) = env_var_or_none(ENV_API_TOKEN) {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if let Some(url) = env_var_or_none(ENV_BASE_URL) {
        loader.set_base_url(Some(url));
    }
    if let Some(size) = env_var_or_none(ENV_PAGE_SIZE) {
        let value: u32 = parse_var(ENV_PAGE_SIZE, &size, "must be a positive integer")?;
        loader.set_page_size(Some(value));
    }
    if let Some(retries) = env_var_or_none(ENV_MAX_RETRIES) {
        let value: usize = parse_var(ENV_MAX_RETRIES, &retries, "must be a non-negative integer")?;
        loader.set_max_retries(Some(value));
    }
    if let Some(base) = env_var_or_none(ENV_RETRY_BASE_SECONDS) {
        let secs: u64 = parse_var(ENV_RETRY_BASE_SECONDS, &base, "must be a number")?;
        loader.set_retry_base_delay(Some(Duration::from_secs(secs)));
    }
    if let Some(timeout) = env_var_or_none(ENV_REQUEST_TIMEOUT_SECONDS) {
        let secs: u64 = parse_var(ENV_REQUEST_TIMEOUT_SECONDS, &timeout, "must be a number")?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(dir) = env_var_or_none(ENV_LOGS_DIR) {
        loader.set_logs_dir(Some(PathBuf::from(dir)));
    }

    Ok(())
}
