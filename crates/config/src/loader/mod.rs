//! Configuration loader for `.env` files and environment variables.
//!
//! Responsibilities:
//! - Load configuration from `.env` files, environment variables, and builder overrides.
//! - Provide a builder-pattern `ConfigLoader` for layered configuration merging.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Invariants / Assumptions:
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - Values already present in the process environment win over `.env` values.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::{
    ENV_API_TOKEN, ENV_BASE_URL, ENV_LOGS_DIR, ENV_MAX_RETRIES, ENV_ORG_ID, ENV_PAGE_SIZE,
    ENV_REQUEST_TIMEOUT_SECONDS, ENV_RETRY_BASE_SECONDS, env_var_or_none,
};
pub use error::ConfigError;
