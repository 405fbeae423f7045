//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ClientError and ConfigError to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-7 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use audit_client::ClientError;
use audit_config::ConfigError;

/// Structured exit codes for audit-collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Configuration error - missing credentials or invalid settings.
    ///
    /// Scripts should fix the environment or flags; retrying will not help.
    ConfigError = 2,

    /// Connection error - network, timeout, or DNS failure.
    ///
    /// Scripts may retry with exponential backoff.
    ConnectionError = 3,

    /// Authentication failure - the API rejected the token (HTTP 401/403).
    AuthenticationFailed = 4,

    /// Invalid response - the API answered with something that is not an events page.
    InvalidResponse = 5,

    /// Rate limited - HTTP 429 persisted through every retry.
    ///
    /// Scripts should back off and retry later.
    RateLimited = 6,

    /// Service unavailable - HTTP 502/503/504 persisted through every retry.
    ServiceUnavailable = 7,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ClientError> for ExitCode {
    /// Classifies by the last failure when retries were exhausted.
    fn from(err: &ClientError) -> Self {
        match err.root() {
            ClientError::Unauthorized(_) => ExitCode::AuthenticationFailed,

            ClientError::ConnectionRefused(_)
            | ClientError::Timeout(_)
            | ClientError::InvalidUrl(_) => ExitCode::ConnectionError,

            ClientError::InvalidResponse(_) => ExitCode::InvalidResponse,

            ClientError::RateLimited(_) => ExitCode::RateLimited,

            ClientError::ApiError {
                status: 502..=504, ..
            } => ExitCode::ServiceUnavailable,

            ClientError::MissingSetting(_) => ExitCode::ConfigError,

            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }

            ClientError::HttpError(_)
            | ClientError::ApiError { .. }
            | ClientError::NotFound(_)
            | ClientError::Sink(_)
            | ClientError::MaxRetriesExceeded(..) => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if cause.downcast_ref::<ConfigError>().is_some() {
                return ExitCode::ConfigError;
            }
        }

        ExitCode::GeneralError
    }
}
