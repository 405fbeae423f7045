//! Retry helper for HTTP requests with server-directed and exponential backoff.
//!
//! This module retries requests that fail with HTTP 429 (Too Many Requests),
//! transient gateway statuses, or transport timeouts and connect failures.
//! A `Retry-After` header on a 429 is obeyed exactly; otherwise the delay
//! doubles from the configured base on every attempt.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::stats::RequestStats;

/// Longest error body echoed into an error message.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Bounds and pacing for retried requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: usize,
    /// Delay before the first retry when the server gives no `Retry-After`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: usize, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Exponential fallback delay after the given 1-based attempt:
    /// `base_delay * 2^(attempt - 1)`, saturating instead of overflowing.
    pub fn backoff(&self, attempt: usize) -> Duration {
        let exponent = attempt.saturating_sub(1).min(u32::MAX as usize) as u32;
        let factor = 2u32.checked_pow(exponent).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Delay to wait after `err` on the given 1-based attempt.
    fn delay_for(&self, err: &ClientError, attempt: usize) -> Duration {
        match err {
            ClientError::RateLimited(Some(wait)) => *wait,
            _ => self.backoff(attempt),
        }
    }
}

/// Parse a `Retry-After` value.
///
/// Accepts delta-seconds (`"120"`) and HTTP-dates
/// (`"Wed, 21 Oct 2015 07:28:00 GMT"`). Dates in the past yield a zero wait.
/// Returns `None` for anything else.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let value = value.trim();
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return value.parse::<u64>().ok().map(Duration::from_secs);
    }

    let date = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let remaining = date.with_timezone(&chrono::Utc) - chrono::Utc::now();
    Some(remaining.to_std().unwrap_or(Duration::ZERO))
}

/// Sends an HTTP request with automatic retry.
///
/// - HTTP 429 waits for `Retry-After` when present and parseable, otherwise
///   for the policy's exponential backoff.
/// - HTTP 502/503/504 and transport timeouts/connect failures wait for the
///   exponential backoff.
/// - At most `policy.max_retries` retries follow the first attempt.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` carrying the attempt count and
/// the last failure when retries are exhausted. Non-retryable statuses are
/// returned immediately (`Unauthorized`, `NotFound`, `ApiError`).
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    policy: RetryPolicy,
    stats: Option<&RequestStats>,
) -> Result<Response> {
    let mut attempt = 0usize;

    loop {
        attempt += 1;
        if let Some(stats) = stats {
            stats.record_request();
        }

        let request = match builder.try_clone() {
            Some(cloned) => cloned,
            None => {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await.map_err(ClientError::HttpError)?;
                return check_response(response).await;
            }
        };

        let outcome = match request.send().await {
            Ok(response) => check_response(response).await,
            Err(e) => {
                let url = e.url().map(|u| u.to_string()).unwrap_or_default();
                Err(ClientError::from_transport(e, &url))
            }
        };

        let err = match outcome {
            Ok(response) => {
                if attempt > 1 {
                    debug!(attempt, "Request succeeded after retry");
                }
                return Ok(response);
            }
            Err(e) if e.is_retryable() => e,
            Err(e) => return Err(e),
        };

        if attempt > policy.max_retries {
            warn!(attempts = attempt, error = %err, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded(attempt, Box::new(err)));
        }

        let delay = policy.delay_for(&err, attempt);
        if let Some(stats) = stats {
            stats.record_retry(matches!(err, ClientError::RateLimited(_)));
        }
        match &err {
            ClientError::RateLimited(retry_after) => warn!(
                attempt,
                max_attempts = policy.max_retries + 1,
                wait_secs = delay.as_secs_f64(),
                server_directed = retry_after.is_some(),
                "Rate limited (HTTP 429), waiting before retry"
            ),
            other => warn!(
                attempt,
                max_attempts = policy.max_retries + 1,
                wait_secs = delay.as_secs_f64(),
                error = %other,
                "Transient failure, retrying with exponential backoff"
            ),
        }

        tokio::time::sleep(delay).await;
    }
}

/// Turn a non-success response into the matching error.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|h| h.to_str().ok())
            .and_then(parse_retry_after);
        return Err(ClientError::RateLimited(retry_after));
    }

    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());
    let message = error_message(&body);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ClientError::Unauthorized(format!("{} at {url}: {message}", status.as_u16()))
        }
        StatusCode::NOT_FOUND => ClientError::NotFound(url),
        _ => ClientError::ApiError {
            status: status.as_u16(),
            url,
            message,
        },
    })
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Summarize an error body, preferring the API's structured error list.
fn error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        let details: Vec<String> = parsed
            .errors
            .iter()
            .filter_map(|e| match (&e.title, &e.detail) {
                (Some(t), Some(d)) => Some(format!("{t}: {d}")),
                (Some(s), None) | (None, Some(s)) => Some(s.clone()),
                (None, None) => None,
            })
            .collect();
        if !details.is_empty() {
            return details.join("; ");
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }

    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
