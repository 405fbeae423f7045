//! Purpose: Organization events-stream endpoint.
//! Responsibilities: Build the events-stream request for a query or cursor and parse one page.
//! Non-scope: Pagination (see `collector`), retry pacing (see `request`).
//! Invariants/Assumptions: URL cursors are requested verbatim; token cursors reuse the original query.

use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::endpoints::request::{RetryPolicy, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::{EventQuery, EventsPage, FetchCursor};
use crate::stats::RequestStats;

/// Build `{base_url}/{org_id}/events-stream`.
pub fn events_url(base_url: &str, org_id: &str) -> String {
    format!("{}/{}/events-stream", base_url.trim_end_matches('/'), org_id)
}

/// Fetch one page of the events stream.
///
/// Without a cursor the request carries the query's `limit`/`from`/`to`.
/// A token cursor adds `cursor=<token>` to that query; a URL cursor is
/// requested as-is with no extra parameters.
#[allow(clippy::too_many_arguments)]
pub async fn fetch_events_page(
    client: &Client,
    base_url: &str,
    org_id: &str,
    api_token: &str,
    query: &EventQuery,
    cursor: Option<&FetchCursor>,
    policy: RetryPolicy,
    stats: Option<&RequestStats>,
) -> Result<EventsPage> {
    let builder = match cursor {
        None => client.get(events_url(base_url, org_id)).query(query),
        Some(FetchCursor::Token(token)) => client
            .get(events_url(base_url, org_id))
            .query(query)
            .query(&[("cursor", token.as_str())]),
        Some(FetchCursor::Url(url)) => client.get(url.as_str()),
    };
    let builder = builder
        .bearer_auth(api_token)
        .header(ACCEPT, "application/json");

    let response = send_request_with_retry(builder, policy, stats).await?;
    let url = response.url().to_string();
    let body = response.text().await?;

    if body.trim().is_empty() {
        debug!(%url, "Empty response body, treating as final page");
        return Ok(EventsPage::default());
    }

    serde_json::from_str(&body)
        .map_err(|e| ClientError::InvalidResponse(format!("events page from {url}: {e}")))
}
