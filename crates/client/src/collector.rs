//! Paginated collection of the events stream.
//!
//! The [`Collector`] walks the events stream one page at a time, hands every
//! event to an [`EventSink`], and follows the next-page cursor until the API
//! stops returning one. Rate-limit pauses happen inside the request layer, so
//! from here a throttled page simply takes longer to arrive.
//!
//! Invariants:
//! - One request in flight at a time.
//! - Events reach the sink in page order, then in-page order.
//! - A page that hands back the cursor that produced it aborts the run.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::client::AuditClient;
use crate::error::{ClientError, Result};
use crate::models::{AuditEvent, EventQuery, FetchCursor};

/// Destination for collected events.
#[async_trait]
pub trait EventSink: Send {
    async fn emit(&mut self, event: AuditEvent) -> Result<()>;

    /// Called once after the last event. Buffered sinks write out here.
    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl EventSink for Vec<AuditEvent> {
    async fn emit(&mut self, event: AuditEvent) -> Result<()> {
        self.push(event);
        Ok(())
    }
}

/// Counters reported when a collection run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub pages: usize,
    pub events: usize,
    /// Requests sent, retries included.
    pub requests: usize,
    pub rate_limit_pauses: usize,
}

/// Drives one collection run over a query.
#[derive(Debug)]
pub struct Collector<'a> {
    client: &'a AuditClient,
    query: EventQuery,
}

impl<'a> Collector<'a> {
    pub fn new(client: &'a AuditClient, query: EventQuery) -> Self {
        Self { client, query }
    }

    /// Fetch every page and emit its events into `sink`.
    ///
    /// # Errors
    ///
    /// Propagates request failures (after retries), sink failures, and
    /// `ClientError::InvalidResponse` when the cursor stops advancing.
    pub async fn run<S>(&self, sink: &mut S) -> Result<CollectionSummary>
    where
        S: EventSink + ?Sized,
    {
        let mut summary = CollectionSummary::default();
        let mut cursor: Option<FetchCursor> = None;
        let baseline = self.client.stats();

        info!(
            org_id = %self.client.org_id(),
            limit = self.query.limit,
            from = ?self.query.from,
            to = ?self.query.to,
            "Starting collection"
        );

        loop {
            let page = self.client.fetch_page(&self.query, cursor.as_ref()).await?;
            let next = page.next_cursor();
            summary.pages += 1;

            debug!(
                page = summary.pages,
                events = page.data.len(),
                has_next = next.is_some(),
                "Received page"
            );

            for event in page.data {
                sink.emit(event).await?;
                summary.events += 1;
            }

            match next {
                None => break,
                Some(next) if cursor.as_ref() == Some(&next) => {
                    return Err(ClientError::InvalidResponse(format!(
                        "cursor did not advance after page {}",
                        summary.pages
                    )));
                }
                Some(next) => cursor = Some(next),
            }
        }

        sink.finish().await?;
        let traffic = self.client.stats().since(&baseline);
        summary.requests = traffic.requests;
        summary.rate_limit_pauses = traffic.rate_limit_pauses;
        info!(
            pages = summary.pages,
            events = summary.events,
            requests = summary.requests,
            rate_limit_pauses = summary.rate_limit_pauses,
            "Collection complete"
        );
        Ok(summary)
    }
}
