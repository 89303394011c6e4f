//! Page by page crawl of a bucket listing.
//!
//! Pages are strictly sequential, every next URL is derived from the page before it.
//! The crawl stops when the server reports the listing complete, when the page budget
//! is spent, or when no URL that makes forward progress can be built. None of those are
//! errors. Any failed page aborts the whole session and nothing accumulated so far is
//! returned.
use std::{collections::HashSet, fmt::Display};

use s3viewer_types::list::ListingResult;
use tracing::{Instrument, debug, info, warn};
use url::Url;

pub mod strategy;
pub use strategy::{NextPageStrategy, next_page_url};

use crate::{
    S3ViewerError, S3ViewerResult,
    client::{ListingClient, http_client::HttpClient},
};

/// Why a listing session ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page said `IsTruncated` false
    NotTruncated,
    /// `max_pages` pages were fetched and the listing is still truncated
    PageBudget,
    /// The listing is truncated but no new URL could be built. Typically a CDN that
    /// caches or ignores query parameters.
    PaginationUnsupported,
}
impl Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            StopReason::NotTruncated => "listing complete",
            StopReason::PageBudget => "page budget reached",
            StopReason::PaginationUnsupported => "pagination unsupported",
        };
        f.write_str(reason)
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSummary {
    pub pages_fetched: usize,
    pub stop_reason: StopReason,
}
/// What the session wants after a page has been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    Fetch(Url),
    Done(StopReason),
}
/// Accumulated state of one listing session.
///
/// Owns no I/O. The driver feeds it decoded pages and it decides what to request next.
#[derive(Debug)]
pub struct ListingSession {
    result: ListingResult,
    current_url: Url,
    requested: HashSet<Url>,
    pages_fetched: usize,
    max_pages: usize,
}
impl ListingSession {
    /// A `max_pages` of 0 is treated as 1.
    pub fn new(url: Url, max_pages: usize) -> Self {
        Self {
            result: ListingResult::new(url.as_str()),
            requested: HashSet::from([url.clone()]),
            current_url: url,
            pages_fetched: 0,
            max_pages: max_pages.max(1),
        }
    }
    pub fn current_url(&self) -> &Url {
        &self.current_url
    }
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
    pub fn result(&self) -> &ListingResult {
        &self.result
    }
    /// Merges the page fetched from [Self::current_url] and decides the next step.
    pub fn accumulate(&mut self, page: ListingResult) -> NextStep {
        self.pages_fetched += 1;
        info!(
            page = self.pages_fetched,
            entries = page.len(),
            is_truncated = page.is_truncated,
            "Fetched page"
        );
        let next = if !page.is_truncated {
            NextStep::Done(StopReason::NotTruncated)
        } else if self.pages_fetched >= self.max_pages {
            debug!(max_pages = self.max_pages, "Page budget reached");
            NextStep::Done(StopReason::PageBudget)
        } else {
            match next_page_url(&self.current_url, &page, &self.requested) {
                Some((strategy, url)) => {
                    debug!(strategy = strategy.name(), %url, "Next page");
                    NextStep::Fetch(url)
                }
                None => {
                    warn!(
                        url = %self.current_url,
                        entries = page.len(),
                        "Listing is truncated but the server does not seem to support pagination, stopping"
                    );
                    NextStep::Done(StopReason::PaginationUnsupported)
                }
            }
        };
        self.result.absorb(page);
        if let NextStep::Fetch(url) = &next {
            self.requested.insert(url.clone());
            self.current_url = url.clone();
        }
        next
    }
    pub fn finish(self, stop_reason: StopReason) -> (ListingResult, ListingSummary) {
        let summary = ListingSummary {
            pages_fetched: self.pages_fetched,
            stop_reason,
        };
        info!(
            entries = self.result.len(),
            pages = summary.pages_fetched,
            %stop_reason,
            "Listing finished"
        );
        (self.result, summary)
    }
}

impl<Client: HttpClient> ListingClient<Client> {
    /// Fetches up to `max_pages` pages starting at `url` and merges them.
    ///
    /// A `max_pages` of 0 is treated as 1, which disables pagination.
    pub async fn fetch_all(&self, url: &Url, max_pages: usize) -> S3ViewerResult<ListingResult> {
        let (result, _) = self.fetch_all_with_summary(url, max_pages).await?;
        Ok(result)
    }
    /// [Self::fetch_all] that also reports how many pages were fetched and why it stopped.
    pub async fn fetch_all_with_summary(
        &self,
        url: &Url,
        max_pages: usize,
    ) -> S3ViewerResult<(ListingResult, ListingSummary)> {
        let span = tracing::info_span!("Listing", %url, max_pages);
        async move {
            let mut session = ListingSession::new(url.clone(), max_pages);
            loop {
                let page = match self.fetch_page(session.current_url()).await {
                    Ok(page) => page,
                    Err(error) => {
                        let (status, timed_out) = match &error {
                            S3ViewerError::Transport(transport) => (
                                transport.status().map(|status| status.as_u16()),
                                transport.is_timeout(),
                            ),
                            _ => (None, false),
                        };
                        warn!(
                            url = %session.current_url(),
                            pages_fetched = session.pages_fetched(),
                            ?status,
                            timed_out,
                            %error,
                            "Listing aborted"
                        );
                        return Err(error);
                    }
                };
                match session.accumulate(page) {
                    NextStep::Fetch(_) => continue,
                    NextStep::Done(reason) => return Ok(session.finish(reason)),
                }
            }
        }
        .instrument(span)
        .await
    }
}
