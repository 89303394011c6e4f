use std::collections::HashSet;

use s3viewer_types::list::{ListType, ListingResult};
use tracing::debug;
use url::Url;

/// Query parameters owned by pagination. Replaced on every page, everything else is kept.
const PAGINATION_PARAMETERS: [&str; 4] =
    ["list-type", "continuation-token", "marker", "start-after"];

/// A way of asking the server for the page after the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPageStrategy {
    /// ListObjectsV2: `list-type=2&continuation-token=<NextContinuationToken>`
    ContinuationToken,
    /// ListObjects (v1): `marker=<key of the last entry>`
    ///
    /// `NextMarker` is ignored even when present. It is frequently empty or stale and
    /// the last key is the only value guaranteed to move forward. Servers that leave
    /// `NextMarker` out of the schema entirely usually still honor `marker`.
    LastKeyMarker,
}
impl NextPageStrategy {
    /// Evaluation order. The v2 token wins whenever the server offers one.
    pub const ORDERED: [NextPageStrategy; 2] = [
        NextPageStrategy::ContinuationToken,
        NextPageStrategy::LastKeyMarker,
    ];
    pub fn name(&self) -> &'static str {
        match self {
            NextPageStrategy::ContinuationToken => "ContinuationToken",
            NextPageStrategy::LastKeyMarker => "LastKeyMarker",
        }
    }
    /// The URL this strategy would request next, if the page gives it anything to work with.
    pub fn candidate(&self, current: &Url, page: &ListingResult) -> Option<Url> {
        match self {
            NextPageStrategy::ContinuationToken => {
                if page.next_continuation_token.is_empty() {
                    return None;
                }
                let mut url = without_pagination(current);
                url.query_pairs_mut()
                    .append_pair("list-type", ListType::Version2.as_ref())
                    .append_pair("continuation-token", &page.next_continuation_token);
                Some(url)
            }
            NextPageStrategy::LastKeyMarker => {
                let last_key = page.last_key()?;
                if page.next_marker.is_empty() {
                    debug!(last_key, "No NextMarker, deriving marker from last key");
                }
                let mut url = without_pagination(current);
                url.query_pairs_mut().append_pair("marker", last_key);
                Some(url)
            }
        }
    }
}
/// Asks the strategies in [NextPageStrategy::ORDERED] for a URL. The first one that has
/// something to build on decides.
///
/// `requested` must contain `current`. `None` means the target cannot be paginated any
/// further: the page gave nothing to build on, or the deciding candidate was already
/// requested because the server ignores the parameters and keeps answering with the
/// same page. A repeated token never falls back to the marker.
pub fn next_page_url(
    current: &Url,
    page: &ListingResult,
    requested: &HashSet<Url>,
) -> Option<(NextPageStrategy, Url)> {
    let (strategy, url) = NextPageStrategy::ORDERED
        .into_iter()
        .find_map(|strategy| Some((strategy, strategy.candidate(current, page)?)))?;
    if &url == current || requested.contains(&url) {
        debug!(strategy = strategy.name(), %url, "Candidate was already requested");
        return None;
    }
    Some((strategy, url))
}
fn without_pagination(current: &Url) -> Url {
    let retained: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(key, _)| !PAGINATION_PARAMETERS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = current.clone();
    url.set_query(None);
    if !retained.is_empty() {
        url.query_pairs_mut().extend_pairs(retained);
    }
    url
}
