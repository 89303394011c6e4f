use serde::{Deserialize, Serialize};

pub mod bucket_result;
pub mod extractor;
pub mod object;

use crate::{ContentError, list::bucket_result::ListBucketResult};

/// Value of the `list-type` query parameter. Version 1 is requested by leaving it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Version2,
}
impl AsRef<str> for ListType {
    fn as_ref(&self) -> &str {
        match self {
            ListType::Version2 => "2",
        }
    }
}

/// One object in the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Never empty
    pub key: String,
    /// Passed through exactly as the server sent it
    pub last_modified: String,
    pub size: u64,
}

/// A view of a bucket listing, possibly merged from several pages.
///
/// The pagination fields always describe the most recently merged page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingResult {
    /// The endpoint the listing was requested from
    pub source_url: String,
    pub prefix: String,
    pub marker: String,
    pub next_marker: String,
    pub next_continuation_token: String,
    pub max_keys: u64,
    pub is_truncated: bool,
    /// In server order, pages concatenated in request order
    pub entries: Vec<Entry>,
}
impl ListingResult {
    pub fn new(source_url: impl Into<String>) -> Self {
        Self {
            source_url: source_url.into(),
            ..Default::default()
        }
    }
    /// Maps a decoded page into the canonical form.
    ///
    /// # Errors
    /// [ContentError::EmptyKey] if any `<Contents>` has an empty or missing `Key`.
    pub fn from_page(
        source_url: impl Into<String>,
        page: ListBucketResult,
    ) -> Result<Self, ContentError> {
        let entries = page
            .contents
            .into_iter()
            .enumerate()
            .map(|(index, object)| {
                if object.key.is_empty() {
                    return Err(ContentError::EmptyKey { index });
                }
                Ok(Entry {
                    key: object.key,
                    last_modified: object.last_modified,
                    size: object.size,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            source_url: source_url.into(),
            prefix: page.prefix.unwrap_or_default(),
            marker: page.marker.unwrap_or_default(),
            next_marker: page.next_marker.unwrap_or_default(),
            next_continuation_token: page.next_continuation_token.unwrap_or_default(),
            max_keys: page.max_keys.unwrap_or_default(),
            is_truncated: page.is_truncated,
            entries,
        })
    }
    /// Extracts, sanitizes and decodes a raw response body.
    ///
    /// The body may be the listing document itself or any markup wrapped around it.
    pub fn from_body(source_url: impl Into<String>, body: &str) -> Result<Self, ContentError> {
        let page = extractor::decode_listing(body)?;
        Self::from_page(source_url, page)
    }
    /// Appends the entries of `page` and takes over its pagination state.
    pub fn absorb(&mut self, page: ListingResult) {
        let ListingResult {
            source_url: _,
            prefix,
            marker,
            next_marker,
            next_continuation_token,
            max_keys,
            is_truncated,
            entries,
        } = page;
        self.prefix = prefix;
        self.marker = marker;
        self.next_marker = next_marker;
        self.next_continuation_token = next_continuation_token;
        self.max_keys = max_keys;
        self.is_truncated = is_truncated;
        self.entries.extend(entries);
    }
    pub fn last_key(&self) -> Option<&str> {
        self.entries.last().map(|entry| entry.key.as_str())
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Sum of all entry sizes
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size).sum()
    }
}
