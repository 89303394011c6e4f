//! Bucket listing documents as they appear on the wire, and the canonical
//! [ListingResult](list::ListingResult) they are decoded into.
//!
//! Decoding a response body is a pipeline of pure steps:
//! [find_listing_document](list::extractor::find_listing_document) →
//! [sanitize_entities](utils::sanitize_entities) →
//! [DataExtract::extract_data] → [ListingResult::from_page](list::ListingResult::from_page).
use std::io::BufRead;

use thiserror::Error;

pub mod error;
pub mod list;
pub mod utils;

use crate::error::ErrorDocument;

#[derive(Debug, Error)]
pub enum ContentError {
    /// The body does not contain a `ListBucketResult` element.
    ///
    /// Usually an access denied page or a target that is not an object store at all.
    #[error("no bucket listing found in response{}", describe_error_document(.error.as_ref()))]
    NotFound { error: Option<ErrorDocument> },
    #[error("failed to decode bucket listing: {0}")]
    Decode(#[from] quick_xml::de::DeError),
    #[error("failed to read bucket listing: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("entry {index} of the bucket listing has an empty key")]
    EmptyKey { index: usize },
}
impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
fn describe_error_document(error: Option<&ErrorDocument>) -> String {
    match error {
        Some(error) => format!(" (server error: {error})"),
        None => String::new(),
    }
}

pub trait DataExtract {
    fn extract_data<R: BufRead>(reader: &mut R) -> Result<Self, ContentError>
    where
        Self: Sized;
}
