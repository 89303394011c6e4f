//! Lists the contents of publicly readable S3 style buckets.
//!
//! ```no_run
//! # async fn run() -> Result<(), s3viewer::S3ViewerError> {
//! let client = s3viewer::client::ListingClientBuilder::default().build()?;
//! let url = url::Url::parse("http://bucket.example.com/")?;
//! let listing = client.fetch_all(&url, 10).await?;
//! for entry in &listing.entries {
//!     println!("{}\t{}", entry.key, entry.size);
//! }
//! # Ok(())
//! # }
//! ```
pub use s3viewer_types as types;
use s3viewer_types::ContentError;
use thiserror::Error;

use crate::client::{BuilderError, TransportError};
pub mod client;
pub mod pagination;
#[cfg(test)]
pub mod test;
pub type S3ViewerResult<T> = Result<T, S3ViewerError>;
#[derive(Debug, Error)]
pub enum S3ViewerError {
    #[error(transparent)]
    Transport(Box<TransportError>),
    #[error(transparent)]
    Content(#[from] ContentError),
    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Builder(#[from] BuilderError),
}
impl From<TransportError> for S3ViewerError {
    fn from(error: TransportError) -> Self {
        S3ViewerError::Transport(Box::new(error))
    }
}
impl From<reqwest::Error> for S3ViewerError {
    fn from(error: reqwest::Error) -> Self {
        let transport = TransportError::from(error);
        Self::from(transport)
    }
}
impl S3ViewerError {
    /// No listing in the response. Usually access denied or not an object store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, S3ViewerError::Content(content) if content.is_not_found())
    }
}
