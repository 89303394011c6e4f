mod builder;
mod errors;
pub mod http_client;
mod settings;
pub use builder::{BuilderError, ListingClientBuilder};
pub use errors::*;
use http::StatusCode;
use s3viewer_types::{error::ErrorDocument, list::ListingResult};
pub use settings::*;
use tracing::{Instrument, debug, field::Empty};
use url::Url;

use crate::{S3ViewerResult, client::http_client::HttpClient};

/// Fetches bucket listings over HTTP.
///
/// Holds nothing but the HTTP client, so clones can run independent listing sessions
/// concurrently.
#[derive(Debug, Clone)]
pub struct ListingClient<Client: HttpClient = reqwest::Client> {
    pub(crate) http_client: Client,
}
impl<Client: HttpClient> ListingClient<Client> {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }
    pub fn http_client(&self) -> &Client {
        &self.http_client
    }
    /// GETs `url` and returns the body.
    ///
    /// Anything but `200 OK` is an error. Invalid UTF-8 in the body is replaced rather
    /// than rejected, the listing is usually still in there.
    pub async fn get_body(&self, url: &Url) -> Result<String, TransportError> {
        let span = tracing::debug_span!("HTTP GET", %url, status_code = Empty);
        let http_client = &self.http_client;
        async move {
            debug!("Sending request");
            let request = http_client.get(url.clone()).build()?;
            let response = http_client.execute(request).await?;
            let status = response.status();
            tracing::Span::current().record("status_code", status.as_u16());
            if status != StatusCode::OK {
                let body = response.text().await.unwrap_or_default();
                let error = ErrorDocument::find(&body);
                debug!(?error, "Request refused");
                return Err(TransportError::Status { status, error });
            }
            let body = response.bytes().await.map_err(TransportError::Body)?;
            debug!(length = body.len(), "Response received");
            Ok(String::from_utf8_lossy(&body).into_owned())
        }
        .instrument(span)
        .await
    }
    /// Fetches and decodes exactly one page.
    pub async fn fetch_page(&self, url: &Url) -> S3ViewerResult<ListingResult> {
        let body = self.get_body(url).await?;
        let page = ListingResult::from_body(url.as_str(), &body)?;
        Ok(page)
    }
}
