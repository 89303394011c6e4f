use http::HeaderValue;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, error};

use crate::client::{ListingClient, settings::TransportSettings};
/// Runtime User Agent Value
static USER_AGENT_ENV_KEY: &str = "S3VIEWER_USER_AGENT";
/// Compile Time USER_AGENT_OVERRIDE
static USER_AGENT_DEFAULT: Option<&'static str> = option_env!("S3VIEWER_DEFAULT_USER_AGENT");
/// Fall Back to `s3viewer/{VERSION}`
const BUILT_IN_DEFAULT_USER_AGENT: HeaderValue =
    HeaderValue::from_static(concat!("s3viewer/", env!("CARGO_PKG_VERSION")));
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error(transparent)]
    HttpReqwestClientBuilderError(#[from] reqwest::Error),
}
/// First Pulls [USER_AGENT_ENV_KEY] then falls back to [USER_AGENT_DEFAULT] and finally
/// [BUILT_IN_DEFAULT_USER_AGENT]
fn default_user_agent() -> HeaderValue {
    if let Ok(user_agent) = std::env::var(USER_AGENT_ENV_KEY) {
        match HeaderValue::from_str(&user_agent) {
            Ok(header) => return header,
            Err(err) => {
                error!(
                    ?err,
                    ?user_agent,
                    "Invalid user agent from environment variable, using default"
                );
            }
        }
    }
    if let Some(user_agent) = USER_AGENT_DEFAULT {
        match HeaderValue::from_str(user_agent) {
            Ok(header) => return header,
            Err(err) => {
                error!(
                    ?err,
                    user_agent, "Invalid user agent from compile time constant, using default"
                );
            }
        }
    }
    BUILT_IN_DEFAULT_USER_AGENT
}
fn user_agent(settings: &TransportSettings) -> HeaderValue {
    match settings.user_agent.as_deref().map(HeaderValue::from_str) {
        Some(Ok(header)) => header,
        Some(Err(err)) => {
            error!(
                ?err,
                user_agent = ?settings.user_agent,
                "Invalid user agent in settings, using default"
            );
            default_user_agent()
        }
        None => default_user_agent(),
    }
}
/// Builds the [ListingClient]. The resulting client is immutable and cheap to clone.
#[derive(Debug)]
pub struct ListingClientBuilder {
    client_builder: reqwest::ClientBuilder,
}
impl Default for ListingClientBuilder {
    fn default() -> Self {
        Self::from_settings(&TransportSettings::default())
    }
}

impl ListingClientBuilder {
    pub fn from_settings(settings: &TransportSettings) -> Self {
        debug!(?settings, "Configuring HTTP client");
        let client_builder = Client::builder()
            .user_agent(user_agent(settings))
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout())
            .danger_accept_invalid_certs(settings.accept_invalid_certs);
        Self { client_builder }
    }
    /// Further customize the underlying [ClientBuilder]. Applied after the settings.
    pub fn http_client_builder<F>(mut self, builder: F) -> Self
    where
        F: FnOnce(ClientBuilder) -> ClientBuilder,
    {
        self.client_builder = builder(self.client_builder);
        self
    }
    pub fn build(self) -> Result<ListingClient, BuilderError> {
        let http_client: Client = self.client_builder.build()?;
        Ok(ListingClient::new(http_client))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    #[test]
    fn test_listing_client_builder() {
        let settings = TransportSettings {
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            accept_invalid_certs: false,
            user_agent: Some("s3viewer-test".into()),
        };
        let _client = ListingClientBuilder::from_settings(&settings)
            .http_client_builder(|client| client.pool_idle_timeout(Duration::from_secs(30)))
            .build()
            .unwrap();
        let _client = ListingClientBuilder::default().build().unwrap();
    }
    #[test]
    fn invalid_user_agent_falls_back() {
        let settings = TransportSettings {
            user_agent: Some("bad\nagent".into()),
            ..Default::default()
        };
        let header = user_agent(&settings);
        assert_ne!(header.as_bytes(), b"bad\nagent");
    }
}
