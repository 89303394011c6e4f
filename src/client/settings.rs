use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeouts and TLS policy shared by every request a client makes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSettings {
    /// Time allowed to establish the connection
    pub connect_timeout_secs: u64,
    /// Time allowed for the whole request including the body
    pub request_timeout_secs: u64,
    /// Targets are often self-signed or misconfigured. On by default.
    pub accept_invalid_certs: bool,
    /// Overrides the default user agent
    pub user_agent: Option<String>,
}
impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            request_timeout_secs: 45,
            accept_invalid_certs: true,
            user_agent: None,
        }
    }
}
impl TransportSettings {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
