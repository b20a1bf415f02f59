//! Client configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TRACKER_API_URL` | `http://localhost:8080/api` |
//! | `REQUEST_TIMEOUT_MS` | `30000` |

use crate::client::NetworkHttpClient;
use crate::{ClientError, ClientResult, TrackerClient};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Client configuration for connecting to the order-tracker backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, controllers mounted below it (e.g. "http://localhost:8080/api")
    pub base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: default_user_agent(),
        }
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let base_url = env::var("TRACKER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let timeout_ms = env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Self::new(base_url).with_timeout_ms(timeout_ms)
    }

    /// Set the request timeout
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check the configuration before building a client
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ClientError::Config("base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must start with http:// or https://, got {url}"
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::Config("timeout_ms must be greater than 0".into()));
        }
        Ok(())
    }

    /// Create a network client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Create a typed API client from this configuration
    pub fn build(&self) -> ClientResult<TrackerClient<NetworkHttpClient>> {
        Ok(TrackerClient::new(self.build_http_client()?))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn default_user_agent() -> String {
    format!("tracker-client/{}", env!("CARGO_PKG_VERSION"))
}
