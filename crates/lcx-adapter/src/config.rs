/*
[INPUT]:  Environment selection, timeouts and optional credentials
[OUTPUT]: Client configuration shared by the HTTP and WebSocket clients
[POS]:    Configuration layer - base endpoints and connection options
[UPDATE]: When adding environments or connection options
*/

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::Credentials;
use crate::http::{LcxError, Result};

/// Deployment environment of the exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Environment {
    #[default]
    Production,
}

impl Environment {
    /// Base endpoints for this environment
    pub fn base_urls(self) -> BaseUrls {
        match self {
            Environment::Production => BaseUrls {
                exchange: "https://exchange-api.lcx.com".to_string(),
                kline: "https://api-kline-staging.lcx.com".to_string(),
                ws: "wss://exchange-api.lcx.com".to_string(),
            },
        }
    }
}

/// Base endpoints used to assemble request and socket URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseUrls {
    /// REST endpoint for market, trading and account calls
    pub exchange: String,
    /// REST endpoint serving candles
    pub kline: String,
    /// Realtime socket endpoint
    pub ws: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Environment::default().base_urls()
    }
}

/// Configuration shared by [`crate::LcxClient`] and [`crate::LcxWebSocket`].
///
/// `ClientConfig::default()` targets production in public-only mode: no
/// credentials are set, so every private call fails fast with an
/// authentication error.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub base_urls: BaseUrls,
    pub credentials: Credentials,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            base_urls: BaseUrls::default(),
            credentials: Credentials::anonymous(),
        }
    }
}

impl ClientConfig {
    /// Public-only configuration for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            base_urls: environment.base_urls(),
            ..Self::default()
        }
    }

    /// Replace the credential pair
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Replace the base endpoints
    pub fn with_base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = base_urls;
        self
    }
}

/// Append `path` to the path of `base`, keeping any prefix the base carries
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| LcxError::Config(format!("base URL cannot carry a path: {base}")))?
        .pop_if_empty()
        .extend(path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}
