/*
[INPUT]:  Client configuration (base URLs, timeouts, credentials)
[OUTPUT]: Configured reqwest client and request dispatch helpers
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::auth::Credentials;
use crate::config::{ClientConfig, endpoint_url};
use crate::http::signature::JSON_CONTENT_TYPE;
use crate::http::{LcxError, Result, SignedRequest};
use crate::types::QueryParams;
use crate::ws::message::truncate_for_log;

const ERROR_BODY_LOG_MAX_BYTES: usize = 512;

/// Main HTTP client for the LCX exchange API
#[derive(Debug, Clone)]
pub struct LcxClient {
    http_client: Client,
    exchange_base_url: Url,
    kline_base_url: Url,
    credentials: Credentials,
}

impl LcxClient {
    /// Create a public-only client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            exchange_base_url: Url::parse(&config.base_urls.exchange)?,
            kline_base_url: Url::parse(&config.base_urls.kline)?,
            credentials: config.credentials,
        })
    }

    /// Credentials this client signs with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(base: &Url, endpoint: &str, query: &[(&'static str, String)]) -> Result<Url> {
        let mut url = endpoint_url(base, endpoint)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }

    /// Build an unsigned request against the exchange endpoint
    pub(crate) fn public_request(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
    ) -> Result<RequestBuilder> {
        let url = Self::url(&self.exchange_base_url, endpoint, query)?;
        Ok(self
            .http_client
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE))
    }

    /// Build an unsigned request against the kline endpoint
    pub(crate) fn kline_request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let url = Self::url(&self.kline_base_url, endpoint, &[])?;
        Ok(self
            .http_client
            .request(method, url)
            .header(ACCEPT, "application/json"))
    }

    /// Sign `body` with this client's credentials
    pub(crate) fn authorize(
        &self,
        method: Method,
        endpoint: &str,
        body: impl Into<String>,
    ) -> Result<SignedRequest> {
        SignedRequest::build(method, endpoint, body, &self.credentials)
    }

    /// Turn a signed request into a request builder.
    ///
    /// Reads carry no body; writes transmit exactly the signed text.
    pub(crate) fn signed_request(
        &self,
        signed: SignedRequest,
        query: &QueryParams,
    ) -> Result<RequestBuilder> {
        let url = Self::url(&self.exchange_base_url, &signed.path, query)?;
        let builder = self
            .http_client
            .request(signed.method.clone(), url)
            .headers(signed.headers()?);

        if signed.method == Method::GET {
            Ok(builder)
        } else {
            Ok(builder.body(signed.body))
        }
    }

    /// Send a request and decode the JSON response.
    ///
    /// Failures are logged with `action` before being returned.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        action: &'static str,
    ) -> Result<T> {
        let response = builder.send().await.map_err(|err| {
            error!(action, error = %err, "request failed");
            LcxError::Http(err)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            error!(action, %status, error = %err, "failed to read response body");
            LcxError::Http(err)
        })?;

        if !status.is_success() {
            error!(
                action,
                %status,
                body = %truncate_for_log(&body, ERROR_BODY_LOG_MAX_BYTES),
                "request rejected"
            );
            return Err(LcxError::api_error(status, body));
        }

        debug!(action, %status, bytes = body.len(), "request succeeded");
        serde_json::from_str(&body).map_err(|err| {
            error!(action, error = %err, "response is not valid json");
            LcxError::Serialization(err)
        })
    }
}
