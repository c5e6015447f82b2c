/*
[INPUT]:  Method, path, serialized body and credentials
[OUTPUT]: Signed request with x-access-* headers
[POS]:    HTTP layer - authenticated request building
[UPDATE]: When changing signing headers or canonical body handling
*/

use chrono::Utc;
use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;

use crate::auth::{Credentials, sign};
use crate::http::{LcxError, Result};

pub const ACCESS_KEY_HEADER: &str = "x-access-key";
pub const ACCESS_SIGN_HEADER: &str = "x-access-sign";
pub const ACCESS_TIMESTAMP_HEADER: &str = "x-access-timestamp";
pub(crate) const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// A request whose body has been signed.
///
/// `body` is the exact text that goes on the wire. `timestamp_millis` is
/// captured when the request is built and is sent alongside the signature;
/// it is not part of the signed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
    pub api_key: String,
    pub signature: String,
    pub timestamp_millis: i64,
}

impl SignedRequest {
    /// Sign `body` for `method path`.
    ///
    /// The credential check runs first, so an anonymous client never gets
    /// as far as signing.
    pub fn build(
        method: Method,
        path: &str,
        body: impl Into<String>,
        credentials: &Credentials,
    ) -> Result<Self> {
        let (api_key, secret_key) = credentials.require()?;
        let body = body.into();
        let signature = sign(method.as_str(), path, &body, secret_key)?;

        Ok(Self {
            method,
            path: path.to_string(),
            body,
            api_key: api_key.to_string(),
            signature,
            timestamp_millis: Utc::now().timestamp_millis(),
        })
    }

    /// Serialize `payload` once and sign that text
    pub fn build_json<T: Serialize + ?Sized>(
        method: Method,
        path: &str,
        payload: &T,
        credentials: &Credentials,
    ) -> Result<Self> {
        credentials.require()?;
        let body = serde_json::to_string(payload)?;
        Self::build(method, path, body, credentials)
    }

    /// Authentication and content headers for this request
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCESS_KEY_HEADER,
            HeaderValue::from_str(&self.api_key).map_err(|_| LcxError::Authentication {
                message: "API key contains characters not allowed in a header".to_string(),
            })?,
        );
        headers.insert(
            ACCESS_SIGN_HEADER,
            HeaderValue::from_str(&self.signature)
                .map_err(|err| LcxError::Signing(err.to_string()))?,
        );
        headers.insert(ACCESS_TIMESTAMP_HEADER, HeaderValue::from(self.timestamp_millis));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(headers)
    }

    /// Authentication parameters for a socket URL query string
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            (ACCESS_KEY_HEADER, self.api_key.clone()),
            (ACCESS_SIGN_HEADER, self.signature.clone()),
            (ACCESS_TIMESTAMP_HEADER, self.timestamp_millis.to_string()),
        ]
    }
}
