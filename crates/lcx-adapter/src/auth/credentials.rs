/*
[INPUT]:  API key and secret key (explicit or from environment)
[OUTPUT]: Immutable credential pair checked at point of use
[POS]:    Auth layer - credential store
[UPDATE]: When changing how credentials are supplied
*/

use std::fmt;

use crate::http::{LcxError, Result};

/// Message returned whenever a private operation runs without a full credential pair
pub const AUTH_REQUIRED_MESSAGE: &str =
    "Authentication error: 'API-KEY' and 'SECRET-KEY' are required for this request.";

const API_KEY_ENV: &str = "LCX_API_KEY";
const SECRET_KEY_ENV: &str = "LCX_SECRET_KEY";

/// API key and secret key pair.
///
/// Either value may be absent; a client holding an incomplete pair runs in
/// public-only mode. Empty strings are treated as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    secret_key: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Credentials {
    /// Full credential pair
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::from_parts(Some(api_key.into()), Some(secret_key.into()))
    }

    /// Possibly incomplete pair, as read from a config file
    pub fn from_parts(api_key: Option<String>, secret_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|value| !value.is_empty()),
            secret_key: secret_key.filter(|value| !value.is_empty()),
        }
    }

    /// No credentials; public endpoints only
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Read `LCX_API_KEY` / `LCX_SECRET_KEY` from the process environment
    pub fn from_env() -> Self {
        Self::from_parts(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(SECRET_KEY_ENV).ok(),
        )
    }

    /// Fill each missing value from `fallback`
    pub fn or(self, fallback: Credentials) -> Self {
        Self {
            api_key: self.api_key.or(fallback.api_key),
            secret_key: self.secret_key.or(fallback.secret_key),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// True when both the key and the secret are present
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }

    /// Borrow `(api_key, secret_key)`, failing when either is missing
    pub fn require(&self) -> Result<(&str, &str)> {
        match (self.api_key.as_deref(), self.secret_key.as_deref()) {
            (Some(api_key), Some(secret_key)) => Ok((api_key, secret_key)),
            _ => Err(LcxError::missing_credentials()),
        }
    }
}
