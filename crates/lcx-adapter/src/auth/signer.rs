/*
[INPUT]:  HTTP method, endpoint path, serialized body and secret key
[OUTPUT]: Base64-encoded HMAC-SHA256 signatures
[POS]:    Auth layer - deterministic request signing
[UPDATE]: When changing signing algorithm or canonical request format
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::http::{LcxError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Canonical body for requests that carry no payload
pub const EMPTY_BODY: &str = "{}";

/// Sign a request.
///
/// Message: `{method}{path}{body}`, where `body` is exactly the text that is
/// transmitted (`"{}"` for parameterless requests). Returns the
/// base64-encoded HMAC-SHA256 digest keyed with `secret`.
pub fn sign(method: &str, path: &str, body: &str, secret: &str) -> Result<String> {
    if secret.is_empty() {
        return Err(LcxError::Signing("secret key must not be empty".to_string()));
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| LcxError::Signing(err.to_string()))?;
    mac.update(method.as_bytes());
    mac.update(path.as_bytes());
    mac.update(body.as_bytes());

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Serialize `payload` once and sign the resulting text.
///
/// Returns `(body, signature)`; callers must transmit `body` as-is.
pub fn sign_payload<T: Serialize + ?Sized>(
    method: &str,
    path: &str,
    payload: &T,
    secret: &str,
) -> Result<(String, String)> {
    let body = serde_json::to_string(payload)?;
    let signature = sign(method, path, &body, secret)?;
    Ok((body, signature))
}
