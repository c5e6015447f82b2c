/*
[INPUT]:  Raw WebSocket text frames and transport outcomes
[OUTPUT]: InboundMessage values handed to the subscriber callback
[POS]:    WebSocket layer - message decoding
[UPDATE]: When adding new message kinds or changing frame handling
*/

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use tracing::debug;

use crate::http::LcxError;

const PARSE_FAIL_LOG_LIMIT: usize = 3;
const RAW_LOG_MAX_BYTES: usize = 1024;

static PARSE_FAIL_LOG_COUNT: AtomicUsize = AtomicUsize::new(0);

pub(crate) const PARSE_FAILED_MESSAGE: &str = "Failed to parse JSON message";

/// Everything a subscriber can receive on its callback
#[derive(Debug)]
pub enum InboundMessage {
    /// A structured frame
    Data(Value),
    /// A frame that looked structured but did not decode, or a transport failure
    Error { message: String, cause: LcxError },
    /// A plain-text frame (acknowledgements, pings)
    Status(String),
    /// The remote side closed the connection
    Closed { code: Option<u16>, reason: String },
}

impl InboundMessage {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            InboundMessage::Closed { .. }
                | InboundMessage::Error {
                    cause: LcxError::WebSocket(_),
                    ..
                }
        )
    }

    /// Tagged JSON form: `{"type": "data" | "error" | "status" | "closed", ...}`
    pub fn to_json(&self) -> Value {
        match self {
            InboundMessage::Data(payload) => json!({ "type": "data", "payload": payload }),
            InboundMessage::Error { message, cause } => json!({
                "type": "error",
                "message": message,
                "cause": cause.to_string(),
            }),
            InboundMessage::Status(message) => json!({ "type": "status", "message": message }),
            InboundMessage::Closed { code, reason } => json!({
                "type": "closed",
                "code": code,
                "reason": reason,
            }),
        }
    }
}

/// Decode one text frame.
///
/// Frames whose first non-whitespace character opens an object or array are
/// parsed as JSON; a parse failure becomes [`InboundMessage::Error`]. Anything
/// else is passed through untouched as [`InboundMessage::Status`].
pub fn decode_frame(frame: &str) -> InboundMessage {
    match frame.trim_start().chars().next() {
        Some('{') | Some('[') => match serde_json::from_str::<Value>(frame) {
            Ok(payload) => InboundMessage::Data(payload),
            Err(err) => {
                log_parse_fail_once(&err, frame);
                InboundMessage::Error {
                    message: PARSE_FAILED_MESSAGE.to_string(),
                    cause: LcxError::Serialization(err),
                }
            }
        },
        _ => InboundMessage::Status(frame.to_string()),
    }
}

fn log_parse_fail_once(err: &serde_json::Error, raw: &str) {
    let count = PARSE_FAIL_LOG_COUNT.fetch_add(1, Ordering::Relaxed);
    if count < PARSE_FAIL_LOG_LIMIT {
        let preview = truncate_for_log(raw, RAW_LOG_MAX_BYTES);
        debug!(
            sample_index = count + 1,
            sample_limit = PARSE_FAIL_LOG_LIMIT,
            error = %err,
            bytes = raw.len(),
            message = %preview,
            "ws message parse failed"
        );
    }
}

pub(crate) fn truncate_for_log(value: &str, max_len: usize) -> String {
    if value.len() <= max_len {
        return value.to_string();
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    let mut out = String::with_capacity(end + 3);
    out.push_str(&value[..end]);
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_frame_is_data() {
        match decode_frame(r#"{"a":1}"#) {
            InboundMessage::Data(payload) => assert_eq!(payload, json!({ "a": 1 })),
            other => panic!("expected data, got {other:?}"),
        }
    }

    #[test]
    fn test_array_frame_with_leading_whitespace_is_data() {
        match decode_frame("  \n[1,2]") {
            InboundMessage::Data(payload) => assert_eq!(payload, json!([1, 2])),
            other => panic!("expected data, got {other:?}"),
        }
    }

    #[test]
    fn test_broken_json_is_error() {
        match decode_frame("{bad json") {
            InboundMessage::Error { message, cause } => {
                assert_eq!(message, PARSE_FAILED_MESSAGE);
                assert!(matches!(cause, LcxError::Serialization(_)));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_text_is_status() {
        match decode_frame("PING") {
            InboundMessage::Status(text) => assert_eq!(text, "PING"),
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_frame_is_status() {
        assert!(matches!(decode_frame(""), InboundMessage::Status(text) if text.is_empty()));
    }

    #[test]
    fn test_to_json_tags() {
        assert_eq!(decode_frame("PING").to_json()["type"], "status");
        assert_eq!(decode_frame("{}").to_json()["type"], "data");
        assert_eq!(decode_frame("[oops").to_json()["type"], "error");

        let closed = InboundMessage::Closed {
            code: Some(1000),
            reason: "bye".to_string(),
        };
        assert!(closed.is_terminal());
        assert_eq!(truncate_for_log("héllo", 2), "h...");
        assert_eq!(closed.to_json(), json!({ "type": "closed", "code": 1000, "reason": "bye" }));
    }
}
