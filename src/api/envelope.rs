//! Purpose: Single-call embedding entry point returning a result/error envelope.
//! Exports: `decode_json_envelope`, `envelope_text`.
//! Role: Contract shared by the C ABI and the wasm export; hosts never see `Error` directly.
//! Invariants: Exactly one of `result` or `error` is present.
//! Invariants: `result` holds compact JSON text, not a nested JSON value.
use serde_json::{Map, Value, json};
use std::error::Error as StdError;

use super::document::decode_json_text;
use crate::core::error::Error;

/// Decodes `input` and wraps the outcome as `{"result": <json text>}` or
/// `{"error": <message>}`.
pub fn decode_json_envelope(input: &str) -> Value {
    let mut envelope = Map::new();
    match decode_json_text(input) {
        Ok(text) => {
            envelope.insert("result".to_string(), json!(text));
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), "embedded decode failed");
            envelope.insert("error".to_string(), json!(envelope_message(&err)));
        }
    }
    Value::Object(envelope)
}

/// Compact text form of [`decode_json_envelope`].
pub fn envelope_text(input: &str) -> String {
    let envelope = decode_json_envelope(input);
    serde_json::to_string(&envelope)
        .unwrap_or_else(|_| "{\"error\":\"error generating output JSON\"}".to_string())
}

fn envelope_message(err: &Error) -> String {
    let message = err.message().unwrap_or("decode failed");
    match err.source() {
        Some(cause) => format!("{message}: {cause}"),
        None => message.to_string(),
    }
}
