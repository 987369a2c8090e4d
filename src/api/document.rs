//! Purpose: Whole-document helpers: parse bytes, run the engine, render compact JSON.
//! Exports: `parse_document`, `render_compact`, `decode_document`, `decode_json_text`.
//! Role: Shared pipeline behind the CLI and the embedding entry points.
//! Invariants: Parse failures surface as `ErrorKind::Parse` and never reach the engine.
//! Invariants: Rendered output is compact JSON with no trailing newline.
use serde_json::Value;

use crate::core::decode::decode;
use crate::core::error::{Error, ErrorKind};
use crate::json::parse;

pub fn parse_document(bytes: &[u8]) -> Result<Value, Error> {
    parse::from_slice(bytes).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("error parsing JSON input")
            .with_hint(parse::hint_for_error(&err, "input document"))
            .with_source(err)
    })
}

pub fn render_compact(value: &Value) -> Result<String, Error> {
    serde_json::to_string(value).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("error generating output JSON")
            .with_source(err)
    })
}

/// Parses `bytes`, unwraps every Base64 leaf, and renders compact JSON.
pub fn decode_document(bytes: &[u8]) -> Result<String, Error> {
    let value = parse_document(bytes)?;
    render_compact(&decode(&value))
}

pub fn decode_json_text(text: &str) -> Result<String, Error> {
    decode_document(text.as_bytes())
}
