//! Purpose: WebAssembly export for browser and Node hosts.
//! Exports: `decodeJSON` (JS name), `wasmReady`.
//! Role: Thin wasm-bindgen shim over `api::decode_json_envelope`.
//! Invariants: Always returns an object with exactly one of `result` or `error`.
use wasm_bindgen::prelude::*;

use crate::api::envelope_text;

/// Decodes a JSON string and returns `{result}` or `{error}` as a JS object.
#[wasm_bindgen(js_name = decodeJSON)]
pub fn decode_json(input: &str) -> JsValue {
    let text = envelope_text(input);
    js_sys::JSON::parse(&text).unwrap_or_else(|_| JsValue::from_str(&text))
}

/// Lets hosts poll for module readiness after instantiation.
#[wasm_bindgen(js_name = wasmReady)]
pub fn wasm_ready() -> bool {
    true
}
