//! Purpose: Define the stable public Rust API boundary for jbdecoder.
//! Exports: The decode engine, document helpers, input resolution, and error types.
//! Role: Public, additive-only surface used by the CLI, the C ABI, and the wasm export.
//! Invariants: Internal modules (`core`, `json`) are only reachable through this module.

mod document;
mod envelope;

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::decode::{
    DEFAULT_MAX_DEPTH, decode, decode_with_max_depth, is_base64, is_valid_json,
};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::input::{InputError, InputSource, read_source, resolve_input, select_source};
pub use document::{decode_document, decode_json_text, parse_document, render_compact};
pub use envelope::{decode_json_envelope, envelope_text};
