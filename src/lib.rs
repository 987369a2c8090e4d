//! Purpose: Library crate behind the `jbdecoder` CLI, the C ABI, and the wasm export.
//! Exports: `api` (decode engine, document helpers, input resolution, errors), `abi`.
//! Role: Recursively unwraps Base64-encoded string fields inside JSON documents.
//! Invariants: The decode engine is pure; all I/O lives in `input` and the binaries.
//! Invariants: External callers go through `api`; `core` and `json` stay internal.
pub mod abi;
pub mod api;
mod core;
pub mod input;
mod json;
#[cfg(target_arch = "wasm32")]
pub mod wasm;
