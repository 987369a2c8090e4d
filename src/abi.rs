//! Purpose: C ABI bridge for embedding the decoder (libjbdecoder).
//! Exports: `jbd_decode`, `jbd_decode_envelope`, `jbd_string_free`, `jbd_error_free`.
//! Role: Stable ABI surface for non-Rust hosts; mirrors the `api` document helpers.
//! Invariants: NUL-terminated UTF-8 JSON text in and out; explicit free functions.
//! Invariants: Error kinds map 1:1 with `api::ErrorKind` exit codes.
#![allow(non_camel_case_types)]
use crate::api::{Error, ErrorKind, decode_json_text, envelope_text, to_exit_code};
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

#[repr(C)]
pub struct jbd_error {
    kind: i32,
    message: *mut c_char,
    hint: *mut c_char,
}

/// Decodes the JSON text at `input`; on success writes compact JSON text to
/// `out_json` and returns 0, otherwise fills `out_err` and returns -1.
#[unsafe(no_mangle)]
pub extern "C" fn jbd_decode(
    input: *const c_char,
    out_json: *mut *mut c_char,
    out_err: *mut *mut jbd_error,
) -> i32 {
    if out_json.is_null() {
        return fail(
            out_err,
            Error::new(ErrorKind::Usage).with_message("out_json is null"),
        );
    }
    let text = match borrow_str(input, "input") {
        Ok(text) => text,
        Err(err) => return fail(out_err, err),
    };
    let output = match decode_json_text(text) {
        Ok(output) => output,
        Err(err) => return fail(out_err, err),
    };
    unsafe {
        *out_json = to_c_string(&output);
    }
    0
}

/// Returns `{"result": ...}` or `{"error": ...}` as an owned C string.
/// Free with [`jbd_string_free`].
#[unsafe(no_mangle)]
pub extern "C" fn jbd_decode_envelope(input: *const c_char) -> *mut c_char {
    match borrow_str(input, "input") {
        Ok(text) => to_c_string(&envelope_text(text)),
        Err(err) => {
            let message = serde_json::json!({ "error": err.message().unwrap_or("invalid input") });
            to_c_string(&message.to_string())
        }
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn jbd_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(value));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn jbd_error_free(err: *mut jbd_error) {
    if err.is_null() {
        return;
    }
    unsafe {
        let err = Box::from_raw(err);
        if !err.message.is_null() {
            drop(CString::from_raw(err.message));
        }
        if !err.hint.is_null() {
            drop(CString::from_raw(err.hint));
        }
    }
}

fn borrow_str<'a>(input: *const c_char, name: &str) -> Result<&'a str, Error> {
    if input.is_null() {
        return Err(Error::new(ErrorKind::Usage).with_message(format!("{name} is null")));
    }
    unsafe { CStr::from_ptr(input) }.to_str().map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("{name} is not valid UTF-8"))
            .with_source(err)
    })
}

fn fail(out_err: *mut *mut jbd_error, err: Error) -> i32 {
    if out_err.is_null() {
        return -1;
    }
    let error = Box::new(jbd_error {
        kind: to_exit_code(err.kind()),
        message: to_c_string(err.message().unwrap_or("")),
        hint: err.hint().map(to_c_string).unwrap_or(ptr::null_mut()),
    });
    unsafe {
        *out_err = Box::into_raw(error);
    }
    -1
}

fn to_c_string(input: &str) -> *mut c_char {
    CString::new(input)
        .map(|s| s.into_raw())
        .unwrap_or(ptr::null_mut())
}
