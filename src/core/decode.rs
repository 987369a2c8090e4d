//! Purpose: Recursively unwrap Base64-encoded string leaves inside a JSON value.
//! Exports: `decode`, `decode_with_max_depth`, `is_base64`, `is_valid_json`, `DEFAULT_MAX_DEPTH`.
//! Role: Pure core of the crate; every shell (CLI, C ABI, wasm) calls into this.
//! Invariants: Total function; malformed or non-text candidates come back unchanged.
//! Invariants: Objects and arrays keep their keys, order, and length; only string leaves change.
//! Invariants: The input is never mutated; output is freshly allocated.
//! Invariants: Work past `max_depth` is cut off and the subtree is returned undecoded.
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::json::parse;

const BASE64_BLOCK_SIZE: usize = 4;

/// Depth budget used by [`decode`].
///
/// One unit is consumed per object member, array element, and decoded layer.
pub const DEFAULT_MAX_DEPTH: usize = 512;

// Standard alphabet with canonical `=` padding. Non-zero trailing bits in the
// final quantum are accepted, matching common non-strict encoders.
const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Returns true when `s` is a Base64 candidate: its length is a multiple of
/// four and it decodes under the standard alphabet with padding.
pub fn is_base64(s: &str) -> bool {
    decode_candidate(s).is_some()
}

/// Returns true when `s` parses as a single JSON value.
pub fn is_valid_json(s: &str) -> bool {
    parse::from_str::<Value>(s).is_ok()
}

/// Unwraps every Base64 string leaf of `value`, reinterpreting decoded text as
/// JSON when it parses, using [`DEFAULT_MAX_DEPTH`] as the depth budget.
pub fn decode(value: &Value) -> Value {
    decode_with_max_depth(value, DEFAULT_MAX_DEPTH)
}

/// Same as [`decode`] with an explicit depth budget.
///
/// With `max_depth == 0` only the top-level value is visited: a top-level
/// string is returned as-is and containers are cloned without descending.
pub fn decode_with_max_depth(value: &Value, max_depth: usize) -> Value {
    Unwrapper { max_depth }.value(value, 0)
}

fn decode_candidate(s: &str) -> Option<Vec<u8>> {
    if s.len() % BASE64_BLOCK_SIZE != 0 {
        return None;
    }
    STANDARD.decode(s).ok()
}

struct Unwrapper {
    max_depth: usize,
}

impl Unwrapper {
    fn value(&self, value: &Value, depth: usize) -> Value {
        if depth > self.max_depth {
            warn!(
                max_depth = self.max_depth,
                "decode depth limit reached; leaving subtree undecoded"
            );
            return value.clone();
        }
        match value {
            Value::Object(map) => Value::Object(self.object(map, depth)),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.value(item, depth + 1))
                    .collect(),
            ),
            Value::String(text) => self.string(text, depth),
            Value::Number(_) | Value::Bool(_) | Value::Null => value.clone(),
        }
    }

    fn object(&self, map: &Map<String, Value>, depth: usize) -> Map<String, Value> {
        map.iter()
            .map(|(key, item)| (key.clone(), self.value(item, depth + 1)))
            .collect()
    }

    fn string(&self, s: &str, depth: usize) -> Value {
        let original = || Value::String(s.to_owned());

        // The decoded layer lives one level below `s`.
        if depth >= self.max_depth {
            if is_base64(s) {
                warn!(
                    max_depth = self.max_depth,
                    "decode depth limit reached; leaving string encoded"
                );
            }
            return original();
        }
        let Some(bytes) = decode_candidate(s) else {
            return original();
        };
        let Ok(text) = String::from_utf8(bytes) else {
            trace!(depth, len = s.len(), "base64 payload is not utf-8; kept encoded");
            return original();
        };
        let text = text.trim();
        trace!(depth, len = s.len(), "decoded base64 layer");

        if let Ok(parsed) = parse::from_str::<Value>(text) {
            return self.value(&parsed, depth + 1);
        }
        // Plain text that is itself another encoded layer.
        if !text.is_empty() && is_base64(text) {
            return self.string(text, depth + 1);
        }
        Value::String(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{STANDARD, decode, decode_with_max_depth, is_base64, is_valid_json};
    use base64::Engine;
    use serde_json::{Value, json};

    fn encode(bytes: impl AsRef<[u8]>) -> String {
        STANDARD.encode(bytes)
    }

    fn encode_json(value: &Value) -> String {
        encode(serde_json::to_string(value).expect("serialize"))
    }

    #[test]
    fn decodes_plain_text_field() {
        let input = json!({"message": "SGVsbG8gV29ybGQ=", "number": 42});
        let output = decode(&input);
        assert_eq!(
            serde_json::to_string(&output).expect("serialize"),
            r#"{"message":"Hello World","number":42}"#
        );
    }

    #[test]
    fn reinterprets_decoded_json_and_trims_newline() {
        let input = json!({"message": "eyJrZXkiOiJ2YWx1ZSJ9Cg==", "number": 42});
        let output = decode(&input);
        assert_eq!(
            serde_json::to_string(&output).expect("serialize"),
            r#"{"message":{"key":"value"},"number":42}"#
        );
    }

    #[test]
    fn leaves_short_and_invalid_strings_alone() {
        let input = json!({
            "valid": "SGVsbG8gV29ybGQ=",
            "short": "abc",
            "badchars": "Hello@World",
            "empty": "",
        });
        let output = decode(&input);
        assert_eq!(
            output,
            json!({
                "valid": "Hello World",
                "short": "abc",
                "badchars": "Hello@World",
                "empty": "",
            })
        );
    }

    #[test]
    fn empty_object_and_array_pass_through() {
        assert_eq!(decode(&json!({})), json!({}));
        assert_eq!(decode(&json!([])), json!([]));
    }

    #[test]
    fn binary_payload_stays_encoded() {
        let binary = encode([0xFFu8, 0xFE, 0x00, 0x01, 0x80, 0x81]);
        let input = json!({"binaryField": binary.clone(), "textField": "SGVsbG8="});
        let output = decode(&input);
        assert_eq!(output["binaryField"], Value::String(binary));
        assert_eq!(output["textField"], "Hello");
    }

    #[test]
    fn scalars_are_identity() {
        for value in [
            json!(42),
            json!(-3.5),
            json!(18446744073709551615u64),
            json!(true),
            json!(false),
            json!(null),
        ] {
            assert_eq!(decode(&value), value);
        }
    }

    #[test]
    fn shape_and_key_order_are_preserved() {
        let input: Value = serde_json::from_str(
            r#"{"zeta":"SGVsbG8=","alpha":[1,"VGVzdA==",null,["V29ybGQ="]],"mid":{"b":false,"a":"x"}}"#,
        )
        .expect("parse");
        let output = decode(&input);

        let keys: Vec<&str> = output
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&output).expect("serialize"),
            r#"{"zeta":"Hello","alpha":[1,"Test",null,["World"]],"mid":{"b":false,"a":"x"}}"#
        );
    }

    #[test]
    fn input_is_not_mutated() {
        let input = json!({"a": "SGVsbG8=", "b": ["SGVsbG8="]});
        let snapshot = input.clone();
        let _ = decode(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn round_trip_of_one_layer_matches_direct_decode() {
        let inner = json!({
            "user": {"name": "Sm9obiBEb2U=", "age": 30},
            "tags": ["dGVzdA==", "plain"],
        });
        let wrapped = Value::String(encode_json(&inner));
        assert_eq!(decode(&wrapped), decode(&inner));
        assert_eq!(
            decode(&wrapped),
            json!({"user": {"name": "John Doe", "age": 30}, "tags": ["test", "plain"]})
        );
    }

    #[test]
    fn multi_layer_json_unwraps_in_one_call() {
        let layer1 = encode_json(&json!({"a": 1}));
        let layer2 = encode(&layer1);
        let layer3 = encode(&layer2);
        assert_eq!(decode(&json!(layer2)), json!({"a": 1}));
        assert_eq!(decode(&json!(layer3)), json!({"a": 1}));

        let quoted = encode_json(&Value::String(layer1));
        assert_eq!(decode(&json!({"wrapped": quoted})), json!({"wrapped": {"a": 1}}));
    }

    #[test]
    fn decoded_json_scalars_change_type() {
        let input = json!({
            "n": encode("123"),
            "b": encode(" true\n"),
            "z": encode("null"),
            "s": encode("\"quoted\""),
        });
        assert_eq!(
            decode(&input),
            json!({"n": 123, "b": true, "z": null, "s": "quoted"})
        );
    }

    #[test]
    fn decoded_text_is_trimmed() {
        let input = json!(encode("\t  padded text \n\n"));
        assert_eq!(decode(&input), json!("padded text"));
    }

    #[test]
    fn base64_candidate_requires_block_length_and_alphabet() {
        assert!(is_base64("SGVsbG8="));
        assert!(is_base64(""));
        assert!(!is_base64("SGVsbG8"));
        assert!(!is_base64("SGVs bG8="));
        assert!(!is_base64("SG=sbG8="));
        assert!(!is_base64("SGVsbG8-"));
        assert!(!is_base64("aGVsbG8_"));
        // Trailing bits in the final quantum are tolerated.
        assert!(is_base64("SGVsbG9="));
    }

    #[test]
    fn four_character_tokens_follow_the_heuristic() {
        // Decodes to "abc": indistinguishable from intentional encoding.
        assert_eq!(decode(&json!("YWJj")), json!("abc"));
        // Decodes to non-UTF-8 bytes, so it stays.
        assert_eq!(decode(&json!("Test")), json!("Test"));
        assert_eq!(decode(&json!("abcd")), json!("abcd"));
    }

    #[test]
    fn json_probe_accepts_any_value() {
        assert!(is_valid_json(r#"{"k":[1,2]}"#));
        assert!(is_valid_json("3.25"));
        assert!(is_valid_json("\"text\""));
        assert!(!is_valid_json("Hello World"));
        assert!(!is_valid_json("{\"k\":"));
        assert!(!is_valid_json(""));
    }

    #[test]
    fn depth_budget_cuts_off_deep_layers() {
        let wrapped = json!({"outer": encode_json(&json!({"inner": "SGVsbG8="}))});

        assert_eq!(
            decode_with_max_depth(&wrapped, 8),
            json!({"outer": {"inner": "Hello"}})
        );
        // outer member (1) -> decoded layer (2) -> inner member (3) -> its layer (4)
        assert_eq!(
            decode_with_max_depth(&wrapped, 3),
            json!({"outer": {"inner": "SGVsbG8="}})
        );
        assert_eq!(decode_with_max_depth(&wrapped, 1), wrapped);
        assert_eq!(decode_with_max_depth(&json!("SGVsbG8="), 0), json!("SGVsbG8="));
    }
}
