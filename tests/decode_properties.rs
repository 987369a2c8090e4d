// Property-style checks of the public decode API over hand-built inputs.
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use jbdecoder::api::{
    DEFAULT_MAX_DEPTH, decode, decode_json_envelope, decode_with_max_depth, is_base64,
};
use serde_json::{Value, json};

fn sample_values() -> Vec<Value> {
    vec![
        json!(null),
        json!(true),
        json!(0),
        json!(-17),
        json!(2.5),
        json!("plain text"),
        json!("SGVsbG8gV29ybGQ="),
        json!([]),
        json!({}),
        json!(["dGVzdA==", 1, {"k": "YWJj"}]),
        json!({"outer": {"inner": ["SGVsbG8=", null, false]}, "n": 3}),
    ]
}

#[test]
fn strings_with_odd_lengths_are_untouched() {
    for text in ["a", "ab", "abc", "abcde", "SGVsbG8", "Hello World", "not-base64!"] {
        assert_ne!(text.len() % 4, 0);
        assert_eq!(decode(&json!(text)), json!(text));
    }
}

#[test]
fn containers_keep_shape() {
    for value in sample_values() {
        let decoded = decode(&value);
        match (&value, &decoded) {
            (Value::Array(before), Value::Array(after)) => assert_eq!(before.len(), after.len()),
            (Value::Object(before), Value::Object(after)) => {
                assert!(before.keys().eq(after.keys()));
            }
            (Value::String(_), _) => {}
            _ => assert_eq!(value, decoded),
        }
    }
}

#[test]
fn one_encoded_layer_decodes_like_the_value_itself() {
    for value in sample_values() {
        let wrapped = json!(STANDARD.encode(value.to_string()));
        assert_eq!(decode(&wrapped), decode(&value), "value: {value}");
    }
}

#[test]
fn non_utf8_payloads_are_preserved() {
    let payloads: [&[u8]; 4] = [
        &[0xFF],
        &[0xC3, 0x28],
        &[0xFF, 0xFE, 0x00, 0x01, 0x80, 0x81],
        &[0xE2, 0x82],
    ];
    for bytes in payloads {
        let encoded = STANDARD.encode(bytes);
        assert!(is_base64(&encoded));
        let doc = json!({ "bin": encoded.clone() });
        assert_eq!(decode(&doc), doc);
    }
}

#[test]
fn stacked_layers_fully_unwrap() {
    let mut layer = json!({"a": 1}).to_string();
    for _ in 0..6 {
        layer = STANDARD.encode(layer);
        assert_eq!(decode(&json!(layer.clone())), json!({"a": 1}));
    }
}

#[test]
fn depth_budget_never_panics_and_defaults_apply() {
    let doc = json!({"x": [[["SGVsbG8="]]]});
    assert_eq!(decode_with_max_depth(&doc, DEFAULT_MAX_DEPTH), decode(&doc));
    for max_depth in 0..6 {
        let out = decode_with_max_depth(&doc, max_depth);
        let leaf = &out["x"][0][0][0];
        let expected = if max_depth >= 5 { "Hello" } else { "SGVsbG8=" };
        assert_eq!(*leaf, expected, "max_depth {max_depth}");
    }
}

#[test]
fn envelope_reports_result_or_error() {
    let ok = decode_json_envelope(r#"{"name":"Sm9obg==","age":30}"#);
    assert_eq!(ok, json!({"result": r#"{"name":"John","age":30}"#}));

    let err = decode_json_envelope(r#"{"invalid": json}"#);
    assert!(err.get("result").is_none());
    assert!(err["error"].as_str().unwrap().contains("error parsing JSON input"));
}
