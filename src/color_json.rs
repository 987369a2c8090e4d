//! Purpose: Render decoded documents as indented JSON, optionally ANSI colored.
//! Exports: `pretty_json`.
//! Role: Formatter behind `--pretty`; compact output bypasses this module.
//! Invariants: With color off, output equals `serde_json::to_string_pretty`.
//! Invariants: ANSI escapes appear only when color is enabled.
use serde_json::{Map, Value};

const INDENT: &str = "  ";

// Basic 8-color palette so output stays readable on light and dark themes.
const KEY: &str = "34";
const STRING: &str = "32";
const NUMBER: &str = "36";
const LITERAL: &str = "35";
const PUNCT: &str = "39";

pub fn pretty_json(value: &Value, use_color: bool) -> String {
    let mut painter = Painter {
        use_color,
        out: String::new(),
    };
    painter.value(value, 0);
    painter.out
}

struct Painter {
    use_color: bool,
    out: String,
}

impl Painter {
    fn value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.paint("null", LITERAL),
            Value::Bool(flag) => self.paint(if *flag { "true" } else { "false" }, LITERAL),
            Value::Number(number) => self.paint(&number.to_string(), NUMBER),
            Value::String(text) => self.paint(&quoted(text), STRING),
            Value::Array(items) => self.array(items, depth),
            Value::Object(map) => self.object(map, depth),
        }
    }

    fn array(&mut self, items: &[Value], depth: usize) {
        if items.is_empty() {
            self.paint("[]", PUNCT);
            return;
        }
        self.paint("[", PUNCT);
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.paint(",", PUNCT);
            }
            self.newline(depth + 1);
            self.value(item, depth + 1);
        }
        self.newline(depth);
        self.paint("]", PUNCT);
    }

    fn object(&mut self, map: &Map<String, Value>, depth: usize) {
        if map.is_empty() {
            self.paint("{}", PUNCT);
            return;
        }
        self.paint("{", PUNCT);
        for (idx, (key, item)) in map.iter().enumerate() {
            if idx > 0 {
                self.paint(",", PUNCT);
            }
            self.newline(depth + 1);
            self.paint(&quoted(key), KEY);
            self.paint(":", PUNCT);
            self.out.push(' ');
            self.value(item, depth + 1);
        }
        self.newline(depth);
        self.paint("}", PUNCT);
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        self.out.push_str(&INDENT.repeat(depth));
    }

    fn paint(&mut self, text: &str, color: &str) {
        if self.use_color {
            self.out.push_str(&format!("\u{1b}[{color}m{text}\u{1b}[0m"));
        } else {
            self.out.push_str(text);
        }
    }
}

fn quoted(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string())
}
