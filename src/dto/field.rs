//! Loosely-typed request fields.
//!
//! Clients send record fields as whatever JSON type they have at hand (`"19.99"`
//! for a fee, `4` for a rating). Each field is kept as a [`FieldValue`] so the
//! schema checks can report a wrong type as a validation message instead of
//! the whole body failing to parse.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// A string that is present and not empty
    pub fn non_empty_str(&self) -> Option<&str> {
        self.as_str().filter(|s| !s.is_empty())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric conversion with the usual loose rules: numbers as is, strings
    /// parsed after trimming (an empty string is 0), booleans 0/1, null 0.
    /// Arrays go through their text form, so `[5]` is 5, `[]` is 0 and `[1, 2]` is NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Bool(b) => if *b { 1.0 } else { 0.0 },
            FieldValue::Text(s) => parse_number(s),
            FieldValue::Other(serde_json::Value::Null) => 0.0,
            FieldValue::Other(v @ serde_json::Value::Array(_)) => parse_number(&value_text(v)),
            FieldValue::Other(_) => f64::NAN,
        }
    }

    /// Truthiness: empty strings, 0 and NaN are false, objects and arrays are true.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Other(v) => !v.is_null(),
        }
    }

    /// String conversion used when sanitizing text fields
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Other(v) => value_text(v),
        }
    }
}

/// Text form of a raw JSON value: arrays joined with commas (nulls as empty), objects opaque.
fn value_text(value: &serde_json::Value) -> String {
    use serde_json::Value;
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Deserializes a field that is present in the body, keeping an explicit `null`
/// as a value. Pair with `#[serde(default)]` so a missing key stays `None`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// Numeric value of an optional field; an absent field is NaN.
pub fn number_of(field: Option<&FieldValue>) -> f64 {
    field.map(FieldValue::to_number).unwrap_or(f64::NAN)
}

fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map(|n| n as f64).unwrap_or(f64::NAN);
    }
    // Rust also accepts "inf" and "nan" spellings which are not numbers here.
    if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        n.to_string()
    }
}
