//! Field values and the loose coercions validators apply to them.
//!
//! Form values arrive from the UI layer untyped, so they are kept as
//! [`serde_json::Value`]. The helpers here read those values the way a
//! browser form would: truthiness, string form, length, numeric coercion and
//! strict equality.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
pub use serde_json::Value;

/// Current contents of a form, keyed by field name.
pub type ValueMap = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

static DECIMAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("decimal literal pattern")
});

/// Builds a [`ValueMap`] from a JSON object.
///
/// Anything other than an object yields an empty map.
///
/// ```rust
/// use finboard_forms::value::{value_map, Value};
///
/// let values = value_map(serde_json::json!({"email": "", "age": 30}));
/// assert_eq!(values.len(), 2);
/// assert_eq!(values["age"], Value::from(30));
/// ```
pub fn value_map(json: Value) -> ValueMap {
    match json {
        Value::Object(fields) => fields.into_iter().collect(),
        _ => ValueMap::new(),
    }
}

/// Returns the value of a field, reading a missing field as `null`.
pub fn field<'a>(values: &'a ValueMap, name: &str) -> &'a Value {
    values.get(name).unwrap_or(&NULL)
}

/// Truthiness: `null`, `false`, `0` and `""` are falsy; everything else,
/// including empty arrays and objects, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a value as a browser would print it.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Bool(_) | Value::Number(_) => number_or_bool_string(value),
    }
}

fn number_or_bool_string(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f.fract() == 0.0 && f.abs() < 1e21 {
                    format!("{f:.0}")
                } else {
                    f.to_string()
                }
            }
        }
        _ => String::new(),
    }
}

/// Length of a value: UTF-16 code units for strings, elements for arrays.
///
/// Returns `None` for values that have no length.
pub fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.encode_utf16().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}

/// Numeric coercion in the style of the `Number()` conversion.
///
/// Returns `NaN` when the value does not read as a number.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => parse_number(&to_display_string(single)),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn parse_number(raw: &str) -> f64 {
    let text = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    if DECIMAL_LITERAL.is_match(text) {
        text.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
        })
        .unwrap_or(f64::NAN)
}

/// Strict equality: no type coercion, numbers compared by value.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        _ => left == right,
    }
}
