//! Field Normalizer — turns ambiguously-shaped backend fields into flat display strings.
//!
//! The backend does not guarantee a canonical shape for resume sub-fields:
//! skills may arrive as a plain string, a JSON-encoded array, or a
//! JSON-encoded object of arrays, and may change shape between records.
//! `classify` is the single entry point that resolves a raw value into a
//! `FieldValue` tag; every formatter switches over that tag instead of
//! re-sniffing shapes inline.
//!
//! Every function here is total. This module runs inside rendering paths
//! where a panic would blank the whole view, so structurally invalid input
//! is always absorbed into a fallback string and logged at debug level.

use serde_json::{Map, Value};
use tracing::debug;

pub mod extract;

/// Default display string for empty/absent fields.
pub const DEFAULT_FALLBACK: &str = "Not provided";

// ────────────────────────────────────────────────────────────────────────────
// Classification
// ────────────────────────────────────────────────────────────────────────────

/// Tagged classification of a raw backend field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Missing, null, or an empty/whitespace-only string.
    Absent,
    /// A plain (trimmed) string, including strings that looked like JSON
    /// but failed to parse.
    Raw(String),
    /// An array, either structural or decoded from a JSON-encoded string.
    List(Vec<Value>),
    /// An object, either structural or decoded from a JSON-encoded string.
    Nested(Map<String, Value>),
}

/// Classifies a raw field value.
///
/// Non-strings pass through structurally. Strings are trimmed; a trimmed
/// string wrapped in matching `{...}` or `[...]` delimiters is parsed as
/// JSON, and on parse failure the trimmed raw string is kept — backends
/// occasionally send literal prose that merely starts with a bracket.
pub fn classify(value: Option<&Value>) -> FieldValue {
    let Some(value) = value else {
        return FieldValue::Absent;
    };
    match value {
        Value::Null => FieldValue::Absent,
        Value::Array(items) => FieldValue::List(items.clone()),
        Value::Object(map) => FieldValue::Nested(map.clone()),
        Value::Bool(b) => FieldValue::Raw(b.to_string()),
        Value::Number(n) => FieldValue::Raw(n.to_string()),
        Value::String(s) => classify_str(s),
    }
}

fn classify_str(s: &str) -> FieldValue {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return FieldValue::Absent;
    }
    if looks_like_json(trimmed) {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(parsed) => return classify(Some(&parsed)),
            Err(e) => {
                debug!("field looked like JSON but failed to parse ({e}); keeping raw string");
                return FieldValue::Raw(trimmed.to_string());
            }
        }
    }
    FieldValue::Raw(trimmed.to_string())
}

fn looks_like_json(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']'))
}

// ────────────────────────────────────────────────────────────────────────────
// Formatters
// ────────────────────────────────────────────────────────────────────────────

/// Formats a list-shaped field as a `", "`-joined display string.
///
/// Arrays are trimmed and filtered (blank and null entries dropped,
/// relative order preserved). Objects are flattened one level — array
/// values are spread, nested objects contribute their own values — before
/// the same trim/filter/join rule. Plain strings pass through verbatim.
pub fn format_list_field(value: Option<&Value>, fallback: &str) -> String {
    match classify(value) {
        FieldValue::Absent => fallback.to_string(),
        FieldValue::Raw(s) => s,
        FieldValue::List(items) => join_entries(&items).unwrap_or_else(|| fallback.to_string()),
        FieldValue::Nested(map) => {
            let mut items: Vec<Value> = Vec::new();
            for v in map.values() {
                match v {
                    Value::Array(inner) => items.extend(inner.iter().cloned()),
                    Value::Object(inner) => items.extend(inner.values().cloned()),
                    other => items.push(other.clone()),
                }
            }
            join_entries(&items).unwrap_or_else(|| fallback.to_string())
        }
    }
}

/// Joins surviving entries with `", "`; `None` if nothing survives.
fn join_entries(items: &[Value]) -> Option<String> {
    let surviving: Vec<&str> = items.iter().filter_map(entry_text).collect();
    if surviving.is_empty() {
        None
    } else {
        Some(surviving.join(", "))
    }
}

/// Display text for one list entry. Blank strings, nulls, and any
/// still-nested containers are dropped — container syntax must never
/// leak into a joined display string.
fn entry_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        }
        _ => None,
    }
}

/// Tri-state boolean display: `"Yes"` for `true`, `"No"` for `false`,
/// the fallback for anything else. Falsy non-booleans (`0`, `""`) are
/// NOT coerced — they mean "unanswered", not "no".
pub fn format_boolean(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::Bool(true)) => "Yes".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        _ => fallback.to_string(),
    }
}

/// Currency display: finite numbers (or numeric strings) render as
/// `$` + rounded value with thousands separators. Non-numeric strings
/// pass through unmodified — upstream sometimes sends pre-formatted
/// currency text like `"negotiable"` or `"$80k + equity"`.
pub fn format_currency(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => DEFAULT_FALLBACK.to_string(),
        Some(Value::Number(n)) => match n.as_f64().filter(|f| f.is_finite()) {
            Some(f) => dollars(f),
            None => n.to_string(),
        },
        Some(Value::String(s)) => {
            if s.trim().is_empty() {
                return DEFAULT_FALLBACK.to_string();
            }
            match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => dollars(f),
                _ => s.clone(),
            }
        }
        Some(other) => other.to_string(),
    }
}

fn dollars(amount: f64) -> String {
    let rounded = amount.round() as i64;
    if rounded < 0 {
        format!("-${}", group_thousands(rounded.unsigned_abs()))
    } else {
        format!("${}", group_thousands(rounded as u64))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
