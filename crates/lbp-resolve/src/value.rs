//! Tolerant accessors over loose snapshot JSON
//!
//! Historical snapshots carry numbers as JSON numbers or as strings
//! (older frontends serialized form inputs verbatim), ids as strings, and
//! cleared selects as `""`. These helpers read all of those shapes and
//! treat anything else as absent.

use serde_json::Value;

/// Read a non-empty identifier string at `key`
///
/// Numbers are accepted and rendered as their decimal form; empty and
/// whitespace-only strings count as absent.
#[must_use]
pub(crate) fn id_at(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a finite number at `key`, tolerating numeric strings
#[must_use]
pub(crate) fn num_at(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Read a non-negative integer at `key`
#[must_use]
pub(crate) fn uint_at(value: &Value, key: &str) -> Option<u32> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Read a boolean at `key`; absent or malformed reads as `false`
#[must_use]
pub(crate) fn bool_at(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Read a non-empty string at `key`
#[must_use]
pub(crate) fn str_at(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
