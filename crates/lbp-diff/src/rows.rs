//! Diff row types
//!
//! One labeled comparison unit between two resolved states or result
//! sets. Rows are ephemeral plain data, rebuilt on every comparison.

use serde::Serialize;

/// Placeholder for a value missing on one side
///
/// Participates in equality like any other string, so present-vs-absent
/// is reported as a difference.
pub const MISSING: &str = "-";

/// One compared parameter of two canonical requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRow {
    /// Stable machine key (`uplink.frequency_hz`, `satellite_id`, ...)
    pub key: &'static str,
    /// Human-readable label
    pub label: &'static str,
    pub value_a: String,
    pub value_b: String,
    pub is_different: bool,
}

/// One compared value of two result summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub key: &'static str,
    pub label: &'static str,
    pub value_a: String,
    pub value_b: String,
    /// Signed two-decimal `b - a`, or `-` when either side is non-numeric
    pub delta: String,
    pub is_different: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rows_serialize_with_plain_field_names() {
        let row = ParameterRow {
            key: "satellite_id",
            label: "Satellite",
            value_a: "sat-1".to_string(),
            value_b: MISSING.to_string(),
            is_different: true,
        };

        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "key": "satellite_id",
                "label": "Satellite",
                "value_a": "sat-1",
                "value_b": "-",
                "is_different": true
            })
        );
    }
}
