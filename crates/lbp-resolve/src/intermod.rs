//! Intermodulation block normalization
//!
//! Same presence-implies-applied rule as the interference normalizer: a
//! persisted block with a positive backoff or carrier count was applied,
//! whatever its flag says.

use lbp_schema::IntermodulationBlock;
use serde_json::Value;

use crate::value::{bool_at, num_at, uint_at};

/// Normalize a raw intermodulation block
///
/// Numeric fields pass through unchanged; absence yields all-unset with
/// `applied = false`.
#[must_use]
pub fn normalize_intermodulation(raw: Option<&Value>) -> IntermodulationBlock {
    let Some(raw) = raw.filter(|v| v.is_object()) else {
        return IntermodulationBlock::default();
    };

    let input_backoff_db = num_at(raw, "input_backoff_db");
    let output_backoff_db = num_at(raw, "output_backoff_db");
    let composite_carriers = uint_at(raw, "composite_carriers");

    let applied = bool_at(raw, "applied")
        || input_backoff_db.is_some_and(|v| v > 0.0)
        || output_backoff_db.is_some_and(|v| v > 0.0)
        || composite_carriers.is_some_and(|v| v > 0);

    IntermodulationBlock {
        input_backoff_db,
        output_backoff_db,
        saturation_power_dbw: num_at(raw, "saturation_power_dbw"),
        composite_carriers,
        reference_bandwidth_hz: num_at(raw, "reference_bandwidth_hz"),
        applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn backoff_presence_implies_applied() {
        let raw = json!({"input_backoff_db": 3.0, "applied": false});
        let block = normalize_intermodulation(Some(&raw));
        assert!(block.applied);
        assert_eq!(block.input_backoff_db, Some(3.0));
    }

    #[test]
    fn zero_backoff_does_not_imply_applied() {
        let raw = json!({"input_backoff_db": 0.0, "output_backoff_db": 0.0});
        let block = normalize_intermodulation(Some(&raw));
        assert!(!block.applied);
    }

    #[test]
    fn composite_carriers_imply_applied() {
        let raw = json!({"composite_carriers": 4});
        let block = normalize_intermodulation(Some(&raw));
        assert!(block.applied);
        assert_eq!(block.composite_carriers, Some(4));
    }

    #[test]
    fn empty_block_is_all_unset() {
        let block = normalize_intermodulation(Some(&json!({})));
        assert_eq!(block, IntermodulationBlock::default());
        assert!(!block.applied);
    }

    #[test]
    fn absent_block_is_all_unset() {
        assert_eq!(normalize_intermodulation(None), IntermodulationBlock::default());
    }

    #[test]
    fn numeric_fields_pass_through() {
        let raw = json!({
            "input_backoff_db": 6.0,
            "output_backoff_db": 3.5,
            "saturation_power_dbw": 20.0,
            "composite_carriers": 12,
            "reference_bandwidth_hz": 36e6,
            "applied": true
        });
        let block = normalize_intermodulation(Some(&raw));
        assert_eq!(block.output_backoff_db, Some(3.5));
        assert_eq!(block.saturation_power_dbw, Some(20.0));
        assert_eq!(block.reference_bandwidth_hz, Some(36e6));
        assert!(block.applied);
    }
}
