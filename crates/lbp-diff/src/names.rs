//! Asset name resolution
//!
//! Parameter rows carry raw asset ids; for presentation, ids with a known
//! display name are substituted after the diff. Substitution is purely
//! cosmetic: comparison flags were computed on the raw ids and stay as
//! they are.

use std::collections::HashMap;

use crate::rows::ParameterRow;

/// Row keys whose values are asset ids eligible for substitution
const ID_KEYS: &[&str] = &[
    "satellite_id",
    "earth_station_tx_id",
    "earth_station_rx_id",
    "modcod_table_id",
    "uplink_modcod_table_id",
    "downlink_modcod_table_id",
];

/// Replace known asset ids in id-bearing rows with their display names
///
/// Unknown ids are left untouched, so a deleted asset still shows its raw
/// id rather than disappearing from the comparison.
#[must_use]
pub fn resolve_asset_names(
    rows: Vec<ParameterRow>,
    names: &HashMap<String, String>,
) -> Vec<ParameterRow> {
    rows.into_iter()
        .map(|mut row| {
            if ID_KEYS.contains(&row.key) {
                if let Some(name) = names.get(&row.value_a) {
                    row.value_a = name.clone();
                }
                if let Some(name) = names.get(&row.value_b) {
                    row.value_b = name.clone();
                }
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(key: &'static str, value_a: &str, value_b: &str) -> ParameterRow {
        ParameterRow {
            key,
            label: key,
            value_a: value_a.to_string(),
            value_b: value_b.to_string(),
            is_different: value_a != value_b,
        }
    }

    #[test]
    fn known_id_is_substituted_on_both_sides() {
        let names: HashMap<String, String> =
            [("sat-001".to_string(), "Known Satellite".to_string())].into();
        let rows = resolve_asset_names(vec![row("satellite_id", "sat-001", "sat-001")], &names);

        assert_eq!(rows[0].value_a, "Known Satellite");
        assert_eq!(rows[0].value_b, "Known Satellite");
        assert!(!rows[0].is_different);
    }

    #[test]
    fn unknown_id_is_left_untouched() {
        let names: HashMap<String, String> =
            [("sat-001".to_string(), "Known Satellite".to_string())].into();
        let rows = resolve_asset_names(
            vec![row("satellite_id", "sat-001", "sat-999")],
            &names,
        );

        assert_eq!(rows[0].value_a, "Known Satellite");
        assert_eq!(rows[0].value_b, "sat-999");
    }

    #[test]
    fn difference_flag_survives_substitution() {
        // Two distinct ids mapping to the same display name still diff
        let names: HashMap<String, String> = [
            ("mc-1".to_string(), "Standard Table".to_string()),
            ("mc-2".to_string(), "Standard Table".to_string()),
        ]
        .into();
        let rows = resolve_asset_names(vec![row("modcod_table_id", "mc-1", "mc-2")], &names);

        assert_eq!(rows[0].value_a, rows[0].value_b);
        assert!(rows[0].is_different);
    }

    #[test]
    fn non_id_rows_never_substituted() {
        let names: HashMap<String, String> =
            [("14250000000".to_string(), "Ku uplink".to_string())].into();
        let rows = resolve_asset_names(
            vec![row("uplink.frequency_hz", "14250000000", "14250000000")],
            &names,
        );

        assert_eq!(rows[0].value_a, "14250000000");
    }
}
