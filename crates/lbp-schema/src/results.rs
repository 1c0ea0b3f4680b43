//! Calculation service results
//!
//! Shapes returned by the calculation service: per-direction numeric
//! blocks, an optional combined block, and the selected modcod. The
//! selected value arrives either as a single flat record or as an
//! `{uplink, downlink}` pair; the two shapes are discriminated once, at
//! the parse boundary, into the tagged [`SelectedOutput`] variant.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Selected modcod for one slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectedModcod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modulation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_rate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_ebno_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_cn0_dbhz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_bits_per_symbol: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolloff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pilots: Option<bool>,
}

/// A possibly-directional result selection
///
/// Regenerative calculations select a modcod per direction; transparent
/// calculations select a single one. The wire format is structural, so
/// deserialization inspects the object for an `uplink`/`downlink` key and
/// tags the variant here instead of duck-typing at every consumption site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SelectedOutput {
    Flat(SelectedModcod),
    Directional {
        uplink: Option<SelectedModcod>,
        downlink: Option<SelectedModcod>,
    },
}

impl<'de> Deserialize<'de> for SelectedOutput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let object = value
            .as_object()
            .ok_or_else(|| D::Error::custom("selected output must be an object"))?;

        if object.contains_key("uplink") || object.contains_key("downlink") {
            let slot = |key: &str| -> Result<Option<SelectedModcod>, D::Error> {
                match object.get(key) {
                    None | Some(Value::Null) => Ok(None),
                    Some(inner) => serde_json::from_value(inner.clone())
                        .map(Some)
                        .map_err(D::Error::custom),
                }
            };
            Ok(SelectedOutput::Directional {
                uplink: slot("uplink")?,
                downlink: slot("downlink")?,
            })
        } else {
            serde_json::from_value(value)
                .map(SelectedOutput::Flat)
                .map_err(D::Error::custom)
        }
    }
}

/// Numeric results for one direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionResult {
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub fspl_db: Option<f64>,
    #[serde(default)]
    pub rain_loss_db: Option<f64>,
    #[serde(default)]
    pub gas_loss_db: Option<f64>,
    #[serde(default)]
    pub cloud_loss_db: Option<f64>,
    #[serde(default)]
    pub atm_loss_db: Option<f64>,
    #[serde(default)]
    pub antenna_pointing_loss_db: Option<f64>,
    #[serde(default)]
    pub gt_db_per_k: Option<f64>,
    #[serde(default)]
    pub cn_db: Option<f64>,
    #[serde(default)]
    pub cn0_dbhz: Option<f64>,
    #[serde(default)]
    pub link_margin_db: Option<f64>,
    #[serde(default)]
    pub clean_link_margin_db: Option<f64>,
    #[serde(default)]
    pub clean_cn_db: Option<f64>,
    #[serde(default)]
    pub modcod_selected: Option<String>,
    #[serde(default)]
    pub eirp_dbw: Option<f64>,
    #[serde(default)]
    pub bandwidth_hz: Option<f64>,
    #[serde(default)]
    pub cni_db: Option<f64>,
    #[serde(default)]
    pub cni0_dbhz: Option<f64>,
    #[serde(default)]
    pub c_im_db: Option<f64>,
    #[serde(default)]
    pub interference_applied: bool,
    #[serde(default)]
    pub intermod_applied: bool,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

/// Combined end-to-end results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    #[serde(default)]
    pub cn_db: Option<f64>,
    #[serde(default)]
    pub cn0_dbhz: Option<f64>,
    #[serde(default)]
    pub cni_db: Option<f64>,
    #[serde(default)]
    pub cni0_dbhz: Option<f64>,
    #[serde(default)]
    pub c_im_db: Option<f64>,
    #[serde(default)]
    pub link_margin_db: Option<f64>,
    #[serde(default)]
    pub clean_link_margin_db: Option<f64>,
    #[serde(default)]
    pub clean_cn_db: Option<f64>,
}

/// Results keyed by direction plus the optional combined block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResults {
    pub uplink: DirectionResult,
    pub downlink: DirectionResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined: Option<CombinedResult>,
}

/// Full calculation service response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    #[serde(default)]
    pub schema_version: Option<String>,
    pub results: CalculationResults,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modcod_selected: Option<SelectedOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_link_margin_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_cn_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combined_cn0_dbhz: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_selection_parses_as_flat() {
        let output: SelectedOutput = serde_json::from_value(json!({
            "id": "mc-8psk-34",
            "modulation": "8PSK",
            "code_rate": "3/4"
        }))
        .unwrap();

        match output {
            SelectedOutput::Flat(modcod) => {
                assert_eq!(modcod.modulation.as_deref(), Some("8PSK"));
                assert_eq!(modcod.code_rate.as_deref(), Some("3/4"));
            }
            SelectedOutput::Directional { .. } => panic!("expected flat variant"),
        }
    }

    #[test]
    fn directional_selection_parses_as_directional() {
        let output: SelectedOutput = serde_json::from_value(json!({
            "uplink": {"modulation": "QPSK", "code_rate": "1/2"},
            "downlink": null
        }))
        .unwrap();

        match output {
            SelectedOutput::Directional { uplink, downlink } => {
                assert_eq!(uplink.unwrap().modulation.as_deref(), Some("QPSK"));
                assert!(downlink.is_none());
            }
            SelectedOutput::Flat(_) => panic!("expected directional variant"),
        }
    }

    #[test]
    fn single_direction_key_still_directional() {
        let output: SelectedOutput =
            serde_json::from_value(json!({"downlink": {"id": "mc-1"}})).unwrap();
        assert!(matches!(
            output,
            SelectedOutput::Directional { uplink: None, .. }
        ));
    }

    #[test]
    fn response_tolerates_missing_combined() {
        let response: CalculationResponse = serde_json::from_value(json!({
            "results": {
                "uplink": {"cn_db": 11.2},
                "downlink": {"cn_db": 9.8}
            }
        }))
        .unwrap();

        assert!(response.results.combined.is_none());
        assert_eq!(response.results.uplink.cn_db, Some(11.2));
    }
}
