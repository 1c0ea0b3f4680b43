//! Canonical calculation request
//!
//! The single normalized shape submitted to the calculation service. A
//! request is constructed fresh on every load/compare/submit and never
//! persisted as-is; the save path re-embeds it into a payload snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Waveform strategy selecting the modcod family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WaveformStrategy {
    /// DVB-S2X waveform (the only strategy currently served)
    #[default]
    #[serde(rename = "DVB_S2X")]
    DvbS2x,
}

impl WaveformStrategy {
    /// Wire name of the strategy
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveformStrategy::DvbS2x => "DVB_S2X",
        }
    }
}

/// Transponder mode
///
/// Transparent shares one modcod table and one bandwidth across both
/// directions; regenerative uses independent per-direction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransponderType {
    #[default]
    Transparent,
    Regenerative,
}

impl TransponderType {
    /// Wire name of the mode
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TransponderType::Transparent => "TRANSPARENT",
            TransponderType::Regenerative => "REGENERATIVE",
        }
    }

    /// Whether this mode shares a single bandwidth/table across directions
    #[inline]
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        matches!(self, TransponderType::Transparent)
    }
}

/// Link direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    Uplink,
    Downlink,
}

impl LinkDirection {
    /// Wire/key name of the direction
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkDirection::Uplink => "uplink",
            LinkDirection::Downlink => "downlink",
        }
    }

}

impl std::fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-direction carrier-to-interference ratios
///
/// # Invariants
/// - `applied` is never false while any ratio is present; the resolver's
///   normalization step enforces this before a block reaches a request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InterferenceBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjacent_sat_ci_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_polar_ci_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_carrier_ci_db: Option<f64>,
    #[serde(default)]
    pub applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl InterferenceBlock {
    /// Whether any C/I ratio is present
    #[inline]
    #[must_use]
    pub fn has_ratio(&self) -> bool {
        self.adjacent_sat_ci_db.is_some()
            || self.cross_polar_ci_db.is_some()
            || self.other_carrier_ci_db.is_some()
    }
}

/// Shared transponder intermodulation block
///
/// Same presence-implies-applied invariant as [`InterferenceBlock`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntermodulationBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_backoff_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_backoff_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation_power_dbw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_carriers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_bandwidth_hz: Option<f64>,
    #[serde(default)]
    pub applied: bool,
}

/// One direction's full parameter set
///
/// `elevation_deg` is never carried forward from a snapshot; resolution
/// always clears it so the calculation service recomputes it from geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionParameters {
    pub frequency_hz: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth_hz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_deg: Option<f64>,
    pub rain_rate_mm_per_hr: f64,
    pub temperature_k: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_hpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_vapor_density: Option<f64>,
    pub ground_lat_deg: f64,
    pub ground_lon_deg: f64,
    pub ground_alt_m: f64,
    #[serde(default)]
    pub interference: InterferenceBlock,
}

/// The full runtime parameter tree of a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeParameters {
    /// Shared bandwidth; source of truth for both directions in transparent mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth_hz: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolloff: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat_longitude_deg: Option<f64>,
    // Non-GEO fields; newer schema, no legacy copies exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat_latitude_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sat_altitude_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation_datetime: Option<DateTime<Utc>>,
    pub uplink: DirectionParameters,
    pub downlink: DirectionParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermodulation: Option<IntermodulationBlock>,
}

impl RuntimeParameters {
    /// Borrow one direction's parameters
    #[inline]
    #[must_use]
    pub fn direction(&self, direction: LinkDirection) -> &DirectionParameters {
        match direction {
            LinkDirection::Uplink => &self.uplink,
            LinkDirection::Downlink => &self.downlink,
        }
    }

    /// Mutably borrow one direction's parameters
    #[inline]
    pub fn direction_mut(&mut self, direction: LinkDirection) -> &mut DirectionParameters {
        match direction {
            LinkDirection::Uplink => &mut self.uplink,
            LinkDirection::Downlink => &mut self.downlink,
        }
    }
}

/// Single-use satellite overrides, entered fresh per calculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SatelliteOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eirp_dbw: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt_db_per_k: Option<f64>,
}

impl SatelliteOverrides {
    /// Whether every sub-field is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.eirp_dbw.is_none() && self.gt_db_per_k.is_none()
    }
}

/// Calculation-time overrides
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite: Option<SatelliteOverrides>,
}

impl CalculationOverrides {
    /// Whether no override sub-field carries a value
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.satellite.map_or(true, |s| s.is_empty())
    }
}

/// The strict, single-shape output of scenario resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalCalculationRequest {
    pub waveform_strategy: WaveformStrategy,
    pub transponder_type: TransponderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modcod_table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplink_modcod_table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downlink_modcod_table_id: Option<String>,
    pub satellite_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_station_tx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_station_rx_id: Option<String>,
    pub runtime: RuntimeParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<CalculationOverrides>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn waveform_strategy_wire_name() {
        let json = serde_json::to_string(&WaveformStrategy::DvbS2x).unwrap();
        assert_eq!(json, "\"DVB_S2X\"");
    }

    #[test]
    fn transponder_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransponderType::Transparent).unwrap(),
            "\"TRANSPARENT\""
        );
        assert_eq!(
            serde_json::to_string(&TransponderType::Regenerative).unwrap(),
            "\"REGENERATIVE\""
        );
    }

    #[test]
    fn interference_has_ratio() {
        let block = InterferenceBlock {
            cross_polar_ci_db: Some(30.0),
            ..InterferenceBlock::default()
        };
        assert!(block.has_ratio());
        assert!(!InterferenceBlock::default().has_ratio());
    }

    #[test]
    fn overrides_empty_when_all_fields_unset() {
        assert!(CalculationOverrides::default().is_empty());
        let with_satellite = CalculationOverrides {
            satellite: Some(SatelliteOverrides::default()),
        };
        assert!(with_satellite.is_empty());
        let with_value = CalculationOverrides {
            satellite: Some(SatelliteOverrides {
                eirp_dbw: Some(52.0),
                gt_db_per_k: None,
            }),
        };
        assert!(!with_value.is_empty());
    }

    #[test]
    fn request_serializes_without_empty_options() {
        let request = CanonicalCalculationRequest {
            waveform_strategy: WaveformStrategy::DvbS2x,
            transponder_type: TransponderType::Transparent,
            modcod_table_id: Some("mc-1".to_string()),
            uplink_modcod_table_id: None,
            downlink_modcod_table_id: None,
            satellite_id: "sat-1".to_string(),
            earth_station_tx_id: None,
            earth_station_rx_id: None,
            runtime: RuntimeParameters {
                bandwidth_hz: Some(36e6),
                rolloff: None,
                sat_longitude_deg: Some(128.0),
                sat_latitude_deg: None,
                sat_altitude_km: None,
                computation_datetime: None,
                uplink: direction(14.25e9),
                downlink: direction(12e9),
                intermodulation: None,
            },
            overrides: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("overrides").is_none());
        assert!(value.get("uplink_modcod_table_id").is_none());
        assert_eq!(value["runtime"]["uplink"]["frequency_hz"], 14.25e9);
    }

    fn direction(frequency_hz: f64) -> DirectionParameters {
        DirectionParameters {
            frequency_hz,
            bandwidth_hz: Some(36e6),
            elevation_deg: None,
            rain_rate_mm_per_hr: 10.0,
            temperature_k: 290.0,
            pressure_hpa: None,
            water_vapor_density: None,
            ground_lat_deg: 0.0,
            ground_lon_deg: 0.0,
            ground_alt_m: 0.0,
            interference: InterferenceBlock::default(),
        }
    }
}
