//! Canned requests, responses, and snapshot shapes
//!
//! The snapshot builders intentionally cover the shapes the resolver has
//! to survive in the wild: modern sectioned snapshots, legacy flat ones,
//! and single-shared-runtime payloads with a downlink echo.

use lbp_schema::{
    CalculationResponse, CanonicalCalculationRequest, DirectionParameters, InterferenceBlock,
    RuntimeParameters, ScenarioRecord, TransponderType, WaveformStrategy,
};
use serde_json::{json, Value};

/// Direction parameters at a given carrier frequency, everything else default
#[must_use]
pub fn direction_parameters(frequency_hz: f64) -> DirectionParameters {
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

/// A baseline transparent Ku-band canonical request
#[must_use]
pub fn canonical_request(satellite_id: &str) -> CanonicalCalculationRequest {
    CanonicalCalculationRequest {
        waveform_strategy: WaveformStrategy::DvbS2x,
        transponder_type: TransponderType::Transparent,
        modcod_table_id: Some("mc-standard".to_string()),
        uplink_modcod_table_id: None,
        downlink_modcod_table_id: None,
        satellite_id: satellite_id.to_string(),
        earth_station_tx_id: Some("es-tx-1".to_string()),
        earth_station_rx_id: Some("es-rx-1".to_string()),
        runtime: RuntimeParameters {
            bandwidth_hz: Some(36e6),
            rolloff: Some(0.2),
            sat_longitude_deg: Some(128.0),
            sat_latitude_deg: None,
            sat_altitude_km: None,
            computation_datetime: None,
            uplink: direction_parameters(14.25e9),
            downlink: direction_parameters(12e9),
            intermodulation: None,
        },
        overrides: None,
    }
}

/// Modern sectioned payload snapshot with split per-direction runtime
#[must_use]
pub fn modern_snapshot(satellite_id: &str) -> Value {
    json!({
        "static": {"modcod_table_id": "mc-standard"},
        "entity": {
            "satellite": {"id": satellite_id, "longitude_deg": 128.0},
            "earth_station_tx": {"id": "es-tx-1"},
            "earth_station_rx": {"id": "es-rx-1"}
        },
        "runtime": {
            "bandwidth_hz": 36e6,
            "rolloff": 0.2,
            "sat_longitude_deg": 128.0,
            "uplink": {
                "frequency_hz": 14.25e9,
                "rain_rate_mm_per_hr": 10.0,
                "ground_lat_deg": 35.6,
                "ground_lon_deg": 139.7
            },
            "downlink": {
                "frequency_hz": 12e9,
                "rain_rate_mm_per_hr": 10.0
            }
        },
        "strategy": {"waveform_strategy": "DVB_S2X", "transponder_type": "TRANSPARENT"},
        "metadata": {"schema_version": "1.1.0", "satellite_id": satellite_id}
    })
}

/// Legacy snapshot: ids live only in `metadata`, runtime is one shared block
#[must_use]
pub fn legacy_shared_runtime_snapshot(satellite_id: &str) -> Value {
    json!({
        "runtime": {
            "frequency_hz": 14.0e9,
            "bandwidth_hz": 54e6,
            "rain_rate_mm_per_hr": 25.0,
            "ground_lat_deg": 35.6,
            "ground_lon_deg": 139.7
        },
        "metadata": {
            "satellite_id": satellite_id,
            "modcod_table_id": "mc-legacy",
            "earth_station_tx_id": "es-tx-legacy"
        }
    })
}

/// A named record carrying the given payload snapshot
#[must_use]
pub fn scenario_with_snapshot(name: &str, snapshot: Value) -> ScenarioRecord {
    let mut record = ScenarioRecord::named(name);
    record.payload_snapshot = Some(snapshot);
    record
}

/// A minimal successful response with the given per-direction C/N values
#[must_use]
pub fn response_with_cn(uplink_cn_db: f64, downlink_cn_db: f64) -> CalculationResponse {
    serde_json::from_value(json!({
        "schema_version": "1.1.0",
        "results": {
            "uplink": {"cn_db": uplink_cn_db, "fspl_db": 207.3},
            "downlink": {"cn_db": downlink_cn_db, "fspl_db": 205.8},
            "combined": {"cn_db": uplink_cn_db.min(downlink_cn_db) - 0.5, "link_margin_db": 2.0}
        },
        "modcod_selected": {"modulation": "8PSK", "code_rate": "3/4"}
    }))
    .unwrap_or_else(|error| panic!("fixture response must parse: {error}"))
}
