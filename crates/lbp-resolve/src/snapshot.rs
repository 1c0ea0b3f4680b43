//! Payload snapshot construction for scenario persistence
//!
//! On save, the just-used canonical request is re-embedded into a fresh
//! payload snapshot: the `static` and `metadata` sections echo the modcod
//! and asset ids, `entity` carries minimal asset stubs, and `runtime`
//! carries the parameter tree as submitted. These echoes are what the
//! field resolver later reads back, so the keys here and the precedence
//! tables in `field` must stay in agreement.

use chrono::{DateTime, Utc};
use lbp_schema::{CanonicalCalculationRequest, SCHEMA_VERSION};
use serde_json::{json, Map, Value};

fn id_stub(id: &Option<String>) -> Value {
    match id {
        Some(id) if !id.is_empty() => json!({ "id": id }),
        _ => Value::Null,
    }
}

fn non_empty(id: &str) -> Option<&str> {
    (!id.is_empty()).then_some(id)
}

/// Build the payload snapshot persisted alongside a scenario
///
/// The shared bandwidth is echoed into the runtime section only for
/// transparent transponders; regenerative runtimes keep the per-direction
/// values as the source of truth. Overrides are persisted only when a
/// sub-field survived submission stripping.
#[must_use]
pub fn build_payload_snapshot(
    request: &CanonicalCalculationRequest,
    computed_at: DateTime<Utc>,
) -> Value {
    let mut runtime = match serde_json::to_value(&request.runtime) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    if !request.transponder_type.is_transparent() {
        runtime.remove("bandwidth_hz");
    }

    json!({
        "static": {
            "modcod_table_id": request.modcod_table_id,
            "uplink_modcod_table_id": request.uplink_modcod_table_id,
            "downlink_modcod_table_id": request.downlink_modcod_table_id,
        },
        "entity": {
            "satellite": id_stub(&Some(request.satellite_id.clone())),
            "earth_station_tx": id_stub(&request.earth_station_tx_id),
            "earth_station_rx": id_stub(&request.earth_station_rx_id),
        },
        "runtime": Value::Object(runtime),
        "strategy": {
            "waveform_strategy": request.waveform_strategy.as_str(),
            "transponder_type": request.transponder_type.as_str(),
        },
        "metadata": {
            "schema_version": SCHEMA_VERSION,
            "computed_at": computed_at.to_rfc3339(),
            "modcod_table_id": request.modcod_table_id,
            "uplink_modcod_table_id": request.uplink_modcod_table_id,
            "downlink_modcod_table_id": request.downlink_modcod_table_id,
            "satellite_id": non_empty(&request.satellite_id),
            "earth_station_tx_id": request.earth_station_tx_id,
            "earth_station_rx_id": request.earth_station_rx_id,
        },
        "overrides": request.overrides.filter(|o| !o.is_empty()),
    })
}
