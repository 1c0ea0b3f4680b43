//! Canonical request construction
//!
//! Two directions of work:
//! - *Load path*: turn a persisted, heterogeneously-shaped scenario record
//!   back into one canonical calculation request. Every field has a
//!   defined default; malformed historical data must never block loading
//!   a scenario for editing, so this path is total.
//! - *Submit path*: normalize edited form values before submission:
//!   shared-bandwidth sync, transponder-mode modcod rules, view-only
//!   mitigation folding, override stripping.

use chrono::{DateTime, Utc};
use lbp_schema::{
    CanonicalCalculationRequest, InterferenceBlock, IntermodulationBlock, LinkDirection,
    RuntimeParameters, ScenarioRecord, TransponderType, WaveformStrategy,
};
use serde_json::Value;

use crate::direction::resolve_direction;
use crate::field::{resolve_field, ScenarioField};
use crate::intermod::normalize_intermodulation;
use crate::value::{num_at, str_at};

/// Hard default for the shared transponder bandwidth
pub const DEFAULT_BANDWIDTH_HZ: f64 = 36e6;

fn parse_waveform(raw: &str) -> Option<WaveformStrategy> {
    match raw.trim() {
        "DVB_S2X" => Some(WaveformStrategy::DvbS2x),
        _ => None,
    }
}

fn parse_transponder(raw: &str) -> Option<TransponderType> {
    match raw.trim() {
        "TRANSPARENT" => Some(TransponderType::Transparent),
        "REGENERATIVE" => Some(TransponderType::Regenerative),
        _ => None,
    }
}

fn strategy_field(record: &ScenarioRecord, key: &str) -> Option<String> {
    record
        .snapshot_section("strategy")
        .and_then(|strategy| str_at(strategy, key))
}

/// Resolve a scenario record into a canonical calculation request
///
/// Returns `None` only for a missing record. Any snapshot content (absent,
/// partial, malformed, or from an older schema revision) resolves
/// field-by-field through defaults and never aborts the whole resolution.
/// Satellite/EIRP overrides are never restored: they are single-use,
/// entered fresh per calculation.
#[must_use]
pub fn load_scenario(record: Option<&ScenarioRecord>) -> Option<CanonicalCalculationRequest> {
    let record = record?;
    tracing::debug!(name = %record.name, "loading scenario");

    let waveform_strategy = record
        .waveform_strategy
        .as_deref()
        .and_then(parse_waveform)
        .or_else(|| {
            strategy_field(record, "waveform_strategy")
                .as_deref()
                .and_then(parse_waveform)
        })
        .unwrap_or_default();
    let transponder_type = record
        .transponder_type
        .as_deref()
        .and_then(parse_transponder)
        .or_else(|| {
            strategy_field(record, "transponder_type")
                .as_deref()
                .and_then(parse_transponder)
        })
        .unwrap_or_default();

    let runtime_raw = record.snapshot_section("runtime");

    // Newer snapshots split the runtime tree per direction; the oldest
    // revision persisted a single shared object. In the shared case the
    // downlink is constructed from the same object, with the uplink side
    // serving as the adjacent-direction echo for ground coordinates.
    let uplink_raw = runtime_raw
        .and_then(|r| r.get("uplink"))
        .filter(|v| v.is_object())
        .or(runtime_raw);
    let split_downlink = runtime_raw
        .and_then(|r| r.get("downlink"))
        .filter(|v| v.is_object());
    let (downlink_raw, downlink_sibling) = match split_downlink {
        Some(raw) => (Some(raw), None),
        None => (runtime_raw, uplink_raw),
    };

    let uplink = resolve_direction(uplink_raw, LinkDirection::Uplink, None);
    let downlink = resolve_direction(downlink_raw, LinkDirection::Downlink, downlink_sibling);

    // Shared bandwidth consults the raw snapshot values: the resolved
    // directions are already default-filled and would shadow the
    // downlink step and the hard default.
    let bandwidth_hz = runtime_raw
        .and_then(|r| num_at(r, "bandwidth_hz"))
        .or_else(|| uplink_raw.and_then(|r| num_at(r, "bandwidth_hz")))
        .or_else(|| downlink_raw.and_then(|r| num_at(r, "bandwidth_hz")))
        .unwrap_or(DEFAULT_BANDWIDTH_HZ);

    let sat_longitude_deg = runtime_raw
        .and_then(|r| num_at(r, "sat_longitude_deg"))
        .or_else(|| {
            record
                .snapshot_section("entity")
                .and_then(|entity| entity.get("satellite"))
                .filter(|v| v.is_object())
                .and_then(|satellite| num_at(satellite, "longitude_deg"))
        })
        .or_else(|| {
            record
                .snapshot_section("metadata")
                .and_then(|metadata| num_at(metadata, "sat_longitude_deg"))
        });

    let intermodulation = Some(normalize_intermodulation(
        runtime_raw.and_then(|r| r.get("intermodulation")),
    ))
    .filter(|block| *block != IntermodulationBlock::default());

    Some(CanonicalCalculationRequest {
        waveform_strategy,
        transponder_type,
        modcod_table_id: resolve_field(record, ScenarioField::ModcodTableId),
        uplink_modcod_table_id: resolve_field(record, ScenarioField::UplinkModcodTableId),
        downlink_modcod_table_id: resolve_field(record, ScenarioField::DownlinkModcodTableId),
        satellite_id: resolve_field(record, ScenarioField::SatelliteId).unwrap_or_default(),
        earth_station_tx_id: resolve_field(record, ScenarioField::EarthStationTxId),
        earth_station_rx_id: resolve_field(record, ScenarioField::EarthStationRxId),
        runtime: RuntimeParameters {
            bandwidth_hz: Some(bandwidth_hz),
            rolloff: runtime_raw.and_then(|r| num_at(r, "rolloff")),
            sat_longitude_deg,
            // Non-GEO fields are newer than every legacy copy; runtime only
            sat_latitude_deg: runtime_raw.and_then(|r| num_at(r, "sat_latitude_deg")),
            sat_altitude_km: runtime_raw.and_then(|r| num_at(r, "sat_altitude_km")),
            computation_datetime: runtime_raw.and_then(parse_computation_datetime),
            uplink,
            downlink,
            intermodulation,
        },
        overrides: None,
    })
}

fn parse_computation_datetime(runtime: &Value) -> Option<DateTime<Utc>> {
    runtime
        .get("computation_datetime")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// View-only submission adjustment, never transmitted or persisted
///
/// Mitigation is an additive dB correction the operator applies on top of
/// the persisted interference ratios. Only its effect reaches the wire:
/// [`prepare_submission`] folds it into each present C/I ratio immediately
/// before building the final request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SubmissionAdjustment {
    pub uplink_mitigation_db: Option<f64>,
    pub downlink_mitigation_db: Option<f64>,
}

impl SubmissionAdjustment {
    /// No adjustment
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Mitigation for one direction
    #[inline]
    #[must_use]
    pub fn mitigation(&self, direction: LinkDirection) -> Option<f64> {
        match direction {
            LinkDirection::Uplink => self.uplink_mitigation_db,
            LinkDirection::Downlink => self.downlink_mitigation_db,
        }
    }
}

/// Fold a mitigation value into each present C/I ratio
///
/// Absent ratios stay absent; the applied flag and notes pass through.
#[must_use]
pub fn apply_adjustment(block: &InterferenceBlock, mitigation_db: f64) -> InterferenceBlock {
    InterferenceBlock {
        adjacent_sat_ci_db: block.adjacent_sat_ci_db.map(|v| v + mitigation_db),
        cross_polar_ci_db: block.cross_polar_ci_db.map(|v| v + mitigation_db),
        other_carrier_ci_db: block.other_carrier_ci_db.map(|v| v + mitigation_db),
        applied: block.applied,
        notes: block.notes.clone(),
    }
}

/// Normalize edited form values into the final submission request
///
/// - While the transponder is transparent, the shared bandwidth is the
///   single source of truth and is copied onto both directions; a
///   directional edit with the shared field empty propagates backward
///   into the shared field. When both directions were edited
///   simultaneously, uplink wins; that rule is explicit and tested.
/// - Transparent mode clears the directional modcod ids; the shared id
///   passes through as-is, present or not, so the calculation service
///   can reject a missing one. Regenerative mode clears the shared id
///   after backfilling missing directional ids from it, mirroring the
///   load-path fallback.
/// - Mitigation folds additively into each present C/I ratio.
/// - Overrides are omitted entirely unless a sub-field survives stripping.
#[must_use]
pub fn prepare_submission(
    mut form: CanonicalCalculationRequest,
    adjustment: &SubmissionAdjustment,
) -> CanonicalCalculationRequest {
    if form.transponder_type.is_transparent() {
        sync_shared_bandwidth(&mut form.runtime);

        // The shared id is never promoted from a directional one; an
        // absent shared id stays absent and the service rejects it.
        form.uplink_modcod_table_id = None;
        form.downlink_modcod_table_id = None;
    } else {
        let shared = form.modcod_table_id.take();
        form.uplink_modcod_table_id = form.uplink_modcod_table_id.take().or_else(|| shared.clone());
        form.downlink_modcod_table_id = form.downlink_modcod_table_id.take().or(shared);
    }

    for direction in [LinkDirection::Uplink, LinkDirection::Downlink] {
        let params = form.runtime.direction_mut(direction);
        params.elevation_deg = None;
        if let Some(mitigation_db) = adjustment.mitigation(direction) {
            params.interference = apply_adjustment(&params.interference, mitigation_db);
        }
    }

    form.overrides = form.overrides.take().filter(|o| !o.is_empty()).map(|mut o| {
        o.satellite = o.satellite.filter(|s| !s.is_empty());
        o
    });

    form
}

fn sync_shared_bandwidth(runtime: &mut RuntimeParameters) {
    // Uplink before downlink: the documented tie-break when both
    // directional bandwidths were edited with the shared field empty.
    let shared = runtime
        .bandwidth_hz
        .or(runtime.uplink.bandwidth_hz)
        .or(runtime.downlink.bandwidth_hz);

    if let Some(shared) = shared {
        runtime.bandwidth_hz = Some(shared);
        runtime.uplink.bandwidth_hz = Some(shared);
        runtime.downlink.bandwidth_hz = Some(shared);
    }
}
