//! Logical field resolution across snapshot schema revisions
//!
//! A scenario record may carry the same logical id in up to four places:
//! the top-level column, the `static`/`metadata` snapshot sections, the
//! `entity` section (nested `{id}` and flat `_id` shapes), and the
//! `runtime` echo from the oldest revision. No location is authoritative
//! in isolation; this module owns the precedence tables and is the only
//! component allowed to declare a winner.

use lbp_schema::ScenarioRecord;
use serde_json::Value;

use crate::value::id_at;

/// Logical fields with multi-location history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioField {
    SatelliteId,
    ModcodTableId,
    UplinkModcodTableId,
    DownlinkModcodTableId,
    EarthStationTxId,
    EarthStationRxId,
}

impl ScenarioField {
    /// Snapshot key for this field
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            ScenarioField::SatelliteId => "satellite_id",
            ScenarioField::ModcodTableId => "modcod_table_id",
            ScenarioField::UplinkModcodTableId => "uplink_modcod_table_id",
            ScenarioField::DownlinkModcodTableId => "downlink_modcod_table_id",
            ScenarioField::EarthStationTxId => "earth_station_tx_id",
            ScenarioField::EarthStationRxId => "earth_station_rx_id",
        }
    }

}

/// One location a field value may live in, ordered oldest-last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldSource {
    /// Top-level scenario column
    TopLevel,
    /// `payload_snapshot.static.<key>` (modcod ids only)
    Static,
    /// `payload_snapshot.metadata.<key>`
    Metadata,
    /// `payload_snapshot.entity.<record>.id` (nested-object form)
    EntityNested(&'static str),
    /// `payload_snapshot.entity.<key>` (flat form)
    EntityFlat,
    /// `payload_snapshot.runtime.<key>` (oldest schema revision)
    Runtime,
}

/// First-non-empty-wins precedence per field
fn precedence(field: ScenarioField) -> &'static [FieldSource] {
    use FieldSource::*;
    match field {
        ScenarioField::SatelliteId => &[
            TopLevel,
            Metadata,
            EntityNested("satellite"),
            EntityFlat,
            Runtime,
        ],
        ScenarioField::ModcodTableId
        | ScenarioField::UplinkModcodTableId
        | ScenarioField::DownlinkModcodTableId => &[TopLevel, Static, Metadata, Runtime],
        ScenarioField::EarthStationTxId => &[
            TopLevel,
            Metadata,
            EntityNested("earth_station_tx"),
            EntityFlat,
            Runtime,
        ],
        ScenarioField::EarthStationRxId => &[
            TopLevel,
            Metadata,
            EntityNested("earth_station_rx"),
            EntityFlat,
            Runtime,
        ],
    }
}

fn top_level(record: &ScenarioRecord, field: ScenarioField) -> Option<String> {
    let raw = match field {
        ScenarioField::SatelliteId => record.satellite_id.as_deref(),
        ScenarioField::ModcodTableId => record.modcod_table_id.as_deref(),
        ScenarioField::UplinkModcodTableId => record.uplink_modcod_table_id.as_deref(),
        ScenarioField::DownlinkModcodTableId => record.downlink_modcod_table_id.as_deref(),
        ScenarioField::EarthStationTxId => record.earth_station_tx_id.as_deref(),
        ScenarioField::EarthStationRxId => record.earth_station_rx_id.as_deref(),
    }?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn from_source(
    record: &ScenarioRecord,
    field: ScenarioField,
    source: FieldSource,
) -> Option<String> {
    match source {
        FieldSource::TopLevel => top_level(record, field),
        FieldSource::Static => record
            .snapshot_section("static")
            .and_then(|s| id_at(s, field.key())),
        FieldSource::Metadata => record
            .snapshot_section("metadata")
            .and_then(|m| id_at(m, field.key())),
        FieldSource::EntityNested(entity_key) => record
            .snapshot_section("entity")
            .and_then(|e| e.get(entity_key))
            .filter(|v| v.is_object())
            .and_then(|nested| id_at(nested, "id")),
        FieldSource::EntityFlat => record
            .snapshot_section("entity")
            .and_then(|e| id_at(e, field.key())),
        FieldSource::Runtime => record
            .payload_snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.get("runtime"))
            .filter(|v| v.is_object())
            .and_then(|runtime: &Value| id_at(runtime, field.key())),
    }
}

/// Resolve one logical field from a record, first non-empty location wins
///
/// For the directional modcod ids, a miss across every location falls back
/// to the resolved shared `modcod_table_id`: a single shared table applies
/// to both directions unless directional tables were explicitly saved. The
/// fallback is one-directional; resolving the shared id never consults the
/// directional ones.
#[must_use]
pub fn resolve_field(record: &ScenarioRecord, field: ScenarioField) -> Option<String> {
    for source in precedence(field) {
        if let Some(value) = from_source(record, field, *source) {
            tracing::debug!(field = field.key(), ?source, "resolved scenario field");
            return Some(value);
        }
    }

    match field {
        ScenarioField::UplinkModcodTableId | ScenarioField::DownlinkModcodTableId => {
            resolve_field(record, ScenarioField::ModcodTableId)
        }
        _ => None,
    }
}
