//! Persisted scenario records
//!
//! A scenario is a named link-budget configuration plus its last computed
//! snapshot. Records are created and mutated only by the persistence
//! service; this crate reads them tolerantly. The payload snapshot has
//! carried the same logical ids in different locations across schema
//! revisions, so it stays a loose [`serde_json::Value`] here and the
//! resolver decides which copy wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Snapshot schema revision written on save
pub const SCHEMA_VERSION: &str = "1.1.0";

/// Scenario lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScenarioStatus {
    #[default]
    Draft,
    Saved,
    Archived,
}

/// A persisted scenario record
///
/// Every field except `name` tolerates absence: historical records predate
/// most of the top-level columns, and their values then live only inside
/// the payload snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ScenarioStatus,
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waveform_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transponder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satellite_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modcod_table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplink_modcod_table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downlink_modcod_table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_station_tx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub earth_station_rx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_snapshot: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl ScenarioRecord {
    /// Create a bare named record with no snapshot
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            status: ScenarioStatus::Draft,
            schema_version: default_schema_version(),
            waveform_strategy: None,
            transponder_type: None,
            satellite_id: None,
            modcod_table_id: None,
            uplink_modcod_table_id: None,
            downlink_modcod_table_id: None,
            earth_station_tx_id: None,
            earth_station_rx_id: None,
            payload_snapshot: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Borrow a snapshot sub-object (`static`, `entity`, `runtime`, `metadata`, ...)
    ///
    /// Returns `None` when the snapshot or the section is absent or not an
    /// object; malformed sections are treated as missing.
    #[must_use]
    pub fn snapshot_section(&self, section: &str) -> Option<&Value> {
        self.payload_snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.get(section))
            .filter(|value| value.is_object())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_reads_minimal_legacy_json() {
        let record: ScenarioRecord = serde_json::from_value(json!({
            "name": "legacy"
        }))
        .unwrap();

        assert_eq!(record.name, "legacy");
        assert_eq!(record.status, ScenarioStatus::Draft);
        assert_eq!(record.schema_version, SCHEMA_VERSION);
        assert!(record.payload_snapshot.is_none());
    }

    #[test]
    fn snapshot_section_ignores_non_objects() {
        let mut record = ScenarioRecord::named("s");
        record.payload_snapshot = Some(json!({
            "metadata": {"satellite_id": "sat-1"},
            "runtime": "corrupt"
        }));

        assert!(record.snapshot_section("metadata").is_some());
        assert!(record.snapshot_section("runtime").is_none());
        assert!(record.snapshot_section("entity").is_none());
    }

    #[test]
    fn status_round_trips() {
        let json = serde_json::to_string(&ScenarioStatus::Archived).unwrap();
        assert_eq!(json, "\"Archived\"");
        let back: ScenarioStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ScenarioStatus::Archived);
    }
}
