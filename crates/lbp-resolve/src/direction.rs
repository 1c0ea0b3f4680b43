//! Direction parameter resolution
//!
//! Builds one direction's full parameter set from snapshot data plus
//! hard-coded per-direction defaults, and normalizes its nested
//! interference block. Defaults come from a pure factory producing a
//! fresh value tree per call; nothing here is shared or mutated across
//! call sites.

use lbp_schema::{DirectionParameters, InterferenceBlock, LinkDirection};
use serde_json::Value;

use crate::value::{bool_at, num_at, str_at};

/// Hard defaults for one direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionDefaults {
    pub frequency_hz: f64,
    pub bandwidth_hz: f64,
    pub rain_rate_mm_per_hr: f64,
    pub temperature_k: f64,
    pub ground_alt_m: f64,
}

/// Fresh defaults for `direction`
///
/// Uplink centers on 14.25 GHz, downlink on 12 GHz (Ku-band); both share
/// a 36 MHz transponder bandwidth and a 10 mm/hr rain rate at 290 K.
#[must_use]
pub fn direction_defaults(direction: LinkDirection) -> DirectionDefaults {
    DirectionDefaults {
        frequency_hz: match direction {
            LinkDirection::Uplink => 14.25e9,
            LinkDirection::Downlink => 12e9,
        },
        bandwidth_hz: 36e6,
        rain_rate_mm_per_hr: 10.0,
        temperature_k: 290.0,
        ground_alt_m: 0.0,
    }
}

/// Normalize a raw interference block
///
/// `applied` is the raw flag OR-ed with the presence of any ratio: a
/// persisted block that carries a C/I value was applied, whatever its
/// flag says. An absent block yields all ratios unset and `applied =
/// false`.
#[must_use]
pub fn normalize_interference(raw: Option<&Value>) -> InterferenceBlock {
    let Some(raw) = raw.filter(|v| v.is_object()) else {
        return InterferenceBlock::default();
    };

    let block = InterferenceBlock {
        adjacent_sat_ci_db: num_at(raw, "adjacent_sat_ci_db"),
        cross_polar_ci_db: num_at(raw, "cross_polar_ci_db"),
        other_carrier_ci_db: num_at(raw, "other_carrier_ci_db"),
        applied: bool_at(raw, "applied"),
        notes: str_at(raw, "notes"),
    };

    InterferenceBlock {
        applied: block.applied || block.has_ratio(),
        ..block
    }
}

/// Resolve one direction's parameters from snapshot data
///
/// Per-field policy: the snapshot's own value if present, else the hard
/// per-direction default. Ground coordinates consult `sibling` before
/// defaulting to 0; the sibling echo only exists for downlink when the
/// snapshot carried a single shared runtime object. `elevation_deg` is
/// always cleared regardless of snapshot content, so the calculation
/// service recomputes it from geometry.
#[must_use]
pub fn resolve_direction(
    raw: Option<&Value>,
    direction: LinkDirection,
    sibling: Option<&Value>,
) -> DirectionParameters {
    let defaults = direction_defaults(direction);
    let raw = raw.filter(|v| v.is_object());

    let own = |key: &str| raw.and_then(|r| num_at(r, key));
    let own_or_sibling = |key: &str| {
        own(key)
            .or_else(|| sibling.filter(|v| v.is_object()).and_then(|s| num_at(s, key)))
            .unwrap_or(0.0)
    };

    DirectionParameters {
        frequency_hz: own("frequency_hz").unwrap_or(defaults.frequency_hz),
        bandwidth_hz: Some(own("bandwidth_hz").unwrap_or(defaults.bandwidth_hz)),
        // Never trust a stale elevation
        elevation_deg: None,
        rain_rate_mm_per_hr: own("rain_rate_mm_per_hr").unwrap_or(defaults.rain_rate_mm_per_hr),
        temperature_k: own("temperature_k").unwrap_or(defaults.temperature_k),
        pressure_hpa: own("pressure_hpa"),
        water_vapor_density: own("water_vapor_density"),
        ground_lat_deg: own_or_sibling("ground_lat_deg"),
        ground_lon_deg: own_or_sibling("ground_lon_deg"),
        ground_alt_m: own("ground_alt_m").unwrap_or(defaults.ground_alt_m),
        interference: normalize_interference(raw.and_then(|r| r.get("interference"))),
    }
}
