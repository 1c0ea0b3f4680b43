//! LBP Resolve - scenario reconciliation
//!
//! Turns heterogeneously-shaped, schema-evolving persisted scenario
//! snapshots back into one canonical, strictly-typed calculation request:
//! - Field precedence resolution across four historical snapshot locations
//! - Direction parameter resolution with per-direction defaults
//! - Interference/intermodulation normalization (presence implies applied)
//! - Canonical request building: load path, submit path (bandwidth sync,
//!   mitigation folding, transponder-mode rules), save-path snapshots
//! - Selected-output formatting
//!
//! Everything here is synchronous and pure: no suspension, no shared
//! mutable state, identical output for identical input.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod builder;
pub mod direction;
pub mod field;
pub mod intermod;
pub mod selection;
pub mod snapshot;
mod value;

pub use builder::{
    apply_adjustment, load_scenario, prepare_submission, SubmissionAdjustment,
    DEFAULT_BANDWIDTH_HZ,
};
pub use direction::{direction_defaults, normalize_interference, resolve_direction, DirectionDefaults};
pub use field::{resolve_field, ScenarioField};
pub use intermod::normalize_intermodulation;
pub use selection::{format_selection, EMPTY_VALUE};
pub use snapshot::build_payload_snapshot;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
