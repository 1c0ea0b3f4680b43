//! LBP Schema - typed data model for link-budget studies
//!
//! Defines the two worlds this system mediates between:
//! - Loosely-shaped persisted scenario records ([`ScenarioRecord`]), whose
//!   payload snapshots have accumulated several historical schema revisions
//! - The single canonical shape submitted to the calculation service
//!   ([`CanonicalCalculationRequest`]) and the results it returns
//!
//! Resolution from the former to the latter lives in `lbp-resolve`; this
//! crate only carries the shapes.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod request;
pub mod results;
pub mod scenario;

pub use request::{
    CalculationOverrides, CanonicalCalculationRequest, DirectionParameters, InterferenceBlock,
    IntermodulationBlock, LinkDirection, RuntimeParameters, SatelliteOverrides, TransponderType,
    WaveformStrategy,
};
pub use results::{
    CalculationResponse, CalculationResults, CombinedResult, DirectionResult, SelectedModcod,
    SelectedOutput,
};
pub use scenario::{ScenarioRecord, ScenarioStatus, SCHEMA_VERSION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
