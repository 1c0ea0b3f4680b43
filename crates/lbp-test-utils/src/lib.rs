//! LBP Test Utils - shared fixtures and fakes
//!
//! Canned canonical requests, payload snapshot shapes across schema
//! revisions, and in-memory implementations of the service seams. Test
//! support only, never published.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod fakes;
pub mod fixtures;

pub use fakes::{Behavior, InMemoryScenarioStore, ScriptedCalculationBackend};
pub use fixtures::{
    canonical_request, direction_parameters, legacy_shared_runtime_snapshot, modern_snapshot,
    response_with_cn, scenario_with_snapshot,
};
