//! LBP Core - the planner facade
//!
//! One surface tying the workspace together: resolve persisted scenarios
//! into canonical calculation requests, dispatch submissions with
//! latest-wins semantics, persist fresh snapshots, and compare two
//! scenarios end to end.
//!
//! The heavy lifting lives in the member crates; this one owns
//! configuration, the aggregate error, and the flow orchestration.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod planner;

pub use config::PlannerConfig;
pub use error::{PlannerError, PlannerResult};
pub use planner::{LinkBudgetPlanner, ScenarioComparison};

// The member crates, re-exported for single-dependency consumers
pub use lbp_client as client;
pub use lbp_diff as diff;
pub use lbp_resolve as resolve;
pub use lbp_schema as schema;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
