//! LBP Diff - scenario and result comparison
//!
//! Field-by-field comparison of two resolved scenarios and of two
//! calculation result sets:
//! - Fixed, ordered label tables drive the rows; order never depends on
//!   which fields are present
//! - Missing values render as `-` and participate in equality
//! - Result rows carry a signed two-decimal delta when both sides parse
//!   as numbers
//! - Cosmetic asset-name substitution after the fact, ids untouched when
//!   unknown
//!
//! All of it is pure and synchronous; callers fetch, this crate compares.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod engine;
pub mod names;
pub mod rows;

pub use engine::{diff_parameters, diff_results, summarize_results, ResultSummary};
pub use names::resolve_asset_names;
pub use rows::{ParameterRow, ResultRow, MISSING};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
