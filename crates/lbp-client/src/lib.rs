//! LBP Client - HTTP collaborators
//!
//! Thin typed clients over the calculation and scenario services, plus
//! the two concurrent flows built on them:
//! - [`CalculationBackend`] seam with an HTTP implementation
//! - [`ScenarioStore`] seam with an HTTP implementation
//! - comparison pair join (both-or-fail)
//! - latest-wins submission dispatch
//!
//! No retry or backoff policy lives here; a failed call surfaces as one
//! typed [`ClientError`] and the caller decides.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod calculation;
pub mod compare;
pub mod error;
pub mod scenarios;

pub use calculation::{CalculationBackend, HttpCalculationClient, DEFAULT_TIMEOUT};
pub use compare::{calculate_pair, LatestWinsDispatcher, Submission};
pub use error::{ClientError, ClientResult};
pub use scenarios::{HttpScenarioClient, ScenarioStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
