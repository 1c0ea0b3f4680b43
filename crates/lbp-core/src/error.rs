//! Planner error types

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the planner facade
///
/// Resolution itself is total and contributes no variants; everything that
/// can fail is a service call or a record that vanished underneath us.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// A calculation or persistence call failed
    #[error(transparent)]
    Client(#[from] lbp_client::ClientError),

    /// A fetched record produced no resolvable request
    #[error("scenario {0} could not be resolved")]
    Unresolvable(Uuid),
}

/// Result type alias for planner operations
pub type PlannerResult<T> = std::result::Result<T, PlannerError>;
