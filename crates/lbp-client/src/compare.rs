//! Concurrent calculation flows
//!
//! Two flows over a [`CalculationBackend`]:
//! - the comparison pair, both requests in flight at once, failing as a
//!   whole when either side fails
//! - the latest-wins dispatcher, which aborts any in-flight submission
//!   before issuing the next one

use std::sync::Arc;

use futures::future::try_join;
use lbp_schema::{CalculationResponse, CanonicalCalculationRequest};
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::calculation::CalculationBackend;
use crate::error::{ClientError, ClientResult};

/// Run both comparison calculations concurrently
///
/// Either side failing fails the whole comparison; a half-computed pair is
/// never returned.
pub async fn calculate_pair<B>(
    backend: &B,
    a: &CanonicalCalculationRequest,
    b: &CanonicalCalculationRequest,
) -> ClientResult<(CalculationResponse, CalculationResponse)>
where
    B: CalculationBackend + ?Sized,
{
    debug!("issuing comparison pair");
    try_join(backend.calculate(a), backend.calculate(b)).await
}

/// Handle to one dispatched submission
///
/// Resolves to [`ClientError::Superseded`] when a later submission aborted
/// this one.
#[derive(Debug)]
pub struct Submission {
    receiver: oneshot::Receiver<ClientResult<CalculationResponse>>,
}

impl Submission {
    /// Wait for the submission's outcome
    pub async fn outcome(self) -> ClientResult<CalculationResponse> {
        self.receiver
            .await
            .unwrap_or(Err(ClientError::Superseded))
    }
}

/// Serializes submissions so only the latest one can complete
pub struct LatestWinsDispatcher {
    backend: Arc<dyn CalculationBackend>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl LatestWinsDispatcher {
    /// Wrap a backend in latest-wins dispatch
    #[must_use]
    pub fn new(backend: Arc<dyn CalculationBackend>) -> Self {
        Self {
            backend,
            in_flight: Mutex::new(None),
        }
    }

    /// Abort any in-flight submission, then dispatch this one
    pub async fn submit(&self, request: CanonicalCalculationRequest) -> Submission {
        let mut guard = self.in_flight.lock().await;
        if let Some(previous) = guard.take() {
            info!("aborting superseded submission");
            previous.abort();
        }

        let (sender, receiver) = oneshot::channel();
        let backend = Arc::clone(&self.backend);
        let handle = tokio::spawn(async move {
            let result = backend.calculate(&request).await;
            let _ = sender.send(result);
        });
        *guard = Some(handle);

        Submission { receiver }
    }
}
