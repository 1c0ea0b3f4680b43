//! Calculation service client
//!
//! One seam trait, one HTTP implementation. The trait keeps the facade
//! and the comparison flow testable against in-memory fakes; the HTTP
//! client POSTs the canonical request and parses the typed response.

use std::time::Duration;

use async_trait::async_trait;
use lbp_schema::{CalculationResponse, CanonicalCalculationRequest};
use reqwest::Client;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CALCULATE_PATH: &str = "/api/v1/link-budgets/calculate";

/// A backend able to run one link-budget calculation
#[async_trait]
pub trait CalculationBackend: Send + Sync {
    /// Run one calculation for an already-resolved request
    async fn calculate(
        &self,
        request: &CanonicalCalculationRequest,
    ) -> ClientResult<CalculationResponse>;
}

/// HTTP implementation of [`CalculationBackend`]
#[derive(Debug, Clone)]
pub struct HttpCalculationClient {
    client: Client,
    base_url: String,
}

impl HttpCalculationClient {
    /// Build a client for the given base URL with the default timeout
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Build a client with an explicit per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self) -> String {
        format!("{}{CALCULATE_PATH}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CalculationBackend for HttpCalculationClient {
    async fn calculate(
        &self,
        request: &CanonicalCalculationRequest,
    ) -> ClientResult<CalculationResponse> {
        let url = self.url();
        debug!(%url, satellite_id = %request.satellite_id, "submitting calculation");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body)?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_tolerates_trailing_slash() {
        let client = HttpCalculationClient::new("http://localhost:8000/").unwrap();
        assert_eq!(
            client.url(),
            "http://localhost:8000/api/v1/link-budgets/calculate"
        );
    }
}
