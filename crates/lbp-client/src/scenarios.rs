//! Scenario persistence client
//!
//! CRUD over the scenario service. List responses arrive paginated; the
//! store surface flattens them to the items, which is all comparison and
//! load flows consume.

use std::time::Duration;

use async_trait::async_trait;
use lbp_schema::ScenarioRecord;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::calculation::DEFAULT_TIMEOUT;
use crate::error::{ClientError, ClientResult};

const SCENARIOS_PATH: &str = "/api/v1/scenarios";

/// Paginated scenario list as the service returns it
#[derive(Debug, Deserialize)]
struct ScenarioPage {
    items: Vec<ScenarioRecord>,
    #[allow(dead_code)]
    total: u64,
}

/// A store of persisted scenario records
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    /// List saved scenarios, newest first
    async fn list(&self, limit: Option<u32>) -> ClientResult<Vec<ScenarioRecord>>;

    /// Fetch one scenario with its full payload snapshot
    async fn get(&self, id: Uuid) -> ClientResult<ScenarioRecord>;

    /// Persist a new scenario, returning it with its assigned id
    async fn create(&self, record: &ScenarioRecord) -> ClientResult<ScenarioRecord>;

    /// Delete one scenario
    async fn delete(&self, id: Uuid) -> ClientResult<()>;
}

/// HTTP implementation of [`ScenarioStore`]
#[derive(Debug, Clone)]
pub struct HttpScenarioClient {
    client: Client,
    base_url: String,
}

impl HttpScenarioClient {
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

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}{SCENARIOS_PATH}{suffix}",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn check(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl ScenarioStore for HttpScenarioClient {
    async fn list(&self, limit: Option<u32>) -> ClientResult<Vec<ScenarioRecord>> {
        let mut request = self.client.get(self.url(""));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = Self::check(request.send().await?).await?;
        let body = response.text().await?;
        let page: ScenarioPage = serde_json::from_str(&body)?;
        debug!(count = page.items.len(), "listed scenarios");
        Ok(page.items)
    }

    async fn get(&self, id: Uuid) -> ClientResult<ScenarioRecord> {
        let response = self
            .client
            .get(self.url(&format!("/{id}")))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create(&self, record: &ScenarioRecord) -> ClientResult<ScenarioRecord> {
        let response = self.client.post(self.url("")).json(record).send().await?;
        let response = Self::check(response).await?;
        let body = response.text().await?;
        let created: ScenarioRecord = serde_json::from_str(&body)?;
        debug!(name = %created.name, "created scenario");
        Ok(created)
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/{id}")))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn urls_compose_against_trailing_slash() {
        let client = HttpScenarioClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url(""), "http://localhost:8000/api/v1/scenarios");
        assert_eq!(
            client.url("/00000000-0000-0000-0000-000000000000"),
            "http://localhost:8000/api/v1/scenarios/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn page_parses_items() {
        let page: ScenarioPage = serde_json::from_str(
            r#"{"items": [{"name": "baseline"}], "total": 1, "limit": 50, "offset": 0}"#,
        )
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "baseline");
    }
}
