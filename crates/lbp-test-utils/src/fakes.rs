//! In-memory service fakes
//!
//! Drop-in [`CalculationBackend`] and [`ScenarioStore`] implementations
//! for tests that exercise the flows without a network.

use std::collections::HashMap;
use std::future::pending;
use std::sync::Mutex;

use async_trait::async_trait;
use lbp_client::{CalculationBackend, ClientError, ClientResult, ScenarioStore};
use lbp_schema::{CalculationResponse, CanonicalCalculationRequest, ScenarioRecord};
use uuid::Uuid;

/// Backend answering from a per-satellite-id script
///
/// Ids scripted with [`Behavior::Hang`] never resolve, which is what the
/// latest-wins tests need; unscripted ids answer with the default
/// response when one is set, otherwise a 404-style status error.
pub struct ScriptedCalculationBackend {
    scripts: Mutex<HashMap<String, Behavior>>,
    fallback: Option<CalculationResponse>,
}

/// What a scripted satellite id does when calculated
pub enum Behavior {
    /// Answer with this response
    Respond(CalculationResponse),
    /// Fail with this HTTP status
    Fail(u16),
    /// Never resolve
    Hang,
}

impl ScriptedCalculationBackend {
    /// Backend with no scripts and no fallback
    #[must_use]
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback: None,
        }
    }

    /// Backend answering every request with the same response
    #[must_use]
    pub fn always(response: CalculationResponse) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback: Some(response),
        }
    }

    /// Script one satellite id
    #[must_use]
    pub fn with_script(self, satellite_id: &str, behavior: Behavior) -> Self {
        self.scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(satellite_id.to_string(), behavior);
        self
    }
}

impl Default for ScriptedCalculationBackend {
    fn default() -> Self {
        Self::new()
    }
}

enum Outcome {
    Result(ClientResult<CalculationResponse>),
    Hang,
}

#[async_trait]
impl CalculationBackend for ScriptedCalculationBackend {
    async fn calculate(
        &self,
        request: &CanonicalCalculationRequest,
    ) -> ClientResult<CalculationResponse> {
        let outcome = {
            let scripts = self
                .scripts
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match scripts.get(&request.satellite_id) {
                Some(Behavior::Respond(response)) => Outcome::Result(Ok(response.clone())),
                Some(Behavior::Fail(status)) => Outcome::Result(Err(ClientError::Status {
                    status: *status,
                    body: "scripted failure".to_string(),
                })),
                Some(Behavior::Hang) => Outcome::Hang,
                None => match &self.fallback {
                    Some(response) => Outcome::Result(Ok(response.clone())),
                    None => Outcome::Result(Err(ClientError::Status {
                        status: 404,
                        body: format!("no script for satellite {}", request.satellite_id),
                    })),
                },
            }
        };

        match outcome {
            Outcome::Result(result) => result,
            Outcome::Hang => pending().await,
        }
    }
}

/// Scenario store over a plain in-memory map
pub struct InMemoryScenarioStore {
    records: Mutex<HashMap<Uuid, ScenarioRecord>>,
}

impl InMemoryScenarioStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Store pre-seeded with records; missing ids are assigned
    #[must_use]
    pub fn seeded(records: impl IntoIterator<Item = ScenarioRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store
                .records
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            for mut record in records {
                let id = *record.id.get_or_insert_with(Uuid::new_v4);
                map.insert(id, record);
            }
        }
        store
    }

    fn not_found(id: Uuid) -> ClientError {
        ClientError::Status {
            status: 404,
            body: format!("scenario {id} not found"),
        }
    }
}

impl Default for InMemoryScenarioStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScenarioStore for InMemoryScenarioStore {
    async fn list(&self, limit: Option<u32>) -> ClientResult<Vec<ScenarioRecord>> {
        let map = self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut records: Vec<ScenarioRecord> = map.values().cloned().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        if let Some(limit) = limit {
            records.truncate(limit as usize);
        }
        Ok(records)
    }

    async fn get(&self, id: Uuid) -> ClientResult<ScenarioRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, record: &ScenarioRecord) -> ClientResult<ScenarioRecord> {
        let mut stored = record.clone();
        let id = *stored.id.get_or_insert_with(Uuid::new_v4);
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> ClientResult<()> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}
