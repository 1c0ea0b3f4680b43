//! Planner facade
//!
//! Ties resolution, comparison, and the service clients together behind
//! one surface:
//! - load a persisted scenario into a canonical request
//! - submit with latest-wins dispatch
//! - save the just-used request back as a fresh snapshot
//! - compare two scenarios end to end

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join;
use lbp_client::{
    calculate_pair, CalculationBackend, HttpCalculationClient, HttpScenarioClient,
    LatestWinsDispatcher, ScenarioStore, Submission,
};
use lbp_diff::{
    diff_parameters, diff_results, resolve_asset_names, summarize_results, ParameterRow,
    ResultRow,
};
use lbp_resolve::{
    build_payload_snapshot, format_selection, load_scenario, prepare_submission,
    SubmissionAdjustment, EMPTY_VALUE,
};
use lbp_schema::{
    CalculationResponse, CanonicalCalculationRequest, LinkDirection, ScenarioRecord,
    ScenarioStatus,
};
use tracing::info;
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::error::{PlannerError, PlannerResult};

/// The full output of one scenario comparison
#[derive(Debug, Clone)]
pub struct ScenarioComparison {
    /// Input parameter rows, asset names substituted
    pub parameters: Vec<ParameterRow>,
    /// Result rows with deltas
    pub results: Vec<ResultRow>,
}

/// Facade over scenario resolution, submission, and comparison
pub struct LinkBudgetPlanner {
    config: PlannerConfig,
    backend: Arc<dyn CalculationBackend>,
    store: Arc<dyn ScenarioStore>,
    dispatcher: LatestWinsDispatcher,
}

impl LinkBudgetPlanner {
    /// Build a planner backed by HTTP clients from configuration
    pub fn from_config(config: PlannerConfig) -> PlannerResult<Self> {
        let backend: Arc<dyn CalculationBackend> = Arc::new(HttpCalculationClient::with_timeout(
            config.backend_base_url.clone(),
            config.request_timeout,
        )?);
        let store: Arc<dyn ScenarioStore> = Arc::new(HttpScenarioClient::with_timeout(
            config.backend_base_url.clone(),
            config.request_timeout,
        )?);
        Ok(Self::with_services(config, backend, store))
    }

    /// Build a planner over explicit service implementations
    #[must_use]
    pub fn with_services(
        config: PlannerConfig,
        backend: Arc<dyn CalculationBackend>,
        store: Arc<dyn ScenarioStore>,
    ) -> Self {
        let dispatcher = LatestWinsDispatcher::new(Arc::clone(&backend));
        Self {
            config,
            backend,
            store,
            dispatcher,
        }
    }

    /// List saved scenarios up to the configured limit
    pub async fn scenarios(&self) -> PlannerResult<Vec<ScenarioRecord>> {
        Ok(self.store.list(Some(self.config.list_limit)).await?)
    }

    /// Fetch one scenario and resolve it into a canonical request
    pub async fn load(&self, id: Uuid) -> PlannerResult<CanonicalCalculationRequest> {
        let record = self.store.get(id).await?;
        info!(%id, name = %record.name, "loaded scenario");
        load_scenario(Some(&record)).ok_or(PlannerError::Unresolvable(id))
    }

    /// Submit a request, aborting any still-running earlier submission
    ///
    /// The form goes through full submission preparation (bandwidth sync,
    /// transponder-mode rules, mitigation folding, override stripping)
    /// before it is dispatched.
    pub async fn submit(
        &self,
        form: CanonicalCalculationRequest,
        adjustment: &SubmissionAdjustment,
    ) -> Submission {
        let request = prepare_submission(form, adjustment);
        info!(satellite_id = %request.satellite_id, "dispatching calculation");
        self.dispatcher.submit(request).await
    }

    /// Persist the just-used request as a named scenario
    ///
    /// Top-level columns mirror the snapshot so old list views keep working
    /// without opening the payload.
    pub async fn save(
        &self,
        name: impl Into<String>,
        description: Option<String>,
        request: &CanonicalCalculationRequest,
    ) -> PlannerResult<ScenarioRecord> {
        let mut record = ScenarioRecord::named(name);
        record.description = description;
        record.status = ScenarioStatus::Saved;
        record.waveform_strategy = Some(request.waveform_strategy.as_str().to_string());
        record.transponder_type = Some(request.transponder_type.as_str().to_string());
        record.satellite_id =
            (!request.satellite_id.is_empty()).then(|| request.satellite_id.clone());
        record.modcod_table_id = request.modcod_table_id.clone();
        record.uplink_modcod_table_id = request.uplink_modcod_table_id.clone();
        record.downlink_modcod_table_id = request.downlink_modcod_table_id.clone();
        record.earth_station_tx_id = request.earth_station_tx_id.clone();
        record.earth_station_rx_id = request.earth_station_rx_id.clone();
        record.payload_snapshot = Some(build_payload_snapshot(request, Utc::now()));

        let created = self.store.create(&record).await?;
        info!(name = %created.name, id = ?created.id, "saved scenario");
        Ok(created)
    }

    /// Delete one saved scenario
    pub async fn delete(&self, id: Uuid) -> PlannerResult<()> {
        self.store.delete(id).await?;
        info!(%id, "deleted scenario");
        Ok(())
    }

    /// Compare two saved scenarios end to end
    ///
    /// Both records are fetched and both calculations issued concurrently;
    /// either side failing fails the whole comparison. Asset ids in the
    /// parameter rows are substituted through `asset_names` afterwards.
    pub async fn compare(
        &self,
        id_a: Uuid,
        id_b: Uuid,
        asset_names: &HashMap<String, String>,
    ) -> PlannerResult<ScenarioComparison> {
        let (record_a, record_b) = try_join(self.store.get(id_a), self.store.get(id_b)).await?;

        let request_a =
            load_scenario(Some(&record_a)).ok_or(PlannerError::Unresolvable(id_a))?;
        let request_b =
            load_scenario(Some(&record_b)).ok_or(PlannerError::Unresolvable(id_b))?;

        let submit_a = prepare_submission(request_a, &SubmissionAdjustment::none());
        let submit_b = prepare_submission(request_b, &SubmissionAdjustment::none());

        let (response_a, response_b) =
            calculate_pair(self.backend.as_ref(), &submit_a, &submit_b).await?;

        let parameters =
            resolve_asset_names(diff_parameters(&submit_a, &submit_b), asset_names);
        let results = diff_results(
            &summarize_results(&response_a),
            &summarize_results(&response_b),
        );
        info!(
            differing = parameters.iter().filter(|row| row.is_different).count(),
            "compared scenarios"
        );

        Ok(ScenarioComparison {
            parameters,
            results,
        })
    }

    /// Human-readable selected-modcod label for a response
    #[must_use]
    pub fn selection_label(
        response: &CalculationResponse,
        direction: Option<LinkDirection>,
    ) -> String {
        response
            .modcod_selected
            .as_ref()
            .map(|selected| format_selection(selected, direction))
            .unwrap_or_else(|| EMPTY_VALUE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbp_schema::{SelectedModcod, SelectedOutput};

    fn response_with(selected: Option<SelectedOutput>) -> CalculationResponse {
        serde_json::from_value(serde_json::json!({
            "results": {"uplink": {}, "downlink": {}}
        }))
        .map(|mut response: CalculationResponse| {
            response.modcod_selected = selected;
            response
        })
        .unwrap()
    }

    #[test]
    fn selection_label_falls_back_to_placeholder() {
        let response = response_with(None);
        assert_eq!(LinkBudgetPlanner::selection_label(&response, None), "-");
    }

    #[test]
    fn selection_label_formats_flat_selection() {
        let response = response_with(Some(SelectedOutput::Flat(SelectedModcod {
            modulation: Some("8PSK".to_string()),
            code_rate: Some("3/4".to_string()),
            ..SelectedModcod::default()
        })));
        assert_eq!(
            LinkBudgetPlanner::selection_label(&response, None),
            "8PSK 3/4"
        );
    }
}
