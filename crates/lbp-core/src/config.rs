//! Planner configuration

use std::time::Duration;

use lbp_client::DEFAULT_TIMEOUT;

/// Configuration for the planner facade
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Base URL of the backend serving calculations and scenarios
    pub backend_base_url: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
    /// Scenario list page size
    pub list_limit: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            backend_base_url: "http://localhost:8000".to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            list_limit: 50,
        }
    }
}

impl PlannerConfig {
    /// Create a configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL
    #[must_use]
    pub fn with_backend_base_url(mut self, url: impl Into<String>) -> Self {
        self.backend_base_url = url.into();
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the scenario list page size
    #[must_use]
    pub fn with_list_limit(mut self, limit: u32) -> Self {
        self.list_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_chains() {
        let config = PlannerConfig::new()
            .with_backend_base_url("http://backend:9000")
            .with_request_timeout(Duration::from_secs(3))
            .with_list_limit(10);

        assert_eq!(config.backend_base_url, "http://backend:9000");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.list_limit, 10);
    }

    #[test]
    fn defaults_are_sane() {
        let config = PlannerConfig::default();
        assert_eq!(config.backend_base_url, "http://localhost:8000");
        assert_eq!(config.list_limit, 50);
    }
}
