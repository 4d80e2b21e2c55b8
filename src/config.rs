//! Service and suggester configuration, read from `ERROR_TAXONOMY_*` variables.

use crate::error::{TaxonomyError, TaxonomyResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`AsyncErrorRegistry`](crate::service::AsyncErrorRegistry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name, used as the event source
    pub name: String,
    /// Interval between background health checks; zero disables them
    pub health_check_interval: Duration,
    /// Whether lookups and classifications emit events
    pub emit_events: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "agent-error-taxonomy".to_string(),
            health_check_interval: Duration::ZERO,
            emit_events: true,
        }
    }
}

impl ServiceConfig {
    /// Validate service configuration
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Configuration`] if the service name is blank.
    pub fn validate(&self) -> TaxonomyResult<()> {
        if self.name.trim().is_empty() {
            return Err(TaxonomyError::configuration("Service name is required"));
        }
        Ok(())
    }

    /// Load configuration from environment variables
    /// This is the ONLY place service settings read the environment
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ERROR_TAXONOMY_SERVICE_NAME` | `agent-error-taxonomy` |
    /// | `ERROR_TAXONOMY_HEALTH_CHECK_INTERVAL_SECS` | `0` |
    /// | `ERROR_TAXONOMY_EMIT_EVENTS` | `true` |
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Configuration`] if a variable is present but
    /// malformed, or the resulting configuration fails validation.
    pub fn from_env() -> TaxonomyResult<Self> {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("ERROR_TAXONOMY_SERVICE_NAME") {
            config.name = name;
        }
        if let Some(secs) = parse_env::<u64>("ERROR_TAXONOMY_HEALTH_CHECK_INTERVAL_SECS")? {
            config.health_check_interval = Duration::from_secs(secs);
        }
        if let Some(emit) = parse_env::<bool>("ERROR_TAXONOMY_EMIT_EVENTS")? {
            config.emit_events = emit;
        }

        config.validate()?;

        log_debug!(
            service = %config.name,
            health_check_interval_secs = config.health_check_interval.as_secs(),
            emit_events = config.emit_events,
            "Service configuration loaded from environment"
        );

        Ok(config)
    }
}

/// Configuration for [`RecoverySuggester`](crate::suggestions::RecoverySuggester)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggesterConfig {
    /// Ask the suggestion model first; when false only static suggestions are used
    pub use_model: bool,
    /// Context longer than this is truncated before it reaches the model
    pub max_context_chars: usize,
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        Self {
            use_model: true,
            max_context_chars: 4_000,
        }
    }
}

impl SuggesterConfig {
    /// Validate suggester configuration
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Configuration`] if `max_context_chars` is zero.
    pub fn validate(&self) -> TaxonomyResult<()> {
        if self.max_context_chars == 0 {
            return Err(TaxonomyError::configuration(
                "max_context_chars must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Load configuration from `ERROR_TAXONOMY_SUGGESTIONS_USE_MODEL` and
    /// `ERROR_TAXONOMY_SUGGESTIONS_MAX_CONTEXT_CHARS`
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::Configuration`] for malformed values.
    pub fn from_env() -> TaxonomyResult<Self> {
        let mut config = Self::default();

        if let Some(use_model) = parse_env::<bool>("ERROR_TAXONOMY_SUGGESTIONS_USE_MODEL")? {
            config.use_model = use_model;
        }
        if let Some(max) = parse_env::<usize>("ERROR_TAXONOMY_SUGGESTIONS_MAX_CONTEXT_CHARS")? {
            config.max_context_chars = max;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parse an optional environment variable; absent is `Ok(None)`
fn parse_env<T: std::str::FromStr>(key: &str) -> TaxonomyResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            TaxonomyError::configuration(format!("Invalid value for {key}: {raw:?}"))
        }),
        Err(_) => Ok(None),
    }
}
