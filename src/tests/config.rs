// Unit Tests for Taxonomy Configuration
//
// UNIT UNDER TEST: ServiceConfig, SuggesterConfig
//
// BUSINESS RESPONSIBILITY:
//   - Supplies safe defaults for the async service and the suggester
//   - Loads overrides from environment variables in one place
//   - Rejects malformed or out-of-range values before use
//
// TEST COVERAGE:
//   - Default values
//   - Environment overrides and malformed values
//   - Validation failures

use crate::config::{ServiceConfig, SuggesterConfig};
use crate::error::TaxonomyError;
use serial_test::serial;
use std::time::Duration;

const SERVICE_VARS: [&str; 3] = [
    "ERROR_TAXONOMY_SERVICE_NAME",
    "ERROR_TAXONOMY_HEALTH_CHECK_INTERVAL_SECS",
    "ERROR_TAXONOMY_EMIT_EVENTS",
];
const SUGGESTER_VARS: [&str; 2] = [
    "ERROR_TAXONOMY_SUGGESTIONS_USE_MODEL",
    "ERROR_TAXONOMY_SUGGESTIONS_MAX_CONTEXT_CHARS",
];

fn clear_env() {
    for key in SERVICE_VARS.iter().chain(SUGGESTER_VARS.iter()) {
        std::env::remove_var(key);
    }
}

#[cfg(test)]
mod service_config_tests {
    use super::*;

    #[test]
    fn test_default_service_config() {
        // Test verifies defaults match the documented values
        // Ensures an unconfigured service emits events without health polling

        // Act
        let config = ServiceConfig::default();

        // Assert
        assert_eq!(config.name, "agent-error-taxonomy");
        assert_eq!(config.health_check_interval, Duration::ZERO);
        assert!(config.emit_events);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_name_fails_validation() {
        // Test verifies a blank service name is rejected
        // Ensures events always carry a usable source

        // Arrange
        let config = ServiceConfig {
            name: "  ".to_string(),
            ..ServiceConfig::default()
        };

        // Act & Assert
        assert!(matches!(
            config.validate(),
            Err(TaxonomyError::Configuration { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables_uses_defaults() {
        // Test verifies missing variables leave defaults untouched
        // Ensures from_env is safe in bare environments

        // Arrange
        clear_env();

        // Act
        let config = ServiceConfig::from_env().unwrap();

        // Assert
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_applies_overrides() {
        // Test verifies each service variable overrides its field
        // Ensures deployments can tune the service without code changes

        // Arrange
        clear_env();
        std::env::set_var("ERROR_TAXONOMY_SERVICE_NAME", "taxonomy-eu");
        std::env::set_var("ERROR_TAXONOMY_HEALTH_CHECK_INTERVAL_SECS", "30");
        std::env::set_var("ERROR_TAXONOMY_EMIT_EVENTS", "false");

        // Act
        let config = ServiceConfig::from_env().unwrap();
        clear_env();

        // Assert
        assert_eq!(config.name, "taxonomy-eu");
        assert_eq!(config.health_check_interval, Duration::from_secs(30));
        assert!(!config.emit_events);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_interval() {
        // Test verifies unparseable numbers are configuration errors
        // Ensures typos are not silently replaced by defaults

        // Arrange
        clear_env();
        std::env::set_var("ERROR_TAXONOMY_HEALTH_CHECK_INTERVAL_SECS", "soon");

        // Act
        let result = ServiceConfig::from_env();
        clear_env();

        // Assert
        assert!(matches!(result, Err(TaxonomyError::Configuration { .. })));
    }
}

#[cfg(test)]
mod suggester_config_tests {
    use super::*;

    #[test]
    fn test_default_suggester_config() {
        // Test verifies the suggester asks the model by default
        // Ensures a generous but bounded context limit

        // Act
        let config = SuggesterConfig::default();

        // Assert
        assert!(config.use_model);
        assert_eq!(config.max_context_chars, 4_000);
    }

    #[test]
    fn test_zero_context_limit_fails_validation() {
        // Test verifies a zero context limit is rejected
        // Ensures prompts never silently drop all context

        // Arrange
        let config = SuggesterConfig {
            max_context_chars: 0,
            ..SuggesterConfig::default()
        };

        // Act & Assert
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_applies_overrides() {
        // Test verifies suggester variables override the defaults
        // Ensures model use can be disabled per deployment

        // Arrange
        clear_env();
        std::env::set_var("ERROR_TAXONOMY_SUGGESTIONS_USE_MODEL", "false");
        std::env::set_var("ERROR_TAXONOMY_SUGGESTIONS_MAX_CONTEXT_CHARS", "256");

        // Act
        let config = SuggesterConfig::from_env().unwrap();
        clear_env();

        // Assert
        assert!(!config.use_model);
        assert_eq!(config.max_context_chars, 256);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_zero_limit() {
        // Test verifies environment values still go through validation
        // Ensures from_env cannot produce an invalid config

        // Arrange
        clear_env();
        std::env::set_var("ERROR_TAXONOMY_SUGGESTIONS_MAX_CONTEXT_CHARS", "0");

        // Act
        let result = SuggesterConfig::from_env();
        clear_env();

        // Assert
        assert!(matches!(result, Err(TaxonomyError::Configuration { .. })));
    }
}
