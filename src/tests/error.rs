// Unit Tests for Taxonomy Error Handling
//
// UNIT UNDER TEST: TaxonomyError, AgentFailure
//
// BUSINESS RESPONSIBILITY:
//   - Reports crate and collaborator failures with structured context
//   - Separates transient collaborator failures from permanent ones
//   - Lets agent code propagate a taxonomy entry as an ordinary error
//
// TEST COVERAGE:
//   - Retry determination per variant
//   - User messages that hide internal details
//   - AgentFailure display format, accessors and error-trait integration

use crate::core_types::{ErrorCategory, Severity};
use crate::error::{AgentFailure, TaxonomyError};
use crate::registry::lookup_error;

#[cfg(test)]
mod taxonomy_error_tests {
    use super::*;

    #[test]
    fn test_collaborator_errors_are_retryable() {
        // Test verifies storage, delivery and suggestion failures are transient
        // Ensures callers retry collaborator hiccups

        // Act & Assert
        assert!(TaxonomyError::storage("db locked").is_retryable());
        assert!(TaxonomyError::event_delivery("closed").is_retryable());
        assert!(TaxonomyError::suggestion("bad json").is_retryable());
    }

    #[test]
    fn test_taxonomy_errors_are_not_retryable() {
        // Test verifies unknown codes and invalid input are permanent
        // Ensures callers do not loop on programming errors

        // Act & Assert
        assert!(!TaxonomyError::unknown_code(9999).is_retryable());
        assert!(!TaxonomyError::invalid_definition("bad severity").is_retryable());
        assert!(!TaxonomyError::configuration("missing name").is_retryable());
    }

    #[test]
    fn test_unknown_code_display_carries_code() {
        // Test verifies the display form names the missing code
        // Ensures logs identify exactly which lookup failed

        // Act
        let error = TaxonomyError::unknown_code(42);

        // Assert
        assert_eq!(error, TaxonomyError::UnknownCode { code: 42 });
        assert_eq!(error.to_string(), "No error registered for code 42");
    }

    #[test]
    fn test_user_message_hides_internals() {
        // Test verifies user-facing text omits internal messages
        // Ensures storage details do not leak to end users

        // Arrange
        let error = TaxonomyError::storage("connection string postgres://secret");

        // Act
        let message = error.user_message();

        // Assert
        assert!(!message.contains("secret"));
        assert!(message.contains("try again"));
    }
}

#[cfg(test)]
mod agent_failure_tests {
    use super::*;

    #[test]
    fn test_display_without_details() {
        // Test verifies the display form is "[code] name: description"
        // Ensures no separator is appended without details

        // Arrange
        let definition = lookup_error(103).unwrap().clone();
        let expected = format!("[103] model_timeout: {}", definition.description());

        // Act
        let failure = AgentFailure::new(definition);

        // Assert
        assert_eq!(failure.to_string(), expected);
    }

    #[test]
    fn test_display_with_details() {
        // Test verifies details are appended after the description
        // Ensures operators see caller context in log lines

        // Arrange
        let definition = lookup_error(201).unwrap().clone();

        // Act
        let failure = AgentFailure::with_details(definition, "search");

        // Assert
        assert!(failure.to_string().ends_with(" — search"));
        assert_eq!(failure.details(), Some("search"));
    }

    #[test]
    fn test_empty_details_are_not_displayed() {
        // Test verifies empty details behave like absent details in display
        // Ensures no dangling separator appears

        // Arrange
        let definition = lookup_error(201).unwrap().clone();

        // Act
        let failure = AgentFailure::with_details(definition, "");

        // Assert
        assert!(!failure.to_string().contains('—'));
    }

    #[test]
    fn test_accessors_mirror_definition() {
        // Test verifies the wrapper exposes the carried definition's attributes
        // Ensures retry logic can inspect raised failures directly

        // Arrange
        let definition = lookup_error(302).unwrap().clone();

        // Act
        let failure = AgentFailure::from(definition.clone());

        // Assert
        assert_eq!(failure.code(), 302);
        assert_eq!(failure.category(), ErrorCategory::Security);
        assert_eq!(failure.severity(), Severity::Critical);
        assert!(!failure.is_retryable());
        assert_eq!(failure.definition(), &definition);
        assert_eq!(failure.into_parts(), (definition, None));
    }

    #[test]
    fn test_propagates_through_boxed_errors() {
        // Test verifies AgentFailure works with the standard error trait
        // Ensures it can be boxed and downcast by callers

        // Arrange
        fn run() -> Result<(), Box<dyn std::error::Error>> {
            let definition = lookup_error(501).unwrap().clone();
            Err(AgentFailure::with_details(definition, "loop"))?;
            Ok(())
        }

        // Act
        let error = run().unwrap_err();

        // Assert
        let failure = error.downcast_ref::<AgentFailure>().unwrap();
        assert_eq!(failure.code(), 501);
    }
}
