// Unit Tests for Recovery Suggestions
//
// UNIT UNDER TEST: RecoverySuggester, static_suggestion, Confidence
//
// BUSINESS RESPONSIBILITY:
//   - Turns a classified error into actionable remediation steps
//   - Prefers model-generated advice but never fails when the model does
//   - Falls back per code, then per category, then to generic advice
//
// TEST COVERAGE:
//   - Static table resolution order
//   - Model prompt construction and context truncation
//   - Parsing of fenced and chatty model replies
//   - Confidence normalization
//   - Fallback on model errors, unparseable and incomplete replies

use crate::config::SuggesterConfig;
use crate::error::TaxonomyError;
use crate::registry::lookup_error;
use crate::suggestions::{
    static_suggestion, CannedSuggestionModel, Confidence, MockSuggestionModel, RecoverySuggester,
};
use std::sync::Arc;

fn suggester_replying(reply: &'static str) -> RecoverySuggester {
    let mut model = MockSuggestionModel::new();
    model
        .expect_complete()
        .times(1)
        .returning(move |_, _| Ok(reply.to_string()));
    RecoverySuggester::new(Arc::new(model))
}

#[cfg(test)]
mod static_suggestion_tests {
    use super::*;

    #[test]
    fn test_per_code_suggestion() {
        // Test verifies codes with a hand-written entry use it
        // Ensures the documentation link names the code

        // Act
        let suggestion = static_suggestion(103);

        // Assert
        assert_eq!(suggestion.confidence, Confidence::High);
        assert_eq!(suggestion.steps.len(), 4);
        assert_eq!(suggestion.references, vec!["https://docs.aumai.dev/errors/103"]);
    }

    #[test]
    fn test_category_suggestion_for_code_without_entry() {
        // Test verifies registered codes without an entry use their category's advice
        // Ensures category advice is low confidence with no references

        // Arrange
        let code = 303;
        assert!(lookup_error(code).is_ok());

        // Act
        let suggestion = static_suggestion(code);

        // Assert
        assert_eq!(suggestion.confidence, Confidence::Low);
        assert!(suggestion.references.is_empty());
        assert_eq!(suggestion, static_suggestion(305));
        assert_ne!(suggestion, static_suggestion(503));
    }

    #[test]
    fn test_generic_suggestion_for_unknown_code() {
        // Test verifies unknown codes still receive generic advice
        // Ensures the generic entry points at the taxonomy documentation

        // Act
        let suggestion = static_suggestion(9999);

        // Assert
        assert_eq!(suggestion.confidence, Confidence::Low);
        assert_eq!(suggestion.steps.len(), 3);
        assert_eq!(suggestion.references, vec!["https://docs.aumai.dev/errors"]);
    }

    #[test]
    fn test_every_builtin_code_has_steps() {
        // Test verifies every registered code yields actionable steps
        // Ensures no code resolves to an empty suggestion

        for definition in crate::registry::ErrorRegistry::builtin().all() {
            let suggestion = static_suggestion(definition.code());
            assert!(!suggestion.suggestion.is_empty());
            assert!(!suggestion.steps.is_empty(), "{}", definition.code());
        }
    }

    #[test]
    fn test_confidence_normalization() {
        // Test verifies confidence parsing is case-insensitive
        // Ensures unrecognized values degrade to low

        // Act & Assert
        assert_eq!(Confidence::normalize("HIGH"), Confidence::High);
        assert_eq!(Confidence::normalize(" medium "), Confidence::Medium);
        assert_eq!(Confidence::normalize("certain"), Confidence::Low);
        assert_eq!(Confidence::Medium.to_string(), "medium");
    }
}

#[cfg(test)]
mod model_suggestion_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_suggester_uses_canned_reply() {
        // Test verifies the default suggester works without any model client
        // Ensures the canned reply is parsed into a medium-confidence suggestion

        // Arrange
        let suggester = RecoverySuggester::default();

        // Act
        let suggestion = suggester.suggest(103, "timed out", "agent-1").await;

        // Assert
        assert_eq!(suggestion.suggestion, "Retry the operation using exponential back-off.");
        assert_eq!(suggestion.confidence, Confidence::Medium);
        assert_eq!(suggestion.steps.len(), 3);
        assert!(suggestion.references.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_contains_code_agent_and_context() {
        // Test verifies the user prompt lists code, agent and context lines
        // Ensures the system prompt asks for the structured fields

        // Arrange
        let mut model = MockSuggestionModel::new();
        model
            .expect_complete()
            .withf(|system, user| {
                system.contains("confidence")
                    && user.starts_with("Agent error code: 404\n")
                    && user.contains("Agent ID: agent-9")
                    && user.contains("Context: dns failure")
                    && user.ends_with("recovery suggestion for this error.")
            })
            .times(1)
            .returning(|_, _| Ok(r#"{"suggestion": "Check DNS.", "confidence": "high"}"#.to_string()));
        let suggester = RecoverySuggester::new(Arc::new(model));

        // Act
        let suggestion = suggester.suggest(404, "dns failure", "agent-9").await;

        // Assert
        assert_eq!(suggestion.suggestion, "Check DNS.");
        assert_eq!(suggestion.confidence, Confidence::High);
        assert!(suggestion.steps.is_empty());
    }

    #[test]
    fn test_prompt_omits_empty_fields_and_truncates_context() {
        // Test verifies empty agent id and context are left out of the prompt
        // Ensures long context is cut to the configured limit

        // Arrange
        let config = SuggesterConfig {
            max_context_chars: 5,
            ..SuggesterConfig::default()
        };
        let suggester =
            RecoverySuggester::with_config(Arc::new(CannedSuggestionModel::default()), config);

        // Act
        let bare = suggester.build_user_prompt(103, "", "");
        let truncated = suggester.build_user_prompt(103, "abcdefghij", "");

        // Assert
        assert_eq!(bare.lines().count(), 2);
        assert!(!bare.contains("Agent ID"));
        assert!(truncated.contains("Context: abcde\n"));
        assert!(!truncated.contains("abcdef"));
    }

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        // Test verifies replies wrapped in markdown fences are accepted
        // Ensures unrecognized confidence is normalized to low

        // Arrange
        let suggester = suggester_replying(
            "```json\n{\"suggestion\": \"Rotate keys.\", \"confidence\": \"absolute\", \"steps\": [\"Rotate.\"]}\n```",
        );

        // Act
        let suggestion = suggester.suggest(301, "", "").await;

        // Assert
        assert_eq!(suggestion.suggestion, "Rotate keys.");
        assert_eq!(suggestion.confidence, Confidence::Low);
        assert_eq!(suggestion.steps, vec!["Rotate."]);
    }

    #[tokio::test]
    async fn test_model_error_falls_back_to_static() {
        // Test verifies a failing model call degrades to the static suggestion
        // Ensures suggest never surfaces collaborator errors

        // Arrange
        let mut model = MockSuggestionModel::new();
        model
            .expect_complete()
            .times(1)
            .returning(|_, _| Err(TaxonomyError::suggestion("upstream 503")));
        let suggester = RecoverySuggester::new(Arc::new(model));

        // Act
        let suggestion = suggester.suggest(104, "", "").await;

        // Assert
        assert_eq!(suggestion, static_suggestion(104));
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back_to_static() {
        // Test verifies prose-only replies degrade to the static suggestion
        // Ensures partial model output never reaches callers

        // Arrange
        let suggester = suggester_replying("Have you tried turning it off and on again?");

        // Act
        let suggestion = suggester.suggest(201, "", "").await;

        // Assert
        assert_eq!(suggestion, static_suggestion(201));
    }

    #[tokio::test]
    async fn test_reply_without_suggestion_falls_back() {
        // Test verifies replies missing the summary field are rejected
        // Ensures the static suggestion is used instead

        // Arrange
        let suggester = suggester_replying(r#"{"confidence": "high", "steps": ["x"]}"#);

        // Act
        let suggestion = suggester.suggest(9999, "", "").await;

        // Assert
        assert_eq!(suggestion, static_suggestion(9999));
    }

    #[tokio::test]
    async fn test_reply_with_non_string_steps_falls_back() {
        // Test verifies malformed step lists are rejected
        // Ensures suggestions only ever carry string steps

        // Arrange
        let suggester = suggester_replying(r#"{"suggestion": "x", "steps": [1, 2]}"#);

        // Act
        let suggestion = suggester.suggest(105, "", "").await;

        // Assert
        assert_eq!(suggestion, static_suggestion(105));
    }

    #[tokio::test]
    async fn test_model_disabled_skips_model() {
        // Test verifies use_model=false never calls the model
        // Ensures static-only deployments make no model requests

        // Arrange
        let mut model = MockSuggestionModel::new();
        model.expect_complete().times(0);
        let config = SuggesterConfig {
            use_model: false,
            ..SuggesterConfig::default()
        };
        let suggester = RecoverySuggester::with_config(Arc::new(model), config);

        // Act
        let suggestion = suggester.suggest(102, "ctx", "agent").await;

        // Assert
        assert_eq!(suggestion, suggester.suggest_static(102));
    }

    #[tokio::test]
    async fn test_suggest_for_error_uses_definition_code() {
        // Test verifies suggest_for_error prompts with the definition's code
        // Ensures callers holding a definition need not unwrap its code

        // Arrange
        let mut model = MockSuggestionModel::new();
        model
            .expect_complete()
            .withf(|_, user| user.starts_with("Agent error code: 501"))
            .times(1)
            .returning(|_, _| Ok(r#"{"suggestion": "Add a loop guard."}"#.to_string()));
        let suggester = RecoverySuggester::new(Arc::new(model));

        // Act
        let suggestion = suggester
            .suggest_for_error(lookup_error(501).unwrap(), "", "")
            .await;

        // Assert
        assert_eq!(suggestion.suggestion, "Add a loop guard.");
        assert_eq!(suggestion.confidence, Confidence::Low);
    }
}
