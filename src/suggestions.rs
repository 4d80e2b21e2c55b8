//! Recovery suggestions for classified errors.
//!
//! [`RecoverySuggester`] asks a [`SuggestionModel`] for a structured JSON
//! suggestion and parses the reply. Any failure along the way (model call,
//! unparseable output, missing fields) is logged and replaced by a static
//! suggestion, so `suggest` itself never fails.
//!
//! Static suggestions resolve in three steps:
//!
//! 1. A hand-written entry for the exact code
//! 2. A per-category entry when the code is in the built-in registry
//! 3. A generic entry pointing at the taxonomy documentation
//!
//! # Example
//!
//! ```rust
//! use agent_error_taxonomy::suggestions::{Confidence, RecoverySuggester};
//!
//! # async fn example() {
//! let suggester = RecoverySuggester::default();
//! let suggestion = suggester.suggest(103, "model timed out", "agent-1").await;
//! assert!(!suggestion.steps.is_empty());
//!
//! let fixed = suggester.suggest_static(103);
//! assert_eq!(fixed.confidence, Confidence::High);
//! # }
//! ```

use crate::config::SuggesterConfig;
use crate::core_types::{ErrorCategory, ErrorDefinition};
use crate::error::{TaxonomyError, TaxonomyResult};
use crate::internals::response_parser::ResponseParser;
use crate::logging::{log_debug, log_warn};
use crate::registry::ErrorRegistry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

const DOCS_BASE_URL: &str = "https://docs.aumai.dev/errors";

const SYSTEM_PROMPT: &str = "You are an expert AI agent reliability engineer. \
Given a classified agent error code and optional context, produce a \
structured JSON recovery suggestion with the following fields:\n\
- suggestion: (string) one-sentence remediation summary\n\
- confidence: (string) one of: high, medium, low\n\
- steps: (array of strings) ordered remediation steps\n\
- references: (array of strings) optional reference links\n\
Respond with a valid JSON object only. Do not include markdown fences.";

/// How much the suggestion can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Lenient parse used on model output: case-insensitive, anything
    /// unrecognized is `Low`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured remediation advice for one error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoverySuggestion {
    /// One-sentence summary of the remediation
    pub suggestion: String,
    pub confidence: Confidence,
    /// Ordered remediation steps
    #[serde(default)]
    pub steps: Vec<String>,
    /// Documentation links or knowledge-base references
    #[serde(default)]
    pub references: Vec<String>,
}

impl RecoverySuggestion {
    fn fixed(suggestion: &str, confidence: Confidence, steps: &[&str], references: Vec<String>) -> Self {
        Self {
            suggestion: suggestion.to_string(),
            confidence,
            steps: steps.iter().map(|s| s.to_string()).collect(),
            references,
        }
    }

    /// Build a suggestion from a parsed model reply.
    ///
    /// `suggestion` is required; `confidence` is normalized; `steps` and
    /// `references` default to empty.
    fn from_model_value(value: &Value) -> TaxonomyResult<Self> {
        let suggestion = value
            .get("suggestion")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| TaxonomyError::suggestion("Model reply is missing 'suggestion'"))?;

        let confidence = match value.get("confidence") {
            Some(Value::String(raw)) => Confidence::normalize(raw),
            _ => Confidence::Low,
        };

        Ok(Self {
            suggestion: suggestion.to_string(),
            confidence,
            steps: string_list(value.get("steps"), "steps")?,
            references: string_list(value.get("references"), "references")?,
        })
    }
}

fn string_list(value: Option<&Value>, field: &str) -> TaxonomyResult<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    TaxonomyError::suggestion(format!("'{field}' must contain only strings"))
                })
            })
            .collect(),
        Some(_) => Err(TaxonomyError::suggestion(format!(
            "'{field}' must be an array of strings"
        ))),
    }
}

fn code_reference(code: i64) -> Vec<String> {
    vec![format!("{DOCS_BASE_URL}/{code}")]
}

/// Hand-written suggestion for the codes that have one.
fn code_suggestion(code: i64) -> Option<RecoverySuggestion> {
    use Confidence::{High, Medium};

    let (suggestion, confidence, steps): (&str, Confidence, &[&str]) = match code {
        101 => (
            "Verify the model identifier and ensure the provider has it available.",
            High,
            &[
                "Check that the model_id matches an active model in the provider dashboard.",
                "Update the model configuration to a currently available model.",
                "Confirm the account has access to the requested model tier.",
            ],
        ),
        102 => (
            "Reduce the input size or enable context-window chunking.",
            High,
            &[
                "Measure the token count of the prompt before sending.",
                "Truncate or summarise historical context to fit within the limit.",
                "Consider using a model with a larger context window.",
            ],
        ),
        103 => (
            "Retry the request with an exponential back-off strategy.",
            High,
            &[
                "Wait at least 2 seconds before the first retry.",
                "Use exponential back-off with jitter for subsequent retries.",
                "Set a maximum retry budget (e.g., 3 attempts).",
                "Alert if retries are exhausted without success.",
            ],
        ),
        104 => (
            "Back off and retry after the rate-limit reset window expires.",
            High,
            &[
                "Inspect the Retry-After header in the provider response.",
                "Implement token-bucket or leaky-bucket rate limiting client-side.",
                "Consider distributing load across multiple API keys if permitted.",
            ],
        ),
        105 => (
            "Retry with a clearer prompt that enforces the expected output schema.",
            Medium,
            &[
                "Add a JSON schema or structured-output instruction to the system prompt.",
                "Enable provider-level JSON mode if available.",
                "Validate the output against the schema and retry if parsing fails.",
            ],
        ),
        201 => (
            "Register the missing tool before invoking the agent.",
            High,
            &[
                "Check the tool registry for the expected tool name.",
                "Ensure the tool package is installed and imported.",
                "Restart the agent after registering the missing tool.",
            ],
        ),
        202 => (
            "Wrap the tool in defensive error handling and retry.",
            Medium,
            &[
                "Handle and report errors inside the tool implementation.",
                "Log the full stack trace for post-mortem analysis.",
                "Retry the tool invocation if the error is transient.",
            ],
        ),
        203 => (
            "Fix the input schema and validate arguments before tool invocation.",
            High,
            &[
                "Review the tool's input schema documentation.",
                "Validate arguments against the schema at the call site.",
                "Return a structured error to the agent so it can self-correct.",
            ],
        ),
        301 => (
            "Refresh or reissue credentials and re-authenticate.",
            High,
            &[
                "Check credential expiry timestamps.",
                "Rotate the API key or JWT token.",
                "Verify that environment variables are correctly injected.",
            ],
        ),
        302 => (
            "Grant the required permissions to the agent's identity.",
            High,
            &[
                "Review the IAM or RBAC policy for the agent role.",
                "Add the required permission or scope.",
                "Avoid granting blanket admin permissions; use least-privilege.",
            ],
        ),
        401 => (
            "Reduce memory usage or increase the resource limit.",
            Medium,
            &[
                "Profile memory usage to identify the largest allocations.",
                "Process data in smaller batches.",
                "Increase container/VM memory limits if the workload requires it.",
            ],
        ),
        404 => (
            "Check network connectivity and retry with back-off.",
            High,
            &[
                "Ping the target endpoint to verify reachability.",
                "Review firewall and VPC routing rules.",
                "Implement retry logic with exponential back-off.",
            ],
        ),
        501 => (
            "Increase the iteration budget or redesign the task decomposition.",
            Medium,
            &[
                "Analyse the agent's reasoning trace to find the loop.",
                "Increase max_iterations if the task is legitimately complex.",
                "Add a termination condition to the agent's planning step.",
            ],
        ),
        601 => (
            "Validate the data against the expected schema before processing.",
            High,
            &[
                "Add a validation step at the data ingestion boundary.",
                "Log the invalid payload for debugging.",
                "Return a structured error to the upstream caller.",
            ],
        ),
        604 => (
            "Redact or remove PII before passing data to the agent.",
            High,
            &[
                "Run a PII detection scan on all input data.",
                "Replace detected PII with placeholder tokens.",
                "Review data handling policies and update consent records.",
            ],
        ),
        _ => return None,
    };

    Some(RecoverySuggestion::fixed(
        suggestion,
        confidence,
        steps,
        code_reference(code),
    ))
}

/// Low-confidence suggestion shared by every code in `category`.
fn category_suggestion(category: ErrorCategory) -> RecoverySuggestion {
    let (suggestion, steps): (&str, &[&str]) = match category {
        ErrorCategory::Model => (
            "Investigate the model provider configuration and retry.",
            &[
                "Review the model configuration for the failing agent.",
                "Check the provider status page for outages.",
                "Retry the operation after verifying the configuration.",
            ],
        ),
        ErrorCategory::Tool => (
            "Inspect the tool registry and fix the failing tool.",
            &[
                "List all registered tools and verify the expected tool is present.",
                "Review the tool's error logs for root-cause details.",
                "Fix the tool implementation and redeploy.",
            ],
        ),
        ErrorCategory::Security => (
            "Review the agent's security policy and credentials.",
            &[
                "Audit the agent's permissions and role assignments.",
                "Rotate all credentials involved in the failing operation.",
                "Escalate to the security team if a breach is suspected.",
            ],
        ),
        ErrorCategory::Resource => (
            "Free resources or scale the agent's environment.",
            &[
                "Profile the agent's resource consumption.",
                "Reduce batch sizes to lower peak resource usage.",
                "Scale up the agent's compute allocation.",
            ],
        ),
        ErrorCategory::Orchestration => (
            "Simplify the agent's task graph and add loop guards.",
            &[
                "Visualise the task dependency graph.",
                "Add explicit termination conditions to all loops.",
                "Limit the maximum depth of recursive sub-task calls.",
            ],
        ),
        ErrorCategory::Data => (
            "Validate data at all system boundaries.",
            &[
                "Add schema validation at the data ingestion point.",
                "Log raw payloads for inspection.",
                "Sanitise and normalise inputs before processing.",
            ],
        ),
    };

    RecoverySuggestion::fixed(suggestion, Confidence::Low, steps, Vec::new())
}

fn generic_suggestion() -> RecoverySuggestion {
    RecoverySuggestion::fixed(
        "Review the agent logs and consult the error taxonomy documentation.",
        Confidence::Low,
        &[
            "Inspect the agent's structured error response for details.",
            "Cross-reference the error code with the error taxonomy.",
            "Escalate to the engineering team if the issue persists.",
        ],
        vec![DOCS_BASE_URL.to_string()],
    )
}

/// Static suggestion for `code`, never touching a model.
pub fn static_suggestion(code: i64) -> RecoverySuggestion {
    if let Some(suggestion) = code_suggestion(code) {
        return suggestion;
    }
    match ErrorRegistry::builtin().get(code) {
        Some(definition) => category_suggestion(definition.category()),
        None => generic_suggestion(),
    }
}

/// Text-completion collaborator used to generate suggestions.
///
/// Implementations wrap whatever model client the embedding application
/// uses. The reply should be a JSON object; markdown fences and surrounding
/// prose are tolerated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionModel: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> TaxonomyResult<String>;
}

/// Model stand-in that always answers with the same reply.
#[derive(Debug, Clone)]
pub struct CannedSuggestionModel {
    reply: String,
}

impl CannedSuggestionModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for CannedSuggestionModel {
    fn default() -> Self {
        let reply = serde_json::json!({
            "suggestion": "Retry the operation using exponential back-off.",
            "confidence": "medium",
            "steps": [
                "Wait before retrying.",
                "Implement back-off logic.",
                "Alert if retries are exhausted.",
            ],
            "references": [],
        });
        Self::new(reply.to_string())
    }
}

#[async_trait]
impl SuggestionModel for CannedSuggestionModel {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> TaxonomyResult<String> {
        Ok(self.reply.clone())
    }
}

/// Generates [`RecoverySuggestion`]s, preferring the model and degrading to
/// the static tables.
#[derive(Clone)]
pub struct RecoverySuggester {
    model: Arc<dyn SuggestionModel>,
    config: SuggesterConfig,
}

impl fmt::Debug for RecoverySuggester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoverySuggester")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for RecoverySuggester {
    fn default() -> Self {
        Self::new(Arc::new(CannedSuggestionModel::default()))
    }
}

impl RecoverySuggester {
    pub fn new(model: Arc<dyn SuggestionModel>) -> Self {
        Self::with_config(model, SuggesterConfig::default())
    }

    pub fn with_config(model: Arc<dyn SuggestionModel>, config: SuggesterConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &SuggesterConfig {
        &self.config
    }

    /// Suggest a remediation for `code`.
    ///
    /// Empty `context` and `agent_id` are left out of the prompt. Never fails:
    /// model errors and unusable replies fall back to [`static_suggestion`].
    pub async fn suggest(&self, code: i64, context: &str, agent_id: &str) -> RecoverySuggestion {
        if !self.config.use_model {
            return static_suggestion(code);
        }

        match self.suggest_via_model(code, context, agent_id).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                log_warn!(
                    error_code = code,
                    error = %e,
                    "Model suggestion failed, falling back to static suggestion"
                );
                static_suggestion(code)
            }
        }
    }

    /// [`suggest`](Self::suggest) for an already resolved definition.
    pub async fn suggest_for_error(
        &self,
        definition: &ErrorDefinition,
        context: &str,
        agent_id: &str,
    ) -> RecoverySuggestion {
        self.suggest(definition.code(), context, agent_id).await
    }

    /// The static suggestion for `code`; never calls the model.
    pub fn suggest_static(&self, code: i64) -> RecoverySuggestion {
        static_suggestion(code)
    }

    async fn suggest_via_model(
        &self,
        code: i64,
        context: &str,
        agent_id: &str,
    ) -> TaxonomyResult<RecoverySuggestion> {
        let user_prompt = self.build_user_prompt(code, context, agent_id);
        let reply = self.model.complete(SYSTEM_PROMPT, &user_prompt).await?;
        let value = ResponseParser::parse_model_output(&reply)?;
        let suggestion = RecoverySuggestion::from_model_value(&value)?;

        log_debug!(
            error_code = code,
            confidence = %suggestion.confidence,
            steps = suggestion.steps.len(),
            "Model suggestion parsed"
        );
        Ok(suggestion)
    }

    pub(crate) fn build_user_prompt(&self, code: i64, context: &str, agent_id: &str) -> String {
        let mut lines = vec![format!("Agent error code: {code}")];
        if !agent_id.is_empty() {
            lines.push(format!("Agent ID: {agent_id}"));
        }
        if !context.is_empty() {
            let context: String = context.chars().take(self.config.max_context_chars).collect();
            lines.push(format!("Context: {context}"));
        }
        lines.push("Please provide a structured JSON recovery suggestion for this error.".to_string());
        lines.join("\n")
    }
}
