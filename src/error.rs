//! Error types for taxonomy operations.
//!
//! This module holds the two error shapes of the crate:
//!
//! - [`TaxonomyError`]: failures of the crate itself (unknown codes, malformed
//!   definitions) and of the collaborator adapters around it (storage, event
//!   delivery, suggestions, configuration).
//! - [`AgentFailure`]: a raise-able error that carries a resolved
//!   [`ErrorDefinition`] so agent code can propagate a taxonomy entry with `?`
//!   and callers can inspect its code, severity and retryability.
//!
//! # Lookup vs classification
//!
//! Looking up a code can fail with [`TaxonomyError::UnknownCode`]; classifying
//! a runtime fault never fails (it degrades to the fallback definition). Keep
//! that asymmetry in mind when wiring the two into retry or alerting paths.
//!
//! # Example
//!
//! ```rust
//! use agent_error_taxonomy::{lookup_error, AgentFailure, TaxonomyError};
//!
//! fn call_tool() -> Result<(), AgentFailure> {
//!     let definition = lookup_error(201).expect("201 is a built-in code");
//!     Err(AgentFailure::with_details(definition.clone(), "search tool missing"))
//! }
//!
//! let failure = call_tool().unwrap_err();
//! assert_eq!(failure.code(), 201);
//! assert!(failure.to_string().starts_with("[201] tool_not_found"));
//!
//! assert!(matches!(lookup_error(9999), Err(TaxonomyError::UnknownCode { code: 9999 })));
//! ```

use crate::core_types::{ErrorCategory, ErrorDefinition, Severity};
use crate::logging::{log_debug, log_error, log_warn};
use thiserror::Error;

/// Convenient result type for taxonomy operations.
///
/// Alias for `Result<T, TaxonomyError>`.
pub type TaxonomyResult<T> = std::result::Result<T, TaxonomyError>;

/// Errors raised by the registry, the definition validators and the
/// collaborator adapters.
///
/// | Variant | Raised by | Retryable |
/// |---------|-----------|-----------|
/// | `UnknownCode` | registry lookup | No |
/// | `InvalidDefinition` | definition construction | No |
/// | `Storage` | occurrence repository | Yes |
/// | `EventDelivery` | event sinks | Yes |
/// | `Suggestion` | suggestion model / parsing | Yes |
/// | `Configuration` | config validation | No |
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// No definition is registered under the requested code.
    ///
    /// The only failure mode of a registry lookup.
    #[error("No error registered for code {code}")]
    UnknownCode {
        /// The code that was looked up.
        code: i64,
    },

    /// A definition failed validation at construction time.
    ///
    /// Malformed taxonomy entries are rejected outright; there is no
    /// "fix up and continue" path.
    #[error("Invalid error definition: {message}")]
    InvalidDefinition {
        /// What was wrong with the definition.
        message: String,
    },

    /// The occurrence repository could not complete an operation.
    #[error("Occurrence storage failed: {message}")]
    Storage {
        /// Details about the storage failure.
        message: String,
    },

    /// An event could not be handed to the event sink.
    #[error("Event delivery failed: {message}")]
    EventDelivery {
        /// Details about the delivery failure.
        message: String,
    },

    /// The suggestion model failed or returned unusable output.
    #[error("Recovery suggestion failed: {message}")]
    Suggestion {
        /// Details about the failure.
        message: String,
    },

    /// Configuration values are missing or out of range.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl TaxonomyError {
    /// Whether retrying the failed operation can succeed without changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. } | Self::EventDelivery { .. } | Self::Suggestion { .. }
        )
    }

    /// Convert to a message safe to show to end users.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnknownCode { code } => format!("Error code {code} is not recognised"),
            Self::InvalidDefinition { .. } => "The error definition is malformed".to_string(),
            Self::Storage { .. } => {
                "Unable to record the error right now. Please try again".to_string()
            }
            Self::EventDelivery { .. } => "Unable to publish the error event".to_string(),
            Self::Suggestion { .. } => "No recovery suggestion is available".to_string(),
            Self::Configuration { .. } => {
                "Error taxonomy configuration issue. Please check your settings".to_string()
            }
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================
    //
    // Unknown codes are an expected outcome for optional probes, so they log at
    // DEBUG; everything else logs at WARN or ERROR.

    /// Create an unknown-code error (logs at DEBUG level).
    pub fn unknown_code(code: i64) -> Self {
        log_debug!(
            error_type = "unknown_code",
            code = code,
            "Error code not present in registry"
        );
        Self::UnknownCode { code }
    }

    pub fn invalid_definition(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "invalid_definition",
            message = %message,
            "Error definition failed validation"
        );
        Self::InvalidDefinition { message }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "storage",
            message = %message,
            "Occurrence repository operation failed"
        );
        Self::Storage { message }
    }

    pub fn event_delivery(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "event_delivery",
            message = %message,
            "Error event could not be delivered"
        );
        Self::EventDelivery { message }
    }

    pub fn suggestion(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "suggestion",
            message = %message,
            "Recovery suggestion generation failed"
        );
        Self::Suggestion { message }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration",
            message = %message,
            "Error taxonomy configuration validation failed"
        );
        Self::Configuration { message }
    }
}

/// A raise-able error wrapping a taxonomy [`ErrorDefinition`].
///
/// Displays as `[<code>] <name>: <description>`, suffixed with
/// ` — <details>` when details are present.
///
/// # Example
///
/// ```rust
/// use agent_error_taxonomy::{lookup_error, AgentFailure};
///
/// let failure = AgentFailure::new(lookup_error(301).unwrap().clone());
/// assert_eq!(
///     failure.to_string(),
///     "[301] auth_failed: Authentication credentials are missing, invalid, or expired."
/// );
/// assert!(failure.details().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentFailure {
    definition: ErrorDefinition,
    details: Option<String>,
}

impl AgentFailure {
    /// Wrap a definition without extra details.
    pub fn new(definition: ErrorDefinition) -> Self {
        Self {
            definition,
            details: None,
        }
    }

    /// Wrap a definition with caller-supplied details.
    pub fn with_details(definition: ErrorDefinition, details: impl Into<String>) -> Self {
        Self {
            definition,
            details: Some(details.into()),
        }
    }

    /// The carried taxonomy entry.
    pub fn definition(&self) -> &ErrorDefinition {
        &self.definition
    }

    /// Caller-supplied details, if any.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    pub fn code(&self) -> i64 {
        self.definition.code()
    }

    pub fn category(&self) -> ErrorCategory {
        self.definition.category()
    }

    pub fn severity(&self) -> Severity {
        self.definition.severity()
    }

    pub fn is_retryable(&self) -> bool {
        self.definition.retryable()
    }

    /// Consume the failure and return its definition and details.
    pub fn into_parts(self) -> (ErrorDefinition, Option<String>) {
        (self.definition, self.details)
    }
}

impl std::fmt::Display for AgentFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.definition.code(),
            self.definition.name(),
            self.definition.description()
        )?;
        match self.details.as_deref() {
            Some(details) if !details.is_empty() => write!(f, " — {details}"),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for AgentFailure {}

impl From<ErrorDefinition> for AgentFailure {
    fn from(definition: ErrorDefinition) -> Self {
        Self::new(definition)
    }
}
