//! The taxonomy entry itself
//!
//! An [`ErrorDefinition`] is immutable once built. Both constructors validate:
//! a non-positive code or an unknown severity/category string is rejected with
//! [`TaxonomyError::InvalidDefinition`].

use crate::core_types::category::{ErrorCategory, Severity};
use crate::error::{TaxonomyError, TaxonomyResult};
use serde::{Deserialize, Serialize};

/// A single standardised agent error definition.
///
/// # Example
///
/// ```rust
/// use agent_error_taxonomy::{ErrorCategory, ErrorDefinition, Severity};
///
/// let definition = ErrorDefinition::new(
///     701,
///     ErrorCategory::Tool,
///     "crm_sync_failed",
///     "The CRM sync tool rejected the batch.",
///     true,
///     Severity::Medium,
/// )
/// .unwrap();
///
/// assert_eq!(definition.code(), 701);
/// assert!(ErrorDefinition::new(0, ErrorCategory::Tool, "x", "y", false, Severity::Low).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DefinitionRecord")]
pub struct ErrorDefinition {
    code: i64,
    category: ErrorCategory,
    name: String,
    description: String,
    retryable: bool,
    severity: Severity,
}

impl ErrorDefinition {
    /// Build a definition from typed parts.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::InvalidDefinition`] when `code <= 0`.
    pub fn new(
        code: i64,
        category: ErrorCategory,
        name: impl Into<String>,
        description: impl Into<String>,
        retryable: bool,
        severity: Severity,
    ) -> TaxonomyResult<Self> {
        if code <= 0 {
            return Err(TaxonomyError::invalid_definition(format!(
                "code must be a positive integer, got {code}"
            )));
        }

        Ok(Self {
            code,
            category,
            name: name.into(),
            description: description.into(),
            retryable,
            severity,
        })
    }

    /// Numeric code, unique within a registry.
    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Short machine-readable identifier (snake_case).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the failing operation can be retried without side effects.
    pub fn retryable(&self) -> bool {
        self.retryable
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

/// Untyped definition as it appears in static tables and external data.
///
/// Category and severity are plain strings here; converting into an
/// [`ErrorDefinition`] validates them together with the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDefinition<'a> {
    pub code: i64,
    pub category: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub retryable: bool,
    pub severity: &'a str,
}

impl TryFrom<RawDefinition<'_>> for ErrorDefinition {
    type Error = TaxonomyError;

    fn try_from(raw: RawDefinition<'_>) -> TaxonomyResult<Self> {
        let severity = raw.severity.parse::<Severity>()?;
        let category = raw.category.parse::<ErrorCategory>()?;
        ErrorDefinition::new(
            raw.code,
            category,
            raw.name,
            raw.description,
            raw.retryable,
            severity,
        )
    }
}

/// Owned wire form used for deserialization, so JSON input goes through the
/// same validation as the static table.
#[derive(Deserialize)]
struct DefinitionRecord {
    code: i64,
    category: String,
    name: String,
    description: String,
    retryable: bool,
    severity: String,
}

impl TryFrom<DefinitionRecord> for ErrorDefinition {
    type Error = TaxonomyError;

    fn try_from(record: DefinitionRecord) -> TaxonomyResult<Self> {
        ErrorDefinition::try_from(RawDefinition {
            code: record.code,
            category: &record.category,
            name: &record.name,
            description: &record.description,
            retryable: record.retryable,
            severity: &record.severity,
        })
    }
}
