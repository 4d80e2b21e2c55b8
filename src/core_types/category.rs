//! Category and severity tags for taxonomy entries
//!
//! Both are closed sets modelled as plain enums. They carry no behaviour beyond
//! their lower-case wire form.

use crate::error::{TaxonomyError, TaxonomyResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level error category, aligned to the numeric code bands.
///
/// | Category | Band |
/// |----------|------|
/// | `Model` | 1xx |
/// | `Tool` | 2xx |
/// | `Security` | 3xx |
/// | `Resource` | 4xx |
/// | `Orchestration` | 5xx |
/// | `Data` | 6xx |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Model provider failures (missing models, timeouts, rate limits).
    Model,
    /// Tool lookup, invocation and schema failures.
    Tool,
    /// Authentication, authorization and policy failures.
    Security,
    /// Exhausted or unreachable resources.
    Resource,
    /// Planning and control-loop failures.
    Orchestration,
    /// Malformed, missing or forbidden data.
    Data,
}

impl ErrorCategory {
    /// Every category, in code-band order.
    pub const ALL: [ErrorCategory; 6] = [
        ErrorCategory::Model,
        ErrorCategory::Tool,
        ErrorCategory::Security,
        ErrorCategory::Resource,
        ErrorCategory::Orchestration,
        ErrorCategory::Data,
    ];

    /// Lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Model => "model",
            ErrorCategory::Tool => "tool",
            ErrorCategory::Security => "security",
            ErrorCategory::Resource => "resource",
            ErrorCategory::Orchestration => "orchestration",
            ErrorCategory::Data => "data",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCategory {
    type Err = TaxonomyError;

    fn from_str(value: &str) -> TaxonomyResult<Self> {
        match value {
            "model" => Ok(ErrorCategory::Model),
            "tool" => Ok(ErrorCategory::Tool),
            "security" => Ok(ErrorCategory::Security),
            "resource" => Ok(ErrorCategory::Resource),
            "orchestration" => Ok(ErrorCategory::Orchestration),
            "data" => Ok(ErrorCategory::Data),
            other => Err(TaxonomyError::invalid_definition(format!(
                "category must be one of model, tool, security, resource, orchestration, data, got {other:?}"
            ))),
        }
    }
}

/// Operational severity of a taxonomy entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Page someone.
    Critical,
    /// Action failed; investigate soon.
    High,
    /// Degraded but recoverable.
    Medium,
    /// Informational.
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = TaxonomyError;

    fn from_str(value: &str) -> TaxonomyResult<Self> {
        match value {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => Err(TaxonomyError::invalid_definition(format!(
                "severity must be one of critical, high, medium, low, got {other:?}"
            ))),
        }
    }
}
