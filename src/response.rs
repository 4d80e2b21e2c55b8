//! Standard error response shape.
//!
//! [`build_response`] produces the record every presentation layer emits:
//!
//! ```json
//! {
//!   "error": {
//!     "code": 103,
//!     "name": "model_timeout",
//!     "category": "model",
//!     "description": "...",
//!     "severity": "high",
//!     "retryable": true,
//!     "details": null,
//!     "timestamp": "2026-01-01T12:00:00.000000Z"
//!   }
//! }
//! ```
//!
//! Field names are a frozen contract.

use crate::core_types::{ErrorCategory, ErrorDefinition, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseBody,
}

/// The `error` object of an [`ErrorResponse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    pub code: i64,
    pub name: String,
    pub category: ErrorCategory,
    pub description: String,
    pub severity: Severity,
    pub retryable: bool,
    /// Caller-supplied details; serialized as `null` when absent.
    pub details: Option<String>,
    /// Construction time, RFC 3339 UTC.
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// JSON value form of this response.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error.code,
                "name": self.error.name,
                "category": self.error.category.as_str(),
                "description": self.error.description,
                "severity": self.error.severity.as_str(),
                "retryable": self.error.retryable,
                "details": self.error.details,
                "timestamp": self.error.timestamp.to_rfc3339(),
            }
        })
    }
}

/// Build the standard response for `definition`, stamped with the current time.
///
/// # Example
///
/// ```rust
/// use agent_error_taxonomy::{build_response, lookup_error};
///
/// let response = build_response(lookup_error(201).unwrap(), Some("search tool missing"));
/// let json = response.to_json();
/// assert_eq!(json["error"]["details"], "search tool missing");
/// assert_eq!(json["error"]["category"], "tool");
/// ```
pub fn build_response(definition: &ErrorDefinition, details: Option<&str>) -> ErrorResponse {
    ErrorResponse {
        error: ErrorResponseBody {
            code: definition.code(),
            name: definition.name().to_string(),
            category: definition.category(),
            description: definition.description().to_string(),
            severity: definition.severity(),
            retryable: definition.retryable(),
            details: details.map(str::to_string),
            timestamp: Utc::now(),
        },
    }
}
