//! # agent-error-taxonomy
//!
//! Standardised error codes for AI agents, and a classifier that maps runtime
//! faults onto them.
//!
//! ## Key Features
//!
//! - **Fixed taxonomy**: numbered codes grouped in six categories (model, tool,
//!   security, resource, orchestration, data), each with severity and
//!   retryability
//! - **Ordered classification**: runtime faults resolve to the first matching
//!   rule, with a fixed fallback so classification never fails
//! - **Uniform responses**: a frozen JSON shape for reporting errors
//! - **Collaborator seams**: occurrence storage, event publishing and recovery
//!   suggestions behind async traits with in-process defaults
//!
//! ## Example
//!
//! ```rust
//! use agent_error_taxonomy::{build_response, classify_error, lookup_error, ErrorCategory};
//!
//! let timeout = std::io::Error::new(std::io::ErrorKind::TimedOut, "model took 30s");
//! let definition = classify_error(&timeout);
//! assert_eq!(definition.code(), 103);
//! assert_eq!(definition.category(), ErrorCategory::Model);
//!
//! let response = build_response(definition, Some("gpt-4 call"));
//! assert_eq!(response.to_json()["error"]["retryable"], true);
//!
//! assert!(lookup_error(9999).is_err());
//! ```
//!
//! ## Feature flags
//!
//! - `events` (default): [`BusinessEvent`] payloads and the
//!   [`integration`] module for publishing them.

#![allow(clippy::missing_errors_doc)]

// Core value types: categories, severities, definitions, faults, events
pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod builtin;
pub mod classifier;
pub mod config;
pub mod error;
#[cfg(feature = "events")]
pub mod integration;
pub(crate) mod internals;
pub mod registry;
pub mod response;
pub mod service;
pub mod store;
pub mod suggestions;

#[cfg(test)]
pub mod tests;

// Re-export the core API
pub use classifier::{classify_error, classify_fault, ExceptionClassifier};
pub use config::{ServiceConfig, SuggesterConfig};
pub use error::{AgentFailure, TaxonomyError, TaxonomyResult};
pub use registry::{errors_by_category, lookup_error, ErrorRegistry};
pub use response::{build_response, ErrorResponse};
pub use service::AsyncErrorRegistry;
pub use store::{ErrorOccurrence, ErrorStore, InMemoryRepository, OccurrenceRepository};
pub use suggestions::{Confidence, RecoverySuggester, RecoverySuggestion, SuggestionModel};

pub use core_types::{ErrorCategory, ErrorDefinition, Fault, FaultKind, RawDefinition, Severity};

// Business events (only with the "events" feature)
#[cfg(feature = "events")]
pub use core_types::{event_types, BusinessEvent};
