//! Business event types for error taxonomy operations
//!
//! These events carry resolved taxonomy entries to notification collaborators.
//! Event delivery is the collaborator's concern; see [`crate::integration`].
//!
//! This module is only available when the `events` feature is enabled
//! (it is on by default).

#[cfg(feature = "events")]
use chrono::{DateTime, Utc};
#[cfg(feature = "events")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "events")]
use uuid::Uuid;

/// Business event for notification and observability
///
/// Only available with the `events` feature enabled.
#[cfg(feature = "events")]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BusinessEvent {
    /// Unique identifier for this event
    pub id: Uuid,
    /// Event type (e.g., "error.classified")
    pub event_type: String,
    /// Name of the service that emitted the event
    pub source: String,
    /// Flexible metadata as JSON
    pub metadata: serde_json::Value,
    /// Timestamp when event was created
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "events")]
impl BusinessEvent {
    /// Create a new business event with the given type and source
    pub fn new(event_type: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            source: source.into(),
            metadata: serde_json::Value::Object(serde_json::Map::new()),
            created_at: Utc::now(),
        }
    }

    /// Add metadata to this event
    ///
    /// # Example
    /// ```
    /// use agent_error_taxonomy::BusinessEvent;
    ///
    /// let event = BusinessEvent::new("error.classified", "agent-error-taxonomy")
    ///     .with_metadata("error_code", 103)
    ///     .with_metadata("retryable", true);
    /// assert_eq!(event.metadata["error_code"], 103);
    /// ```
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            if let Some(obj) = self.metadata.as_object_mut() {
                obj.insert(key.into(), v);
            }
        }
        self
    }

    /// Merge every key of a JSON object into the metadata; non-objects are ignored
    pub fn with_extra(mut self, extra: &serde_json::Map<String, serde_json::Value>) -> Self {
        if let Some(obj) = self.metadata.as_object_mut() {
            for (key, value) in extra {
                obj.insert(key.clone(), value.clone());
            }
        }
        self
    }

    /// Metadata value by key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }
}

/// Pre-defined event types for consistency
///
/// Only available with the `events` feature enabled.
#[cfg(feature = "events")]
pub mod event_types {
    /// A runtime fault was classified
    pub const ERROR_CLASSIFIED: &str = "error.classified";
    /// A code was resolved by lookup
    pub const ERROR_LOOKED_UP: &str = "error.looked_up";
    /// A lookup hit an unknown code
    pub const ERROR_LOOKUP_FAILED: &str = "error.lookup_failed";
    /// An occurrence was persisted
    pub const ERROR_OCCURRENCE_RECORDED: &str = "error.occurrence_recorded";
    /// Prefix shared by every taxonomy event
    pub const ERROR_PREFIX: &str = "error.";
}
