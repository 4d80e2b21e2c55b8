//! Event publishing for classified errors.
//!
//! The taxonomy hands fully resolved definitions to an [`EventSink`]; event
//! delivery and fan-out are the sink's business. [`BroadcastEventSink`] is a
//! thin in-process sink over a tokio broadcast channel.
//!
//! This module is only available when the `events` feature is enabled.
//!
//! # Example
//!
//! ```rust
//! use agent_error_taxonomy::integration::{classify_and_publish, BroadcastEventSink};
//! use agent_error_taxonomy::{event_types, Fault, FaultKind};
//!
//! # async fn example() -> agent_error_taxonomy::TaxonomyResult<()> {
//! let sink = BroadcastEventSink::new(16);
//! let mut events = sink.subscribe();
//!
//! let definition =
//!     classify_and_publish(&Fault::of(FaultKind::Timeout), &sink, "agent-1", "slow").await?;
//! assert_eq!(definition.code(), 103);
//!
//! let event = events.recv().await.unwrap();
//! assert_eq!(event.event_type, event_types::ERROR_CLASSIFIED);
//! # Ok(())
//! # }
//! ```

use crate::classifier::classify_fault;
use crate::core_types::{event_types, BusinessEvent, ErrorCategory, ErrorDefinition, Fault};
use crate::error::TaxonomyResult;
use crate::logging::{log_debug, log_info};
use crate::registry::ErrorRegistry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Name under which this crate emits events.
pub const SERVICE_NAME: &str = "agent-error-taxonomy";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
const SERVICE_DESCRIPTION: &str =
    "Standardised agent error codes, classification, and taxonomy for AI agents.";
const SERVICE_CAPABILITIES: [&str; 5] = [
    "error_classification",
    "error_taxonomy",
    "error_lookup",
    "error_persistence",
    "recovery_suggestions",
];

/// Receiver of taxonomy events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver an event, returning how many subscribers received it.
    async fn publish(&self, event: BusinessEvent) -> TaxonomyResult<usize>;
}

/// In-process sink fanning events out over a tokio broadcast channel.
///
/// Publishing with no live subscribers is not an error; it reports zero
/// deliveries.
#[derive(Debug, Clone)]
pub struct BroadcastEventSink {
    sender: broadcast::Sender<BusinessEvent>,
}

impl BroadcastEventSink {
    /// Sink buffering up to `capacity` events per lagging subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BusinessEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Subscribe to every `error.*` event.
    pub fn subscribe_to_error_events(&self) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
            filter: EventFilter::Prefix(event_types::ERROR_PREFIX),
        }
    }

    /// Subscribe to `error.classified` events only.
    pub fn subscribe_to_classified_events(&self) -> EventSubscription {
        EventSubscription {
            receiver: self.sender.subscribe(),
            filter: EventFilter::Exact(event_types::ERROR_CLASSIFIED),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum EventFilter {
    Prefix(&'static str),
    Exact(&'static str),
}

impl EventFilter {
    fn matches(self, event_type: &str) -> bool {
        match self {
            EventFilter::Prefix(prefix) => event_type.starts_with(prefix),
            EventFilter::Exact(expected) => event_type == expected,
        }
    }
}

/// Broadcast receiver that only yields events matching its filter.
#[derive(Debug)]
pub struct EventSubscription {
    receiver: broadcast::Receiver<BusinessEvent>,
    filter: EventFilter,
}

impl EventSubscription {
    /// Next matching event. Non-matching events are skipped; lag and
    /// closure are reported as by [`broadcast::Receiver::recv`].
    pub async fn recv(&mut self) -> Result<BusinessEvent, broadcast::error::RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.filter.matches(&event.event_type) {
                return Ok(event);
            }
        }
    }

    /// Next matching event already buffered, without waiting.
    pub fn try_recv(&mut self) -> Result<BusinessEvent, broadcast::error::TryRecvError> {
        loop {
            let event = self.receiver.try_recv()?;
            if self.filter.matches(&event.event_type) {
                return Ok(event);
            }
        }
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EventSink for BroadcastEventSink {
    async fn publish(&self, event: BusinessEvent) -> TaxonomyResult<usize> {
        match self.sender.send(event) {
            Ok(delivered) => Ok(delivered),
            Err(broadcast::error::SendError(event)) => {
                log_debug!(
                    event_type = %event.event_type,
                    "No subscribers for taxonomy event"
                );
                Ok(0)
            }
        }
    }
}

/// Build an `error.classified` event payload.
pub fn classified_event(definition: &ErrorDefinition, agent_id: &str, context: &str) -> BusinessEvent {
    BusinessEvent::new(event_types::ERROR_CLASSIFIED, SERVICE_NAME)
        .with_metadata("error_code", definition.code())
        .with_metadata("error_name", definition.name())
        .with_metadata("category", definition.category())
        .with_metadata("severity", definition.severity())
        .with_metadata("retryable", definition.retryable())
        .with_metadata("agent_id", agent_id)
        .with_metadata("context", context)
}

/// Build an `error.looked_up` event payload.
pub fn looked_up_event(definition: &ErrorDefinition, agent_id: &str) -> BusinessEvent {
    BusinessEvent::new(event_types::ERROR_LOOKED_UP, SERVICE_NAME)
        .with_metadata("error_code", definition.code())
        .with_metadata("error_name", definition.name())
        .with_metadata("category", definition.category())
        .with_metadata("agent_id", agent_id)
}

/// Build an `error.lookup_failed` event payload.
pub fn lookup_failed_event(code: i64) -> BusinessEvent {
    BusinessEvent::new(event_types::ERROR_LOOKUP_FAILED, SERVICE_NAME)
        .with_metadata("error_code", code)
}

/// Build an `error.occurrence_recorded` event payload.
pub fn occurrence_recorded_event(error_code: i64, occurrence_id: Uuid, agent_id: &str) -> BusinessEvent {
    BusinessEvent::new(event_types::ERROR_OCCURRENCE_RECORDED, SERVICE_NAME)
        .with_metadata("error_code", error_code)
        .with_metadata("occurrence_id", occurrence_id)
        .with_metadata("agent_id", agent_id)
}

/// Publish an `error.classified` event, merging `extra` into its metadata.
pub async fn publish_error_classified(
    sink: &dyn EventSink,
    definition: &ErrorDefinition,
    agent_id: &str,
    context: &str,
    extra: Option<&serde_json::Map<String, serde_json::Value>>,
) -> TaxonomyResult<usize> {
    let mut event = classified_event(definition, agent_id, context);
    if let Some(extra) = extra {
        event = event.with_extra(extra);
    }
    sink.publish(event).await
}

pub async fn publish_error_looked_up(
    sink: &dyn EventSink,
    definition: &ErrorDefinition,
    agent_id: &str,
) -> TaxonomyResult<usize> {
    sink.publish(looked_up_event(definition, agent_id)).await
}

pub async fn publish_error_occurrence_recorded(
    sink: &dyn EventSink,
    error_code: i64,
    occurrence_id: Uuid,
    agent_id: &str,
) -> TaxonomyResult<usize> {
    sink.publish(occurrence_recorded_event(error_code, occurrence_id, agent_id))
        .await
}

/// Classify `fault` against the built-in registry and publish the result.
pub async fn classify_and_publish(
    fault: &Fault,
    sink: &dyn EventSink,
    agent_id: &str,
    context: &str,
) -> TaxonomyResult<&'static ErrorDefinition> {
    let definition = classify_fault(fault);
    let delivered = publish_error_classified(sink, definition, agent_id, context, None).await?;
    log_debug!(
        error_code = definition.code(),
        delivered = delivered,
        "Classified fault published"
    );
    Ok(definition)
}

/// Self-description handed to service registries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub capabilities: Vec<String>,
    pub metadata: serde_json::Value,
}

/// Describe this service, using the built-in registry for its metadata.
pub fn service_info() -> ServiceInfo {
    let registry = ErrorRegistry::builtin();
    let info = ServiceInfo {
        name: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        description: SERVICE_DESCRIPTION.to_string(),
        capabilities: SERVICE_CAPABILITIES.iter().map(|c| c.to_string()).collect(),
        metadata: serde_json::json!({
            "error_count": registry.len(),
            "categories": ErrorCategory::ALL.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
        }),
    };
    log_info!(
        service = SERVICE_NAME,
        version = SERVICE_VERSION,
        "Service description generated"
    );
    info
}
