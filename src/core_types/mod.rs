//! Core value types for the error taxonomy
//!
//! ## Organization
//! - `category` - Category and severity tags
//! - `definition` - The taxonomy entry (`ErrorDefinition`) and its raw form
//! - `fault` - Runtime faults as seen by the classifier
//! - `events` - Business event payloads (feature `events`)

pub mod category;
pub mod definition;
pub mod events;
pub mod fault;

// Re-export commonly used types
pub use category::{ErrorCategory, Severity};
pub use definition::{ErrorDefinition, RawDefinition};
#[cfg(feature = "events")]
pub use events::{event_types, BusinessEvent};
pub use fault::{Fault, FaultKind};
