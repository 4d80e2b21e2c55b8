//! Internal utilities for agent-error-taxonomy
//!
//! Implementation details that are not part of the public API.

pub(crate) mod response_parser;
