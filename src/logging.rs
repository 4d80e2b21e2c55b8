//! Logging utilities for agent-error-taxonomy
//!
//! Re-exports tracing macros with log_* naming so every module logs the same way.
//! The library never installs a subscriber; embedders choose their own.

// Re-export tracing macros with log_* naming
#[allow(unused_imports)]
pub(crate) use tracing::{
    debug as log_debug,
    error as log_error,
    info as log_info,
    trace as log_trace,
    warn as log_warn,
};
