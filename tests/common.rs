//! Test helper utilities for agent-error-taxonomy integration tests
//!
//! This module provides reusable fixtures shared across integration test files.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use agent_error_taxonomy::{Fault, FaultKind};
use std::io;

/// A representative fault for every category the classifier can reach,
/// paired with the code it must classify to.
pub fn representative_faults() -> Vec<(Fault, i64)> {
    vec![
        (Fault::of(FaultKind::Timeout), 103),
        (Fault::of(FaultKind::ConnectionReset), 404),
        (Fault::of(FaultKind::PermissionDenied), 302),
        (Fault::of(FaultKind::OutOfMemory), 401),
        (Fault::of(FaultKind::RecursionLimit), 501),
        (Fault::of(FaultKind::MissingKey), 602),
        (Fault::of(FaultKind::Type), 203),
        (Fault::unrecognized(), 601),
    ]
}

/// An I/O error of the given kind with a message that must not influence classification
pub fn io_error(kind: io::ErrorKind) -> io::Error {
    io::Error::new(kind, "timeout connection refused permission denied")
}
