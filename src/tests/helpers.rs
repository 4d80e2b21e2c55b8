// Test helper utilities for unit tests
//
// IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::core_types::{ErrorCategory, ErrorDefinition, RawDefinition, Severity};
use crate::registry::ErrorRegistry;

/// Custom definition in the application range (700+)
pub fn custom_definition(code: i64, name: &str) -> ErrorDefinition {
    ErrorDefinition::new(
        code,
        ErrorCategory::Tool,
        name,
        "Custom test failure.",
        true,
        Severity::High,
    )
    .unwrap()
}

/// Raw entry with the given severity string, for validation tests
pub fn raw_with_severity(severity: &str) -> RawDefinition<'_> {
    RawDefinition {
        code: 901,
        category: "data",
        name: "test_entry",
        description: "Test entry.",
        retryable: false,
        severity,
    }
}

/// Small registry used to exercise classifiers built on custom rules
pub fn minimal_registry() -> ErrorRegistry {
    ErrorRegistry::from_definitions([
        ErrorDefinition::new(
            10,
            ErrorCategory::Model,
            "slow",
            "Too slow.",
            true,
            Severity::Low,
        )
        .unwrap(),
        ErrorDefinition::new(
            20,
            ErrorCategory::Data,
            "bad_data",
            "Bad data.",
            false,
            Severity::Medium,
        )
        .unwrap(),
    ])
}
