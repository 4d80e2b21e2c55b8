// Test modules for agent-error-taxonomy crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.

// Test helper utilities shared by the unit tests
pub mod helpers;

pub mod config;
pub mod error;

pub mod response_parser_tests;
pub mod suggestions;
