//! The built-in error table
//!
//! Declaration order matters: entries are registered front to back and a
//! repeated code replaces the earlier entry. Code 105 appears twice with
//! identical content; the effective table has one entry per code.
//!
//! | Band | Category |
//! |------|----------|
//! | 1xx | model |
//! | 2xx | tool |
//! | 3xx | security |
//! | 4xx | resource |
//! | 5xx | orchestration |
//! | 6xx | data |
//!
//! Application-specific codes should live at 700 and above.

use crate::core_types::RawDefinition;

/// Code returned by the classifier when no rule matches.
pub const FALLBACK_CODE: i64 = 601;

/// Raw built-in definitions in declaration order.
pub const BUILTIN_DEFINITIONS: &[RawDefinition<'static>] = &[
    // 1xx: Model errors
    RawDefinition {
        code: 101,
        category: "model",
        name: "model_not_found",
        description: "The requested model identifier does not exist or is unavailable.",
        retryable: false,
        severity: "high",
    },
    RawDefinition {
        code: 102,
        category: "model",
        name: "model_context_overflow",
        description: "The input exceeds the model's maximum context window.",
        retryable: false,
        severity: "medium",
    },
    RawDefinition {
        code: 103,
        category: "model",
        name: "model_timeout",
        description: "The model did not respond within the allowed time limit.",
        retryable: true,
        severity: "high",
    },
    RawDefinition {
        code: 104,
        category: "model",
        name: "model_rate_limit",
        description: "The model provider has rate-limited the current API key or account.",
        retryable: true,
        severity: "medium",
    },
    RawDefinition {
        code: 105,
        category: "model",
        name: "model_output_parse_error",
        description: "The model response could not be parsed into the expected structured format.",
        retryable: true,
        severity: "medium",
    },
    // 2xx: Tool errors
    RawDefinition {
        code: 201,
        category: "tool",
        name: "tool_not_found",
        description: "The agent called a tool that is not registered or available.",
        retryable: false,
        severity: "high",
    },
    RawDefinition {
        code: 202,
        category: "tool",
        name: "tool_invocation_error",
        description: "The tool raised an unhandled exception during execution.",
        retryable: true,
        severity: "high",
    },
    RawDefinition {
        code: 203,
        category: "tool",
        name: "tool_input_validation_error",
        description: "The arguments supplied to the tool failed schema validation.",
        retryable: false,
        severity: "medium",
    },
    RawDefinition {
        code: 204,
        category: "tool",
        name: "tool_timeout",
        description: "The tool did not complete within the configured deadline.",
        retryable: true,
        severity: "high",
    },
    RawDefinition {
        code: 205,
        category: "tool",
        name: "tool_output_schema_mismatch",
        description: "The tool returned output that does not match its declared schema.",
        retryable: false,
        severity: "medium",
    },
    // 3xx: Security errors
    RawDefinition {
        code: 301,
        category: "security",
        name: "auth_failed",
        description: "Authentication credentials are missing, invalid, or expired.",
        retryable: false,
        severity: "critical",
    },
    RawDefinition {
        code: 302,
        category: "security",
        name: "permission_denied",
        description: "The agent lacks the required permissions to perform the action.",
        retryable: false,
        severity: "critical",
    },
    RawDefinition {
        code: 303,
        category: "security",
        name: "policy_violation",
        description: "The requested action violates a configured security policy.",
        retryable: false,
        severity: "critical",
    },
    RawDefinition {
        code: 304,
        category: "security",
        name: "injection_detected",
        description: "A prompt or command injection attempt was detected and blocked.",
        retryable: false,
        severity: "critical",
    },
    RawDefinition {
        code: 305,
        category: "security",
        name: "sandbox_escape_attempt",
        description: "The agent attempted an action outside its permitted sandbox boundary.",
        retryable: false,
        severity: "critical",
    },
    // 4xx: Resource errors
    RawDefinition {
        code: 401,
        category: "resource",
        name: "resource_exhausted",
        description: "A system resource (memory, CPU, file descriptors) has been exhausted.",
        retryable: true,
        severity: "high",
    },
    RawDefinition {
        code: 402,
        category: "resource",
        name: "budget_exceeded",
        description: "The operation exceeded the allocated cost or token budget.",
        retryable: false,
        severity: "high",
    },
    RawDefinition {
        code: 403,
        category: "resource",
        name: "storage_quota_exceeded",
        description: "The agent's persistent storage quota has been exceeded.",
        retryable: false,
        severity: "medium",
    },
    RawDefinition {
        code: 404,
        category: "resource",
        name: "network_unreachable",
        description: "The target network endpoint is not reachable from the agent's environment.",
        retryable: true,
        severity: "high",
    },
    // 5xx: Orchestration errors
    RawDefinition {
        code: 501,
        category: "orchestration",
        name: "max_iterations_exceeded",
        description: "The agent exceeded the maximum allowed reasoning or action loop iterations.",
        retryable: false,
        severity: "high",
    },
    RawDefinition {
        code: 502,
        category: "orchestration",
        name: "plan_parse_error",
        description: "The agent's plan or task decomposition could not be parsed.",
        retryable: true,
        severity: "medium",
    },
    RawDefinition {
        code: 503,
        category: "orchestration",
        name: "dependency_cycle_detected",
        description: "A circular dependency was found in the agent's task graph.",
        retryable: false,
        severity: "high",
    },
    RawDefinition {
        code: 504,
        category: "orchestration",
        name: "handoff_failed",
        description: "An attempt to hand off control to another agent or process failed.",
        retryable: true,
        severity: "high",
    },
    // 6xx: Data errors
    RawDefinition {
        code: 601,
        category: "data",
        name: "data_schema_violation",
        description: "Input or output data does not conform to the expected schema.",
        retryable: false,
        severity: "medium",
    },
    RawDefinition {
        code: 602,
        category: "data",
        name: "data_not_found",
        description: "A required data record or artifact could not be located.",
        retryable: false,
        severity: "medium",
    },
    RawDefinition {
        code: 603,
        category: "data",
        name: "data_corruption",
        description: "A data artifact is present but its contents are malformed or corrupted.",
        retryable: false,
        severity: "high",
    },
    RawDefinition {
        code: 604,
        category: "data",
        name: "pii_detected",
        description: "Personally identifiable information was found in a context where it is forbidden.",
        retryable: false,
        severity: "critical",
    },
    // Late additions
    RawDefinition {
        code: 105,
        category: "model",
        name: "model_output_parse_error",
        description: "The model response could not be parsed into the expected structured format.",
        retryable: true,
        severity: "medium",
    },
    RawDefinition {
        code: 405,
        category: "resource",
        name: "disk_write_error",
        description: "A write operation to the filesystem failed due to permission or space issues.",
        retryable: true,
        severity: "high",
    },
    RawDefinition {
        code: 406,
        category: "resource",
        name: "connection_pool_exhausted",
        description: "All connections in the pool are in use; the request cannot be served.",
        retryable: true,
        severity: "high",
    },
    RawDefinition {
        code: 605,
        category: "data",
        name: "encoding_error",
        description: "A data encoding or decoding error occurred (e.g. invalid UTF-8 sequence).",
        retryable: false,
        severity: "medium",
    },
    RawDefinition {
        code: 606,
        category: "data",
        name: "missing_required_field",
        description: "A required field is absent from the supplied data payload.",
        retryable: false,
        severity: "medium",
    },
];
