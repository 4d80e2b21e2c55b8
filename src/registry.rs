//! Code → definition registry.
//!
//! Two flavours share one type:
//!
//! - The process-wide built-in registry ([`ErrorRegistry::builtin`]), built once
//!   from [`BUILTIN_DEFINITIONS`] and read-only afterwards.
//! - Independent registries created with [`ErrorRegistry::new`] for
//!   application-specific codes. These are ordinary owned values; if several
//!   tasks mutate the same instance, the owner serializes writers.
//!
//! Registration is insert-or-replace: registering an existing code silently
//! replaces the earlier definition.
//!
//! # Example
//!
//! ```rust
//! use agent_error_taxonomy::{ErrorCategory, ErrorDefinition, ErrorRegistry, Severity};
//!
//! let mut registry = ErrorRegistry::new();
//! registry.register(
//!     ErrorDefinition::new(701, ErrorCategory::Tool, "crm_down", "CRM is down.", true, Severity::High)
//!         .unwrap(),
//! );
//!
//! assert_eq!(registry.lookup(701).unwrap().name(), "crm_down");
//! assert!(registry.get(702).is_none());
//! assert!(ErrorRegistry::builtin().lookup(701).is_err());
//! ```

use crate::builtin::BUILTIN_DEFINITIONS;
use crate::core_types::{ErrorCategory, ErrorDefinition, RawDefinition};
use crate::error::{TaxonomyError, TaxonomyResult};
use crate::logging::log_debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static BUILTIN_REGISTRY: Lazy<ErrorRegistry> = Lazy::new(|| match build_builtin_registry() {
    Ok(registry) => registry,
    Err(err) => panic!("built-in error table failed validation: {err}"),
});

/// Build a fresh registry from the built-in table.
///
/// Pure: every call validates the table again and returns a new instance.
///
/// # Errors
///
/// Returns [`TaxonomyError::InvalidDefinition`] if any built-in entry is
/// malformed.
pub fn build_builtin_registry() -> TaxonomyResult<ErrorRegistry> {
    let registry = ErrorRegistry::from_raw(BUILTIN_DEFINITIONS)?;
    log_debug!(
        raw_entries = BUILTIN_DEFINITIONS.len(),
        unique_codes = registry.len(),
        "Built-in error registry built"
    );
    Ok(registry)
}

/// Mapping of numeric code to [`ErrorDefinition`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorRegistry {
    errors: HashMap<i64, ErrorDefinition>,
}

impl ErrorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide built-in registry.
    ///
    /// # Panics
    ///
    /// On first access, if the built-in table fails validation.
    pub fn builtin() -> &'static ErrorRegistry {
        &BUILTIN_REGISTRY
    }

    /// Validate raw entries and insert them in order.
    ///
    /// Later entries replace earlier ones with the same code. Validation stops
    /// at the first malformed entry; nothing is returned in that case.
    pub fn from_raw(raw: &[RawDefinition<'_>]) -> TaxonomyResult<Self> {
        let mut registry = Self::new();
        for entry in raw {
            registry.register(ErrorDefinition::try_from(*entry)?);
        }
        Ok(registry)
    }

    /// Insert already-validated definitions in order (last write wins).
    pub fn from_definitions(definitions: impl IntoIterator<Item = ErrorDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Parse a JSON array of definitions into a registry.
    ///
    /// Every element is validated like a raw table entry.
    pub fn from_json(json: &str) -> TaxonomyResult<Self> {
        let definitions: Vec<ErrorDefinition> = serde_json::from_str(json)
            .map_err(|e| TaxonomyError::invalid_definition(e.to_string()))?;
        Ok(Self::from_definitions(definitions))
    }

    /// Add or replace a definition.
    pub fn register(&mut self, definition: ErrorDefinition) {
        if let Some(previous) = self.errors.insert(definition.code(), definition) {
            log_debug!(
                code = previous.code(),
                replaced_name = previous.name(),
                "Replaced existing error definition"
            );
        }
    }

    /// Resolve a code.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::UnknownCode`] when the code is absent.
    pub fn lookup(&self, code: i64) -> TaxonomyResult<&ErrorDefinition> {
        self.errors
            .get(&code)
            .ok_or_else(|| TaxonomyError::unknown_code(code))
    }

    /// Resolve a code, returning `None` when absent.
    pub fn get(&self, code: i64) -> Option<&ErrorDefinition> {
        self.errors.get(&code)
    }

    pub fn contains(&self, code: i64) -> bool {
        self.errors.contains_key(&code)
    }

    /// Definitions in `category`, sorted ascending by code.
    pub fn by_category(&self, category: ErrorCategory) -> Vec<&ErrorDefinition> {
        let mut matching: Vec<&ErrorDefinition> = self
            .errors
            .values()
            .filter(|definition| definition.category() == category)
            .collect();
        matching.sort_by_key(|definition| definition.code());
        matching
    }

    /// Every definition, sorted ascending by code.
    pub fn all(&self) -> Vec<&ErrorDefinition> {
        let mut definitions: Vec<&ErrorDefinition> = self.errors.values().collect();
        definitions.sort_by_key(|definition| definition.code());
        definitions
    }

    /// Registered codes, ascending.
    pub fn codes(&self) -> Vec<i64> {
        let mut codes: Vec<i64> = self.errors.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Look up a code in the built-in registry.
pub fn lookup_error(code: i64) -> TaxonomyResult<&'static ErrorDefinition> {
    ErrorRegistry::builtin().lookup(code)
}

/// Built-in definitions in `category`, sorted ascending by code.
pub fn errors_by_category(category: ErrorCategory) -> Vec<&'static ErrorDefinition> {
    ErrorRegistry::builtin().by_category(category)
}
