//! Ordered-rule fault classifier.
//!
//! The classifier walks [`CLASSIFICATION_RULES`] front to back and returns the
//! definition of the first rule whose kind the fault is an instance of. Table
//! order is the priority: a fault that is both a connection fault and a timeout
//! resolves to the timeout rule because it comes first, regardless of which
//! kind is more specific.
//!
//! When nothing matches, the fallback definition ([`FALLBACK_CODE`], the
//! generic data-schema violation) is returned. Classification never fails.
//!
//! # Example
//!
//! ```rust
//! use agent_error_taxonomy::{classify_error, classify_fault, Fault, FaultKind};
//!
//! assert_eq!(classify_fault(&Fault::of(FaultKind::PermissionDenied)).code(), 302);
//! assert_eq!(classify_fault(&Fault::unrecognized()).code(), 601);
//!
//! let io_error = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow model");
//! assert_eq!(classify_error(&io_error).code(), 103);
//! ```

use crate::builtin::FALLBACK_CODE;
use crate::core_types::{ErrorDefinition, Fault, FaultKind};
use crate::error::TaxonomyResult;
use crate::logging::{log_debug, log_trace};
use crate::registry::ErrorRegistry;
use once_cell::sync::Lazy;

static BUILTIN_CLASSIFIER: Lazy<ExceptionClassifier<'static>> =
    Lazy::new(|| match ExceptionClassifier::new(ErrorRegistry::builtin()) {
        Ok(classifier) => classifier,
        Err(err) => panic!("classification rules reference a missing built-in code: {err}"),
    });

/// One `(kind, code)` pair of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub kind: FaultKind,
    pub code: i64,
}

impl ClassificationRule {
    pub const fn new(kind: FaultKind, code: i64) -> Self {
        Self { kind, code }
    }

    /// Instance test against this rule's kind, including ancestry.
    pub fn matches(&self, fault: &Fault) -> bool {
        fault.is_instance_of(self.kind)
    }
}

/// Canonical rule table. First match wins.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule::new(FaultKind::Timeout, 103),
    ClassificationRule::new(FaultKind::Connection, 404),
    ClassificationRule::new(FaultKind::ConnectionRefused, 404),
    ClassificationRule::new(FaultKind::ConnectionReset, 404),
    ClassificationRule::new(FaultKind::SocketTimeout, 103),
    ClassificationRule::new(FaultKind::Network, 404),
    ClassificationRule::new(FaultKind::PermissionDenied, 302),
    ClassificationRule::new(FaultKind::FileNotFound, 602),
    ClassificationRule::new(FaultKind::OutOfMemory, 401),
    ClassificationRule::new(FaultKind::RecursionLimit, 501),
    ClassificationRule::new(FaultKind::UnicodeDecode, 605),
    ClassificationRule::new(FaultKind::UnicodeEncode, 605),
    ClassificationRule::new(FaultKind::Value, 601),
    ClassificationRule::new(FaultKind::MissingKey, 602),
    ClassificationRule::new(FaultKind::Type, 203),
    ClassificationRule::new(FaultKind::Os, 405),
];

/// Classifier bound to a registry.
///
/// Construction checks that every rule code and the fallback code resolve, so
/// [`classify`](Self::classify) can never fail afterwards.
#[derive(Debug, Clone)]
pub struct ExceptionClassifier<'r> {
    registry: &'r ErrorRegistry,
    rules: Vec<ClassificationRule>,
    fallback: &'r ErrorDefinition,
}

impl<'r> ExceptionClassifier<'r> {
    /// Classifier using the canonical rule table.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyError::UnknownCode`](crate::TaxonomyError::UnknownCode)
    /// if the registry lacks a rule code or the fallback code.
    pub fn new(registry: &'r ErrorRegistry) -> TaxonomyResult<Self> {
        Self::with_rules(registry, CLASSIFICATION_RULES.to_vec(), FALLBACK_CODE)
    }

    /// Classifier with a custom rule table and fallback code.
    pub fn with_rules(
        registry: &'r ErrorRegistry,
        rules: Vec<ClassificationRule>,
        fallback_code: i64,
    ) -> TaxonomyResult<Self> {
        for rule in &rules {
            registry.lookup(rule.code)?;
        }
        let fallback = registry.lookup(fallback_code)?;

        log_debug!(
            rule_count = rules.len(),
            fallback_code = fallback_code,
            "Exception classifier ready"
        );

        Ok(Self {
            registry,
            rules,
            fallback,
        })
    }

    /// The classifier over the built-in registry.
    ///
    /// # Panics
    ///
    /// On first access, if a canonical rule references a code missing from the
    /// built-in registry.
    pub fn builtin() -> &'static ExceptionClassifier<'static> {
        &BUILTIN_CLASSIFIER
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &'r ErrorDefinition {
        self.fallback
    }

    /// The first rule matching `fault`, if any.
    pub fn matching_rule(&self, fault: &Fault) -> Option<&ClassificationRule> {
        self.rules.iter().find(|rule| rule.matches(fault))
    }

    /// Map a fault to its definition, or to the fallback when no rule matches.
    pub fn classify(&self, fault: &Fault) -> &'r ErrorDefinition {
        match self.matching_rule(fault) {
            Some(rule) => {
                log_trace!(
                    fault_kind = %rule.kind,
                    code = rule.code,
                    "Fault matched classification rule"
                );
                self.registry.get(rule.code).unwrap_or(self.fallback)
            }
            None => {
                log_trace!(
                    kinds = ?fault.kinds(),
                    fallback_code = self.fallback.code(),
                    "No classification rule matched; using fallback"
                );
                self.fallback
            }
        }
    }

    /// Classify an arbitrary error value by its concrete type.
    pub fn classify_error(&self, error: &(dyn std::error::Error + 'static)) -> &'r ErrorDefinition {
        self.classify(&Fault::from_error(error))
    }
}

/// Classify a fault against the built-in registry.
pub fn classify_fault(fault: &Fault) -> &'static ErrorDefinition {
    ExceptionClassifier::builtin().classify(fault)
}

/// Classify an error value against the built-in registry.
pub fn classify_error(error: &(dyn std::error::Error + 'static)) -> &'static ErrorDefinition {
    ExceptionClassifier::builtin().classify_error(error)
}
