//! RuleTranslator trait for abstracting collation rule handling.
//!
//! The mapper validates and converts rule text only through this trait, so a
//! host application can substitute a full ICU-backed implementation.

use crate::error::RuleError;
use crate::{icu, simple};
use std::fmt::Debug;

/// Converts and validates collation rule text.
///
/// # Implementations
///
/// - `IcuRuleTranslator`: structural ICU validation and the simple rule grammar
///   (always available)
pub trait RuleTranslator: Send + Sync + Debug {
    /// Check that `rules` is well-formed ICU tailoring text.
    fn validate_icu(&self, rules: &str) -> Result<(), RuleError>;

    /// Check that `rules` is well-formed simple rule text.
    fn validate_simple(&self, rules: &str) -> Result<(), RuleError>;

    /// Translate simple rules into ICU text.
    ///
    /// # Returns
    ///
    /// The ICU rule text, or the first error found in `rules`.
    fn simple_to_icu(&self, rules: &str) -> Result<String, RuleError>;

    /// Recover simple rules from ICU text.
    ///
    /// Returns `None` when the ICU text uses constructs the simple grammar
    /// cannot express.
    fn icu_to_simple(&self, rules: &str) -> Option<String>;

    /// Returns a human-readable name for this translator (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// The built-in translator.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcuRuleTranslator;

impl IcuRuleTranslator {
    pub fn new() -> Self {
        Self
    }
}

impl RuleTranslator for IcuRuleTranslator {
    fn validate_icu(&self, rules: &str) -> Result<(), RuleError> {
        icu::validate(rules)
    }

    fn validate_simple(&self, rules: &str) -> Result<(), RuleError> {
        simple::validate(rules)
    }

    fn simple_to_icu(&self, rules: &str) -> Result<String, RuleError> {
        simple::to_icu(rules)
    }

    fn icu_to_simple(&self, rules: &str) -> Option<String> {
        simple::from_icu(rules)
    }

    fn name(&self) -> &'static str {
        "IcuRuleTranslator"
    }
}
