//! Collation rule translation used by the LDML mapper.
//!
//! The mapper treats this crate as a black box behind [`RuleTranslator`]: it
//! validates ICU tailoring text, converts between the line-oriented simple rule
//! grammar and ICU text, and decodes the rule encodings found in LDML
//! `<collation>` elements.

pub mod body;
pub mod error;
pub mod icu;
pub mod node;
pub mod settings;
pub mod simple;
pub mod translator;

pub use body::CollationBody;
pub use error::RuleError;
pub use node::{icu_rules_from_collation_node, simple_rules_from_collation_node};
pub use translator::{IcuRuleTranslator, RuleTranslator};
