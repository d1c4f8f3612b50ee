//! # ldml-mapper
//!
//! Maps writing system definitions to and from LDML.
//!
//! ```no_run
//! use ldml_mapper::{Compatibility, LdmlDataMapper, WritingSystemDefinition};
//! use std::path::Path;
//!
//! let mapper = LdmlDataMapper::new();
//! let mut ws = WritingSystemDefinition::new();
//! mapper.read_path("en.ldml", &mut ws)?;
//! ws.set_language_name("English");
//! mapper.write_path("en.ldml", &mut ws, Some(Path::new("en.ldml")), Compatibility::Strict)?;
//! # Ok::<(), ldml_mapper::LdmlError>(())
//! ```
//!
//! The member crates are re-exported for callers that need the lower layers:
//! - **types**: the definition model
//! - **tags**: legacy private-use tag interpretation
//! - **rules**: collation rule translation
//! - **merge**: the merge cursor and element ordering

pub use ldml_collation as rules;
pub use ldml_core as codec;
pub use ldml_merge as merge;
pub use ldml_tags as tags;
pub use ldml_types as types;

pub use ldml_collation::{IcuRuleTranslator, RuleError, RuleTranslator};
pub use ldml_core::{Compatibility, IndentStyle, LdmlDataMapper, LdmlError, MapperConfig};
pub use ldml_types::{
    CollationRules, CollationRulesType, KnownKeyboard, Subtags, WritingSystemDefinition,
};
