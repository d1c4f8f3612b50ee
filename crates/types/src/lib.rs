//! The in-memory writing system model that the LDML mapper reads into and writes from.

pub mod collation;
pub mod definition;
pub mod error;
pub mod keyboard;
pub mod tag;

pub use collation::{CollationRules, CollationRulesType};
pub use definition::{LATEST_DEFINITION_VERSION, WritingSystemDefinition};
pub use error::{TagError, UnknownRulesTypeError};
pub use keyboard::KnownKeyboard;
pub use tag::Subtags;
