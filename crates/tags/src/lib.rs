//! Interprets the subtags found in an LDML `identity` element.
//!
//! Ordinary tags pass through untouched. Tags whose language subtag is a legacy
//! private-use encoding (`x-...`, written by an older generation of tooling) are
//! converted to the modern form, where the private-use language moves into the
//! variant under `qaa` (the first code of the ISO 639 private-use range).

pub mod interpreter;

pub use interpreter::{Interpretation, PRIVATE_USE_LANGUAGE, interpret, normalize};
pub use ldml_types::tag::is_private_use_language;
