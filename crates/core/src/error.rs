// src/error.rs
//! Error types for reading and writing LDML documents.

use ldml_merge::MergeError;
use ldml_types::{TagError, UnknownRulesTypeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LdmlError {
    #[error("Unable to load writing system definition: {0}")]
    Format(String),

    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("The LDML tag '{tag}' is version {found}. Version {expected} was expected.")]
    VersionMismatch {
        tag: String,
        found: String,
        expected: u32,
    },

    #[error("Unhandled sort rules type '{0}'")]
    UnknownCollationType(String),

    #[error("Invalid language tag: {0}")]
    InvalidTag(#[from] TagError),

    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LdmlError {
    pub(crate) fn missing_root() -> Self {
        LdmlError::Format("Missing <ldml> tag.".to_string())
    }
}

impl From<UnknownRulesTypeError> for LdmlError {
    fn from(e: UnknownRulesTypeError) -> Self {
        LdmlError::UnknownCollationType(e.0)
    }
}
