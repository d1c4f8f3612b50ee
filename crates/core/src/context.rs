//! Per-call state threaded through a single read or write.

use crate::config::Compatibility;

/// State of one Read.
#[derive(Debug, Clone, Default)]
pub struct ReadContext {
    /// Set while reading identity when the language subtag is a legacy
    /// private-use encoding. Exempts the document from the version check.
    pub legacy_private_use: bool,
}

/// State of one Write.
#[derive(Debug, Clone)]
pub struct WriteContext {
    pub compatibility: Compatibility,
    /// Set while writing identity when the prior document's literal tag is kept.
    /// Later sections copy the prior vendor fields instead of regenerating them.
    pub legacy_private_use: bool,
}

impl WriteContext {
    pub fn new(compatibility: Compatibility) -> Self {
        Self {
            compatibility,
            legacy_private_use: false,
        }
    }
}
