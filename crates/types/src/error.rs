use thiserror::Error;

/// Raised when a set of subtags cannot form a well-shaped language tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    #[error("Language subtag is required")]
    EmptyLanguage,

    #[error("Invalid {kind} subtag '{value}' in tag '{tag}'")]
    InvalidSubtag {
        kind: &'static str,
        value: String,
        tag: String,
    },
}

/// A `sortRulesType` marker outside the closed set of collation rule types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unhandled sort rules type '{0}'")]
pub struct UnknownRulesTypeError(pub String);
