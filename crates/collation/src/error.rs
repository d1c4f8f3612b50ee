use thiserror::Error;

/// Why a rule text was rejected. Offsets count characters from the start of the text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("Unterminated quote starting at offset {offset}")]
    UnterminatedQuote { offset: usize },

    #[error("Unterminated option starting at offset {offset}")]
    UnterminatedOption { offset: usize },

    #[error("Unknown option '[{0}]'")]
    UnknownOption(String),

    #[error("Invalid escape sequence at offset {offset}")]
    InvalidEscape { offset: usize },

    #[error("Missing operand at offset {offset}")]
    MissingOperand { offset: usize },

    #[error("Relation at offset {offset} appears before any reset")]
    RelationBeforeReset { offset: usize },

    #[error("Text at offset {offset} is not attached to a reset or relation")]
    DetachedText { offset: usize },

    #[error("Unbalanced parenthesis on line {line}")]
    UnbalancedParenthesis { line: usize },

    #[error("Empty group on line {line}")]
    EmptyGroup { line: usize },

    #[error("'{0}' appears more than once")]
    DuplicateElement(String),
}
