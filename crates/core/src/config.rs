//! Mapper configuration.

/// Indentation of written documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// Everything on one line.
    None,
    /// This many tabs per nesting level.
    Tabs(usize),
    /// This many spaces per nesting level.
    Spaces(usize),
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Tabs(1)
    }
}

/// How a prior document's literal private-use tag is treated on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compatibility {
    /// Subtags are always regenerated from the definition.
    #[default]
    Strict,
    /// A legacy `x-...` language tag in the prior document is kept as written
    /// when it still denotes the definition's tag.
    LegacyPrivateUse,
}

/// Configuration for an [`LdmlDataMapper`](crate::LdmlDataMapper).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Indentation of written documents (default: one tab per level).
    pub indent: IndentStyle,
    /// Whether to start documents with `<?xml version="1.0" encoding="utf-8"?>` (default: true).
    pub write_declaration: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            write_declaration: true,
        }
    }
}

impl MapperConfig {
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_declaration(mut self, write_declaration: bool) -> Self {
        self.write_declaration = write_declaration;
        self
    }
}
