//! The writing system definition that LDML files describe.

use crate::collation::CollationRules;
use crate::error::TagError;
use crate::keyboard::KnownKeyboard;
use crate::tag::Subtags;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The schema version written into, and required from, the vendor extension block.
pub const LATEST_DEFINITION_VERSION: u32 = 2;

/// A writing system: language identity, layout direction, sorting and keyboard metadata.
///
/// Every setter marks the definition as modified; [`reset_modified`] clears the
/// flag (the mapper does so at the end of a read).
///
/// [`reset_modified`]: WritingSystemDefinition::reset_modified
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingSystemDefinition {
    subtags: Subtags,
    id: String,
    store_id: String,
    version_number: String,
    version_description: String,
    date_modified: DateTime<Utc>,
    right_to_left: bool,
    language_name: String,
    abbreviation: String,
    spell_checking_id: String,
    default_keyboard: String,
    known_keyboards: Vec<KnownKeyboard>,
    legacy_encoded: bool,
    windows_lcid: String,
    collation: CollationRules,
    requires_valid_tag: bool,
    #[serde(skip)]
    modified: bool,
}

impl Default for WritingSystemDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl WritingSystemDefinition {
    /// An empty definition stamped with the current time.
    pub fn new() -> Self {
        Self {
            subtags: Subtags::default(),
            id: String::new(),
            store_id: String::new(),
            version_number: String::new(),
            version_description: String::new(),
            date_modified: Utc::now(),
            right_to_left: false,
            language_name: String::new(),
            abbreviation: String::new(),
            spell_checking_id: String::new(),
            default_keyboard: String::new(),
            known_keyboards: Vec::new(),
            legacy_encoded: false,
            windows_lcid: String::new(),
            collation: CollationRules::DefaultOrdering,
            requires_valid_tag: false,
            modified: false,
        }
    }

    /// A definition for the given subtags.
    pub fn with_subtags(subtags: Subtags) -> Self {
        let mut ws = Self::new();
        ws.subtags = subtags;
        ws
    }

    // --- Identity ---

    pub fn subtags(&self) -> &Subtags {
        &self.subtags
    }

    pub fn language(&self) -> &str {
        &self.subtags.language
    }

    pub fn script(&self) -> &str {
        &self.subtags.script
    }

    pub fn region(&self) -> &str {
        &self.subtags.region
    }

    pub fn variant(&self) -> &str {
        &self.subtags.variant
    }

    /// The language tag derived from the four subtags. Always consistent with them.
    pub fn bcp47_tag(&self) -> String {
        self.subtags.to_tag()
    }

    pub fn set_all_components(&mut self, subtags: Subtags) {
        self.subtags = subtags;
        self.modified = true;
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.subtags.language = language.into();
        self.modified = true;
    }

    pub fn set_script(&mut self, script: impl Into<String>) {
        self.subtags.script = script.into();
        self.modified = true;
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.subtags.region = region.into();
        self.modified = true;
    }

    pub fn set_variant(&mut self, variant: impl Into<String>) {
        self.subtags.variant = variant.into();
        self.modified = true;
    }

    /// The identifier the definition was loaded under. Unlike [`bcp47_tag`] this
    /// keeps the literal subtags found in the file.
    ///
    /// [`bcp47_tag`]: WritingSystemDefinition::bcp47_tag
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
        self.modified = true;
    }

    pub fn store_id(&self) -> &str {
        &self.store_id
    }

    pub fn set_store_id(&mut self, store_id: impl Into<String>) {
        self.store_id = store_id.into();
        self.modified = true;
    }

    /// Forces tag validation: once set, [`validate_tag`] is expected to pass
    /// before the definition is persisted.
    ///
    /// [`validate_tag`]: WritingSystemDefinition::validate_tag
    pub fn requires_valid_tag(&self) -> bool {
        self.requires_valid_tag
    }

    pub fn set_requires_valid_tag(&mut self, required: bool) {
        self.requires_valid_tag = required;
    }

    pub fn validate_tag(&self) -> Result<(), TagError> {
        self.subtags.validate()
    }

    // --- Version and dates ---

    pub fn version_number(&self) -> &str {
        &self.version_number
    }

    pub fn set_version_number(&mut self, number: impl Into<String>) {
        self.version_number = number.into();
        self.modified = true;
    }

    pub fn version_description(&self) -> &str {
        &self.version_description
    }

    pub fn set_version_description(&mut self, description: impl Into<String>) {
        self.version_description = description.into();
        self.modified = true;
    }

    pub fn date_modified(&self) -> DateTime<Utc> {
        self.date_modified
    }

    pub fn set_date_modified(&mut self, date: DateTime<Utc>) {
        self.date_modified = date;
        self.modified = true;
    }

    // --- Layout ---

    pub fn right_to_left(&self) -> bool {
        self.right_to_left
    }

    pub fn set_right_to_left(&mut self, rtl: bool) {
        self.right_to_left = rtl;
        self.modified = true;
    }

    // --- Display metadata ---

    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    pub fn set_language_name(&mut self, name: impl Into<String>) {
        self.language_name = name.into();
        self.modified = true;
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn set_abbreviation(&mut self, abbreviation: impl Into<String>) {
        self.abbreviation = abbreviation.into();
        self.modified = true;
    }

    pub fn spell_checking_id(&self) -> &str {
        &self.spell_checking_id
    }

    pub fn set_spell_checking_id(&mut self, id: impl Into<String>) {
        self.spell_checking_id = id.into();
        self.modified = true;
    }

    /// True when text in this writing system uses a non-Unicode legacy encoding.
    pub fn legacy_encoded(&self) -> bool {
        self.legacy_encoded
    }

    pub fn set_legacy_encoded(&mut self, legacy: bool) {
        self.legacy_encoded = legacy;
        self.modified = true;
    }

    pub fn windows_lcid(&self) -> &str {
        &self.windows_lcid
    }

    pub fn set_windows_lcid(&mut self, lcid: impl Into<String>) {
        self.windows_lcid = lcid.into();
        self.modified = true;
    }

    // --- Keyboards ---

    pub fn default_keyboard(&self) -> &str {
        &self.default_keyboard
    }

    pub fn set_default_keyboard(&mut self, keyboard: impl Into<String>) {
        self.default_keyboard = keyboard.into();
        self.modified = true;
    }

    pub fn known_keyboards(&self) -> &[KnownKeyboard] {
        &self.known_keyboards
    }

    pub fn add_known_keyboard(&mut self, keyboard: KnownKeyboard) {
        self.known_keyboards.push(keyboard);
        self.modified = true;
    }

    pub fn clear_known_keyboards(&mut self) {
        self.known_keyboards.clear();
        self.modified = true;
    }

    // --- Collation ---

    pub fn collation(&self) -> &CollationRules {
        &self.collation
    }

    pub fn set_collation(&mut self, rules: CollationRules) {
        self.collation = rules;
        self.modified = true;
    }

    // --- Change tracking ---

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn reset_modified(&mut self) {
        self.modified = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_follows_subtags() {
        let mut ws = WritingSystemDefinition::with_subtags(Subtags::new("en", "Latn", "", ""));
        assert_eq!(ws.bcp47_tag(), "en-Latn");
        ws.set_region("GB");
        assert_eq!(ws.bcp47_tag(), "en-Latn-GB");
        ws.set_script("");
        assert_eq!(ws.bcp47_tag(), "en-GB");
    }

    #[test]
    fn test_setters_mark_modified() {
        let mut ws = WritingSystemDefinition::new();
        assert!(!ws.is_modified());
        ws.set_abbreviation("eng");
        assert!(ws.is_modified());
        ws.reset_modified();
        assert!(!ws.is_modified());
        ws.set_collation(CollationRules::CustomIcu("&a < b".into()));
        assert!(ws.is_modified());
    }

    #[test]
    fn test_requires_valid_tag_does_not_mark_modified() {
        let mut ws = WritingSystemDefinition::new();
        ws.set_requires_valid_tag(true);
        assert!(ws.requires_valid_tag());
        assert!(!ws.is_modified());
    }
}
