//! Language tag subtags and their shape checks.
//!
//! Only the *shape* of each subtag is checked here (lengths and character
//! classes). Whether a language or script code is actually registered is left to
//! the caller's registry.

use crate::error::TagError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four components of a language tag as they are stored in LDML `identity`.
///
/// `variant` may carry a private-use tail (`"fonipa-x-audio"`), exactly as it is
/// written in the `variant` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subtags {
    pub language: String,
    pub script: String,
    pub region: String,
    pub variant: String,
}

impl Subtags {
    pub fn new(
        language: impl Into<String>,
        script: impl Into<String>,
        region: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            script: script.into(),
            region: region.into(),
            variant: variant.into(),
        }
    }

    /// Joins the non-empty subtags with `-`.
    pub fn to_tag(&self) -> String {
        [
            self.language.as_str(),
            self.script.as_str(),
            self.region.as_str(),
            self.variant.as_str(),
        ]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("-")
    }

    /// True when the language subtag is a legacy private-use encoding
    /// (`x-...` or a bare `x`).
    pub fn has_private_use_language(&self) -> bool {
        is_private_use_language(&self.language)
    }

    /// Checks that every subtag is well shaped.
    pub fn validate(&self) -> Result<(), TagError> {
        if self.language.is_empty() {
            return Err(TagError::EmptyLanguage);
        }
        let invalid = |kind: &'static str, value: &str| TagError::InvalidSubtag {
            kind,
            value: value.to_string(),
            tag: self.to_tag(),
        };

        if !is_language_shape(&self.language) {
            return Err(invalid("language", &self.language));
        }
        if !self.script.is_empty() && !is_script_shape(&self.script) {
            return Err(invalid("script", &self.script));
        }
        if !self.region.is_empty() && !is_region_shape(&self.region) {
            return Err(invalid("region", &self.region));
        }
        if !self.variant.is_empty() {
            let mut in_private_use = false;
            for part in self.variant.split('-') {
                if part.eq_ignore_ascii_case("x") && !in_private_use {
                    in_private_use = true;
                    continue;
                }
                let ok = if in_private_use {
                    is_private_use_shape(part)
                } else {
                    is_variant_shape(part)
                };
                if !ok {
                    return Err(invalid("variant", part));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Subtags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tag())
    }
}

/// True for `x-...` or `x`, case-insensitively.
pub fn is_private_use_language(language: &str) -> bool {
    language.eq_ignore_ascii_case("x")
        || language
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("x-"))
}

fn is_alpha(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_alnum(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn is_language_shape(s: &str) -> bool {
    (2..=8).contains(&s.len()) && s.len() != 4 && is_alpha(s)
}

fn is_script_shape(s: &str) -> bool {
    s.len() == 4 && is_alpha(s)
}

fn is_region_shape(s: &str) -> bool {
    (s.len() == 2 && is_alpha(s)) || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant_shape(s: &str) -> bool {
    match s.len() {
        5..=8 => is_alnum(s),
        4 => s.as_bytes()[0].is_ascii_digit() && is_alnum(s),
        _ => false,
    }
}

fn is_private_use_shape(s: &str) -> bool {
    (1..=8).contains(&s.len()) && is_alnum(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_tag_skips_empty_subtags() {
        assert_eq!(Subtags::new("en", "", "", "").to_tag(), "en");
        assert_eq!(Subtags::new("en", "Latn", "US", "").to_tag(), "en-Latn-US");
        assert_eq!(Subtags::new("de", "", "", "1901").to_tag(), "de-1901");
    }

    #[test]
    fn test_private_use_detection() {
        assert!(is_private_use_language("x-kal"));
        assert!(is_private_use_language("X-kal"));
        assert!(is_private_use_language("x"));
        assert!(!is_private_use_language("xh"));
        assert!(!is_private_use_language(""));
    }

    #[test]
    fn test_validate_accepts_common_tags() {
        assert!(Subtags::new("en", "Latn", "US", "").validate().is_ok());
        assert!(Subtags::new("qaa", "", "", "x-kal").validate().is_ok());
        assert!(Subtags::new("de", "", "", "1901").validate().is_ok());
        assert!(Subtags::new("en", "", "419", "fonipa-x-etic").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_shapes() {
        assert_eq!(Subtags::default().validate(), Err(TagError::EmptyLanguage));
        assert!(Subtags::new("e", "", "", "").validate().is_err());
        assert!(Subtags::new("x-kal", "", "", "").validate().is_err());
        assert!(Subtags::new("en", "Lat", "", "").validate().is_err());
        assert!(Subtags::new("en", "", "USA", "").validate().is_err());
        assert!(Subtags::new("en", "", "", "abc").validate().is_err());
    }
}
