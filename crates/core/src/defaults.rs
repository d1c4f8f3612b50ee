//! Minimal definitions for a handful of well-known tags.

use ldml_types::WritingSystemDefinition;

struct KnownTag {
    tag: &'static str,
    language: &'static str,
    script: &'static str,
    language_name: &'static str,
    abbreviation: &'static str,
    right_to_left: bool,
}

static KNOWN_TAGS: &[KnownTag] = &[
    KnownTag {
        tag: "en-latn",
        language: "en",
        script: "Latn",
        language_name: "English",
        abbreviation: "eng",
        right_to_left: false,
    },
    KnownTag {
        tag: "fr-latn",
        language: "fr",
        script: "Latn",
        language_name: "French",
        abbreviation: "fra",
        right_to_left: false,
    },
    KnownTag {
        tag: "de-latn",
        language: "de",
        script: "Latn",
        language_name: "German",
        abbreviation: "deu",
        right_to_left: false,
    },
    KnownTag {
        tag: "es-latn",
        language: "es",
        script: "Latn",
        language_name: "Spanish",
        abbreviation: "spa",
        right_to_left: false,
    },
    KnownTag {
        tag: "ar-arab",
        language: "ar",
        script: "Arab",
        language_name: "Arabic",
        abbreviation: "ara",
        right_to_left: true,
    },
];

/// Populates `ws` for `tag` (matched case-insensitively). Unknown tags only get
/// the `Latn` script.
pub fn fill_with_defaults(tag: &str, ws: &mut WritingSystemDefinition) {
    let Some(known) = KNOWN_TAGS.iter().find(|k| k.tag.eq_ignore_ascii_case(tag)) else {
        ws.set_script("Latn");
        return;
    };
    ws.set_language(known.language);
    ws.set_language_name(known.language_name);
    ws.set_abbreviation(known.abbreviation);
    ws.set_script(known.script);
    if known.right_to_left {
        ws.set_right_to_left(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english() {
        let mut ws = WritingSystemDefinition::new();
        fill_with_defaults("en-Latn", &mut ws);
        assert_eq!(ws.language(), "en");
        assert_eq!(ws.language_name(), "English");
        assert_eq!(ws.abbreviation(), "eng");
        assert_eq!(ws.script(), "Latn");
        assert!(!ws.right_to_left());
    }

    #[test]
    fn test_arabic_is_right_to_left() {
        let mut ws = WritingSystemDefinition::new();
        fill_with_defaults("ar-arab", &mut ws);
        assert_eq!(ws.bcp47_tag(), "ar-Arab");
        assert!(ws.right_to_left());
    }

    #[test]
    fn test_unknown_tag_only_sets_script() {
        let mut ws = WritingSystemDefinition::new();
        ws.set_language("tpi");
        fill_with_defaults("tpi", &mut ws);
        assert_eq!(ws.language(), "tpi");
        assert_eq!(ws.script(), "Latn");
        assert_eq!(ws.language_name(), "");
    }
}
