use crate::error::RuleError;
use crate::icu::{self, Token};
use crate::settings::{attribute_order, option_to_attribute};

/// ICU rules split into the parts an LDML `<collation>` element stores:
/// leading options that have a `<settings>` attribute, and the remaining rule text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollationBody {
    pub settings: Vec<(&'static str, &'static str)>,
    pub rules: String,
}

impl CollationBody {
    pub fn from_icu(icu_rules: &str) -> Result<Self, RuleError> {
        let tokens = icu::tokenize(icu_rules)?;
        let mut settings: Vec<(&'static str, &'static str)> = Vec::new();
        let mut removed: Vec<(usize, usize)> = Vec::new();

        for spanned in &tokens {
            let Token::Option(option) = &spanned.token else {
                break;
            };
            if let Some((attribute, value)) = option_to_attribute(option) {
                settings.retain(|(a, _)| *a != attribute);
                settings.push((attribute, value));
                removed.push((spanned.start, spanned.end));
            }
        }

        let rules: String = icu_rules
            .chars()
            .enumerate()
            .filter(|(i, _)| !removed.iter().any(|(s, e)| i >= s && i < e))
            .map(|(_, c)| c)
            .collect();

        settings.sort_by_key(|(attribute, _)| attribute_order().position(|a| a == *attribute));

        Ok(Self {
            settings,
            rules: icu::escape_non_xml_chars(rules.trim()),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.rules.is_empty()
    }
}
