//! Mapping between LDML `<settings>` attributes and ICU bracket options.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One `<settings>` attribute and the ICU option it corresponds to.
#[derive(Debug)]
pub struct SettingMapping {
    pub attribute: &'static str,
    pub option: &'static str,
    /// `(ldml value, icu value)` pairs. An empty icu value means "emit nothing".
    pub values: &'static [(&'static str, &'static str)],
}

static MAPPINGS: &[SettingMapping] = &[
    SettingMapping {
        attribute: "strength",
        option: "strength",
        values: &[
            ("primary", "1"),
            ("secondary", "2"),
            ("tertiary", "3"),
            ("quaternary", "4"),
            ("identical", "I"),
        ],
    },
    SettingMapping {
        attribute: "alternate",
        option: "alternate",
        values: &[("non-ignorable", "non-ignorable"), ("shifted", "shifted")],
    },
    SettingMapping {
        attribute: "backwards",
        option: "backwards",
        values: &[("on", "2"), ("off", "")],
    },
    SettingMapping {
        attribute: "normalization",
        option: "normalization",
        values: &[("on", "on"), ("off", "off")],
    },
    SettingMapping {
        attribute: "caseLevel",
        option: "caseLevel",
        values: &[("on", "on"), ("off", "off")],
    },
    SettingMapping {
        attribute: "caseFirst",
        option: "caseFirst",
        values: &[("upper", "upper"), ("lower", "lower"), ("off", "off")],
    },
    SettingMapping {
        attribute: "hiraganaQuaternary",
        option: "hiraganaQ",
        values: &[("on", "on"), ("off", "off")],
    },
    SettingMapping {
        attribute: "numeric",
        option: "numericOrdering",
        values: &[("on", "on"), ("off", "off")],
    },
];

static BY_ATTRIBUTE: Lazy<HashMap<&'static str, &'static SettingMapping>> =
    Lazy::new(|| MAPPINGS.iter().map(|m| (m.attribute, m)).collect());

static BY_OPTION: Lazy<HashMap<&'static str, &'static SettingMapping>> =
    Lazy::new(|| MAPPINGS.iter().map(|m| (m.option, m)).collect());

/// Converts a `<settings>` attribute to ICU option text (without brackets).
/// Returns `None` for unknown attributes and `Some("")` for values ICU expresses
/// by omission.
pub fn attribute_to_option(attribute: &str, value: &str) -> Option<String> {
    let mapping = BY_ATTRIBUTE.get(attribute)?;
    let (_, icu) = mapping.values.iter().find(|(ldml, _)| *ldml == value)?;
    if icu.is_empty() {
        Some(String::new())
    } else {
        Some(format!("{} {}", mapping.option, icu))
    }
}

/// Converts the inside of an ICU option to a `<settings>` attribute, when one exists.
pub fn option_to_attribute(option: &str) -> Option<(&'static str, &'static str)> {
    let mut parts = option.split_whitespace();
    let keyword = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let mapping = BY_OPTION.get(keyword)?;
    mapping
        .values
        .iter()
        .find(|(_, icu)| !icu.is_empty() && icu.eq_ignore_ascii_case(value))
        .map(|(ldml, _)| (mapping.attribute, *ldml))
}

/// Attribute names in the order they are written.
pub fn attribute_order() -> impl Iterator<Item = &'static str> {
    MAPPINGS.iter().map(|m| m.attribute)
}
