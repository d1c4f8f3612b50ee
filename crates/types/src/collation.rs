use crate::error::UnknownRulesTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The discriminant of [`CollationRules`], as recorded in the `sortRulesType` marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollationRulesType {
    #[default]
    DefaultOrdering,
    OtherLanguage,
    CustomSimple,
    CustomIcu,
}

impl CollationRulesType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollationRulesType::DefaultOrdering => "DefaultOrdering",
            CollationRulesType::OtherLanguage => "OtherLanguage",
            CollationRulesType::CustomSimple => "CustomSimple",
            CollationRulesType::CustomIcu => "CustomIcu",
        }
    }
}

impl fmt::Display for CollationRulesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollationRulesType {
    type Err = UnknownRulesTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "DefaultOrdering" => Ok(CollationRulesType::DefaultOrdering),
            "OtherLanguage" => Ok(CollationRulesType::OtherLanguage),
            "CustomSimple" => Ok(CollationRulesType::CustomSimple),
            "CustomIcu" => Ok(CollationRulesType::CustomIcu),
            other => Err(UnknownRulesTypeError(other.to_string())),
        }
    }
}

/// How a writing system sorts. Exactly one variant holds data at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "rules")]
pub enum CollationRules {
    #[default]
    DefaultOrdering,
    /// Sort like another language; holds that language's tag.
    OtherLanguage(String),
    /// Rules in the line-oriented simple grammar.
    CustomSimple(String),
    /// Raw ICU tailoring text.
    CustomIcu(String),
}

impl CollationRules {
    pub fn rules_type(&self) -> CollationRulesType {
        match self {
            CollationRules::DefaultOrdering => CollationRulesType::DefaultOrdering,
            CollationRules::OtherLanguage(_) => CollationRulesType::OtherLanguage,
            CollationRules::CustomSimple(_) => CollationRulesType::CustomSimple,
            CollationRules::CustomIcu(_) => CollationRulesType::CustomIcu,
        }
    }

    /// The payload, or `None` for the default ordering.
    pub fn rules(&self) -> Option<&str> {
        match self {
            CollationRules::DefaultOrdering => None,
            CollationRules::OtherLanguage(s)
            | CollationRules::CustomSimple(s)
            | CollationRules::CustomIcu(s) => Some(s),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, CollationRules::DefaultOrdering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_type_parses_marker_values() {
        for ty in [
            CollationRulesType::DefaultOrdering,
            CollationRulesType::OtherLanguage,
            CollationRulesType::CustomSimple,
            CollationRulesType::CustomIcu,
        ] {
            assert_eq!(ty.as_str().parse::<CollationRulesType>(), Ok(ty));
        }
        assert_eq!(
            "Bogus".parse::<CollationRulesType>(),
            Err(UnknownRulesTypeError("Bogus".to_string()))
        );
    }

    #[test]
    fn test_payload_matches_variant() {
        let rules = CollationRules::CustomIcu("&a < b".into());
        assert_eq!(rules.rules_type(), CollationRulesType::CustomIcu);
        assert_eq!(rules.rules(), Some("&a < b"));
        assert_eq!(CollationRules::DefaultOrdering.rules(), None);
        assert!(CollationRules::default().is_default());
    }

    #[test]
    fn test_serializes_as_tagged_value() {
        let json = serde_json::to_string(&CollationRules::OtherLanguage("fr".into())).unwrap();
        assert_eq!(json, r#"{"type":"OtherLanguage","rules":"fr"}"#);
    }
}
