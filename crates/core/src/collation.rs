//! Choosing how a `<collation>` element is decoded on read and encoded on write.

use crate::error::LdmlError;
use crate::vocab;
use ldml_collation::{
    CollationBody, RuleError, RuleTranslator, icu_rules_from_collation_node,
    simple_rules_from_collation_node,
};
use ldml_merge::PALASO;
use ldml_types::{CollationRules, CollationRulesType};
use log::{debug, warn};
use roxmltree::Node;

/// One way of decoding a collation element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoder {
    /// `base/alias[source]`.
    Alias,
    /// ICU text that has the shape of translated simple rules.
    Simple,
    /// Any ICU text, possibly empty.
    Icu,
    /// ICU text, but only if there is some.
    NonEmptyIcu,
    Default,
}

impl Decoder {
    fn attempt(
        self,
        collation: Node<'_, '_>,
        translator: &dyn RuleTranslator,
    ) -> Option<CollationRules> {
        match self {
            Decoder::Alias => alias_source(collation).map(CollationRules::OtherLanguage),
            Decoder::Simple => {
                simple_rules_from_collation_node(collation, translator).map(CollationRules::CustomSimple)
            }
            Decoder::Icu => Some(CollationRules::CustomIcu(icu_rules_from_collation_node(collation))),
            Decoder::NonEmptyIcu => {
                let rules = icu_rules_from_collation_node(collation);
                (!rules.is_empty()).then_some(CollationRules::CustomIcu(rules))
            }
            Decoder::Default => Some(CollationRules::DefaultOrdering),
        }
    }
}

/// Attempts for a declared `sortRulesType`, in order. The last attempt always succeeds.
fn decoders_for(declared: Option<CollationRulesType>) -> &'static [Decoder] {
    match declared {
        Some(CollationRulesType::OtherLanguage) => &[Decoder::Alias, Decoder::Icu],
        Some(CollationRulesType::CustomSimple) => &[Decoder::Simple, Decoder::Icu],
        Some(CollationRulesType::CustomIcu) => &[Decoder::Icu],
        Some(CollationRulesType::DefaultOrdering) => &[Decoder::Default],
        None => &[Decoder::Alias, Decoder::NonEmptyIcu, Decoder::Default],
    }
}

/// Decodes a standard `<collation>` element.
pub fn decode_collation(
    collation: Node<'_, '_>,
    translator: &dyn RuleTranslator,
) -> Result<CollationRules, LdmlError> {
    let declared = match sort_rules_type(collation) {
        Some(marker) => Some(marker.parse::<CollationRulesType>()?),
        None => None,
    };
    let decoders = decoders_for(declared);
    for (i, decoder) in decoders.iter().enumerate() {
        if let Some(rules) = decoder.attempt(collation, translator) {
            if i > 0 {
                debug!(
                    "Collation declared as {:?} decoded as {}",
                    declared,
                    rules.rules_type()
                );
            }
            return Ok(rules);
        }
        debug!("Collation decoder {:?} found nothing", decoder);
    }
    Ok(CollationRules::DefaultOrdering)
}

fn alias_source(collation: Node<'_, '_>) -> Option<String> {
    let base = vocab::child(collation, vocab::BASE)?;
    vocab::child(base, vocab::ALIAS)
        .and_then(|alias| alias.attribute("source"))
        .or_else(|| base.attribute("source"))
        .filter(|source| !source.is_empty())
        .map(str::to_string)
}

/// The `palaso:sortRulesType` marker inside a collation's `special` children.
fn sort_rules_type(collation: Node<'_, '_>) -> Option<String> {
    collation
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == vocab::SPECIAL)
        .flat_map(|special| special.children())
        .find(|n| {
            n.is_element()
                && n.tag_name().name() == vocab::SORT_RULES_TYPE
                && n.tag_name().namespace() == Some(PALASO)
        })
        .and_then(|marker| marker.attribute("value"))
        .map(str::to_string)
}

/// What a write emits for the definition's collation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollationPlan {
    /// No collation of our own.
    Default,
    /// `base/alias[source]`.
    Alias(String),
    /// `settings` and `cr`, followed by the marker.
    Rules {
        body: CollationBody,
        marker: CollationRulesType,
    },
}

impl CollationPlan {
    pub fn marker(&self) -> Option<CollationRulesType> {
        match self {
            CollationPlan::Default => None,
            CollationPlan::Alias(_) => Some(CollationRulesType::OtherLanguage),
            CollationPlan::Rules { marker, .. } => Some(*marker),
        }
    }
}

/// Translates and validates rules ahead of writing. Rules that fail validation
/// are dropped: the plan falls back to the default ordering. So do rules that
/// come out empty.
pub fn plan_collation(rules: &CollationRules, translator: &dyn RuleTranslator) -> CollationPlan {
    let icu = match rules {
        CollationRules::DefaultOrdering => return CollationPlan::Default,
        CollationRules::OtherLanguage(source) => return CollationPlan::Alias(source.clone()),
        CollationRules::CustomSimple(simple) => translator.simple_to_icu(simple),
        CollationRules::CustomIcu(icu) => Ok(icu.clone()),
    };
    if matches!(&icu, Ok(icu) if icu.trim().is_empty()) {
        debug!("No {} collation rules to write", rules.rules_type());
        return CollationPlan::Default;
    }
    match icu.and_then(|icu| validated_body(&icu, translator)) {
        // Simple rules are stored only as their ICU translation.
        Ok(body) => CollationPlan::Rules {
            body,
            marker: CollationRulesType::CustomIcu,
        },
        Err(e) => {
            warn!(
                "Not writing {} collation rules that fail validation: {}",
                rules.rules_type(),
                e
            );
            CollationPlan::Default
        }
    }
}

/// Checks rules the way a write would, without writing anything.
pub fn validate_collation(
    rules: &CollationRules,
    translator: &dyn RuleTranslator,
) -> Result<(), RuleError> {
    match rules {
        CollationRules::DefaultOrdering | CollationRules::OtherLanguage(_) => Ok(()),
        CollationRules::CustomSimple(simple) => {
            let icu = translator.simple_to_icu(simple)?;
            translator.validate_icu(&icu)
        }
        CollationRules::CustomIcu(icu) => translator.validate_icu(icu),
    }
}

fn validated_body(icu: &str, translator: &dyn RuleTranslator) -> Result<CollationBody, RuleError> {
    translator.validate_icu(icu)?;
    CollationBody::from_icu(icu)
}
