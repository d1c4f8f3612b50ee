//! Read: populating a definition from an LDML document.

use crate::collation::decode_collation;
use crate::context::ReadContext;
use crate::dates::parse_generation_date;
use crate::error::LdmlError;
use crate::vocab::{self, child, child_attribute, children, first_element_child};
use ldml_collation::RuleTranslator;
use ldml_merge::{FIELDWORKS, PALASO, PALASO2};
use ldml_types::{
    CollationRules, KnownKeyboard, LATEST_DEFINITION_VERSION, Subtags, WritingSystemDefinition,
};
use log::debug;
use roxmltree::{Document, Node, ParsingOptions};

pub struct LdmlReader<'t> {
    translator: &'t dyn RuleTranslator,
}

impl<'t> LdmlReader<'t> {
    pub fn new(translator: &'t dyn RuleTranslator) -> Self {
        Self { translator }
    }

    /// Parses `xml` into `ws`. Fields the document does not mention keep their
    /// current values, except the known keyboards, which are replaced.
    pub fn read(&self, xml: &str, ws: &mut WritingSystemDefinition) -> Result<(), LdmlError> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(xml, options)?;
        let root = doc.root_element();
        if root.tag_name().name() != vocab::LDML {
            return Err(LdmlError::missing_root());
        }

        let mut ctx = ReadContext::default();
        if let Some(identity) = child(root, vocab::IDENTITY) {
            read_identity(identity, ws, &mut ctx);
        }
        read_layout(child(root, vocab::LAYOUT), ws);
        self.read_collations(child(root, vocab::COLLATIONS), ws)?;

        ws.clear_known_keyboards();
        for special in children(root, vocab::SPECIAL) {
            read_special(special, ws, &ctx)?;
        }

        ws.set_store_id("");
        ws.reset_modified();
        Ok(())
    }

    fn read_collations(
        &self,
        collations: Option<Node<'_, '_>>,
        ws: &mut WritingSystemDefinition,
    ) -> Result<(), LdmlError> {
        let standard = collations.and_then(|collations| {
            children(collations, vocab::COLLATION).find(|c| is_standard_collation(*c))
        });
        let rules = match standard {
            Some(collation) => decode_collation(collation, self.translator)?,
            None => CollationRules::DefaultOrdering,
        };
        debug!("Read {} collation", rules.rules_type());
        ws.set_collation(rules);
        Ok(())
    }
}

/// Collations without a `type`, or typed `standard`, describe the definition's own sort order.
fn is_standard_collation(collation: Node<'_, '_>) -> bool {
    collation
        .attribute("type")
        .is_none_or(|t| t.is_empty() || t == vocab::STANDARD)
}

fn read_identity(identity: Node<'_, '_>, ws: &mut WritingSystemDefinition, ctx: &mut ReadContext) {
    if let Some(version) = child(identity, vocab::VERSION) {
        ws.set_version_number(version.attribute("number").unwrap_or_default());
        ws.set_version_description(version.text().unwrap_or_default());
    }
    if let Some(date) = child_attribute(identity, vocab::GENERATION, "date") {
        ws.set_date_modified(parse_generation_date(date));
    }

    let subtag = |name: &str| child_attribute(identity, name, "type").unwrap_or_default();
    let literal = Subtags::new(
        subtag(vocab::LANGUAGE),
        subtag(vocab::SCRIPT),
        subtag(vocab::TERRITORY),
        subtag(vocab::VARIANT),
    );
    let interpretation = ldml_tags::interpret(&literal);
    if interpretation.legacy {
        debug!("'{}' is a legacy private-use tag", literal);
    }
    ctx.legacy_private_use = interpretation.legacy;
    ws.set_all_components(interpretation.subtags);
    ws.set_id(literal.to_tag());
}

fn read_layout(layout: Option<Node<'_, '_>>, ws: &mut WritingSystemDefinition) {
    let characters = layout.and_then(|l| child_attribute(l, vocab::ORIENTATION, "characters"));
    ws.set_right_to_left(characters == Some(vocab::RIGHT_TO_LEFT));
}

fn read_special(
    special: Node<'_, '_>,
    ws: &mut WritingSystemDefinition,
    ctx: &ReadContext,
) -> Result<(), LdmlError> {
    let Some(first) = first_element_child(special) else {
        return Ok(());
    };
    match first.tag_name().namespace() {
        Some(PALASO) => read_palaso(special, ws, ctx),
        Some(PALASO2) => {
            read_known_keyboards(special, ws);
            Ok(())
        }
        Some(FIELDWORKS) => {
            if let Some(lcid) = vendor_value(special, FIELDWORKS, vocab::WINDOWS_LCID) {
                ws.set_windows_lcid(lcid);
            }
            Ok(())
        }
        other => {
            debug!("Ignoring special block in namespace {:?}", other);
            Ok(())
        }
    }
}

fn read_palaso(
    special: Node<'_, '_>,
    ws: &mut WritingSystemDefinition,
    ctx: &ReadContext,
) -> Result<(), LdmlError> {
    if let Some(version) = vendor_value(special, PALASO, vocab::VERSION) {
        check_version(version, ws, ctx)?;
    }
    let value = |name: &str| vendor_value(special, PALASO, name);
    if let Some(abbreviation) = value(vocab::ABBREVIATION) {
        ws.set_abbreviation(abbreviation);
    }
    if let Some(keyboard) = value(vocab::DEFAULT_KEYBOARD) {
        ws.set_default_keyboard(keyboard);
    }
    if let Some(legacy) = value(vocab::IS_LEGACY_ENCODED) {
        ws.set_legacy_encoded(legacy.trim().eq_ignore_ascii_case("true"));
    }
    if let Some(name) = value(vocab::LANGUAGE_NAME) {
        ws.set_language_name(name);
    }
    if let Some(id) = value(vocab::SPELL_CHECKING_ID) {
        ws.set_spell_checking_id(id);
    }
    Ok(())
}

fn check_version(
    version: &str,
    ws: &WritingSystemDefinition,
    ctx: &ReadContext,
) -> Result<(), LdmlError> {
    if ctx.legacy_private_use {
        debug!("Accepting legacy document '{}' at version {}", ws.id(), version);
        return Ok(());
    }
    if version == LATEST_DEFINITION_VERSION.to_string() {
        return Ok(());
    }
    Err(LdmlError::VersionMismatch {
        tag: ws.id().to_string(),
        found: version.to_string(),
        expected: LATEST_DEFINITION_VERSION,
    })
}

fn read_known_keyboards(special: Node<'_, '_>, ws: &mut WritingSystemDefinition) {
    let keyboards = special
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == vocab::KNOWN_KEYBOARDS);
    for keyboard in keyboards.into_iter().flat_map(|k| children(k, vocab::KEYBOARD)) {
        ws.add_known_keyboard(KnownKeyboard::new(
            keyboard.attribute("layout").unwrap_or_default(),
            keyboard.attribute("locale").unwrap_or_default(),
        ));
    }
}

/// `value` of the child `name` in namespace `uri`.
fn vendor_value<'a>(special: Node<'a, '_>, uri: &str, name: &str) -> Option<&'a str> {
    special
        .children()
        .find(|n| {
            n.is_element() && n.tag_name().name() == name && n.tag_name().namespace() == Some(uri)
        })
        .and_then(|n| n.attribute("value"))
}
