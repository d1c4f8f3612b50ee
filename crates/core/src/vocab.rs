//! Element and attribute names of the LDML vocabulary the mapper understands.

use roxmltree::Node;

pub const LDML: &str = "ldml";
pub const IDENTITY: &str = "identity";
pub const LAYOUT: &str = "layout";
pub const ORIENTATION: &str = "orientation";
pub const COLLATIONS: &str = "collations";
pub const COLLATION: &str = "collation";
pub const SPECIAL: &str = "special";
pub const ALIAS: &str = "alias";
pub const BASE: &str = "base";
pub const SETTINGS: &str = "settings";
pub const CR: &str = "cr";

pub const VERSION: &str = "version";
pub const GENERATION: &str = "generation";
pub const LANGUAGE: &str = "language";
pub const SCRIPT: &str = "script";
pub const TERRITORY: &str = "territory";
pub const VARIANT: &str = "variant";

pub const RIGHT_TO_LEFT: &str = "right-to-left";
pub const STANDARD: &str = "standard";

// Vendor fields, by local name.
pub const ABBREVIATION: &str = "abbreviation";
pub const DEFAULT_KEYBOARD: &str = "defaultKeyboard";
pub const IS_LEGACY_ENCODED: &str = "isLegacyEncoded";
pub const LANGUAGE_NAME: &str = "languageName";
pub const SPELL_CHECKING_ID: &str = "spellCheckingId";
pub const SORT_RULES_TYPE: &str = "sortRulesType";
pub const KNOWN_KEYBOARDS: &str = "knownKeyboards";
pub const KEYBOARD: &str = "keyboard";
pub const WINDOWS_LCID: &str = "windowsLCID";

/// The first element child named `name`, ignoring namespaces.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Element children named `name`.
pub fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// `attribute` of the first child named `name`.
pub fn child_attribute<'a>(node: Node<'a, '_>, name: &str, attribute: &str) -> Option<&'a str> {
    child(node, name).and_then(|n| n.attribute(attribute))
}

/// The first element child, which decides the namespace of a `special` block.
pub fn first_element_child<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.is_element())
}
