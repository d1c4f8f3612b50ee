//! Decoding of LDML `<collation>` elements into ICU rule text.
//!
//! Two rule encodings are understood: the `<cr>` element holding ICU text
//! directly, and the older `<rules>` element spelling each reset and relation
//! out as child elements.

use crate::icu::{self, Strength};
use crate::settings::{attribute_order, attribute_to_option};
use crate::translator::RuleTranslator;
use roxmltree::Node;

/// Builds ICU rule text from a `<collation>` element.
///
/// `<settings>` attributes become leading bracket options, followed by any
/// `suppress_contractions` and `optimize` sets and then the rules themselves.
/// Missing or empty parts contribute nothing.
pub fn icu_rules_from_collation_node(collation: Node<'_, '_>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(settings) = child(collation, "settings") {
        for attribute in attribute_order() {
            let Some(value) = settings.attribute(attribute) else {
                continue;
            };
            match attribute_to_option(attribute, value) {
                Some(option) if !option.is_empty() => parts.push(format!("[{}]", option)),
                Some(_) => {}
                None => log::debug!("Ignoring unsupported setting {}=\"{}\"", attribute, value),
            }
        }
    }

    for (element, option) in [
        ("suppress_contractions", "suppressContractions"),
        ("optimize", "optimize"),
    ] {
        if let Some(node) = child(collation, element) {
            let set = node.text().unwrap_or("").trim();
            if !set.is_empty() {
                parts.push(format!("[{} {}]", option, set));
            }
        }
    }

    for node in collation.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "cr" => {
                let text = node.text().unwrap_or("").trim();
                if !text.is_empty() {
                    parts.push(text.to_string());
                }
            }
            "rules" => {
                let text = rules_element_to_icu(node);
                if !text.is_empty() {
                    parts.push(text);
                }
            }
            _ => {}
        }
    }

    parts.join(" ")
}

/// Recovers simple rules from a `<collation>` element, if its ICU text has the
/// shape the simple grammar produces.
pub fn simple_rules_from_collation_node(
    collation: Node<'_, '_>,
    translator: &dyn RuleTranslator,
) -> Option<String> {
    let icu_rules = icu_rules_from_collation_node(collation);
    translator.icu_to_simple(&icu_rules)
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

fn rules_element_to_icu(rules: Node<'_, '_>) -> String {
    let mut out: Vec<String> = Vec::new();
    for node in rules.children().filter(|n| n.is_element()) {
        let name = node.tag_name().name();
        match name {
            "reset" => out.push(reset_to_icu(node)),
            "x" => out.push(expansion_to_icu(node)),
            _ => {
                if let Some(text) = relation_to_icu(node) {
                    out.push(text);
                }
            }
        }
    }
    out.join(" ")
}

fn reset_to_icu(reset: Node<'_, '_>) -> String {
    let mut out = String::from("&");
    if let Some(before) = reset.attribute("before") {
        let level = match before {
            "primary" => "1",
            "secondary" => "2",
            "tertiary" => "3",
            other => other,
        };
        out.push_str(&format!("[before {}] ", level));
    }
    match reset.children().find(|n| n.is_element() && n.tag_name().name() != "cp") {
        Some(position) => out.push_str(&position_to_icu(position.tag_name().name())),
        None => out.push_str(&icu::quote_operand(&element_text(reset))),
    }
    out
}

/// `first_non_ignorable` becomes `[first regular]`, `last_variable` becomes
/// `[last variable]`, and so on.
fn position_to_icu(name: &str) -> String {
    let words = name.replace('_', " ").replace("non ignorable", "regular");
    format!("[{}]", words)
}

fn relation_operator(name: &str) -> Option<(Strength, bool)> {
    let (base, starred) = match name.strip_suffix('c') {
        Some(base) => (base, true),
        None => (name, false),
    };
    let strength = match base {
        "p" => Strength::Primary,
        "s" => Strength::Secondary,
        "t" => Strength::Tertiary,
        "q" => Strength::Quaternary,
        "i" => Strength::Identical,
        _ => return None,
    };
    Some((strength, starred))
}

fn relation_to_icu(node: Node<'_, '_>) -> Option<String> {
    let (strength, starred) = relation_operator(node.tag_name().name())?;
    let star = if starred { "*" } else { "" };
    Some(format!(
        "{}{} {}",
        strength.operator(),
        star,
        icu::quote_operand(&element_text(node))
    ))
}

fn expansion_to_icu(x: Node<'_, '_>) -> String {
    let mut relation: Option<Node<'_, '_>> = None;
    let mut context = String::new();
    let mut extend = String::new();
    for node in x.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "context" => context = element_text(node),
            "extend" => extend = element_text(node),
            _ if relation.is_none() => relation = Some(node),
            _ => {}
        }
    }
    let Some(relation) = relation else {
        return String::new();
    };
    let Some((strength, starred)) = relation_operator(relation.tag_name().name()) else {
        return String::new();
    };

    let mut out = String::from(strength.operator());
    if starred {
        out.push('*');
    }
    out.push(' ');
    if !context.is_empty() {
        out.push_str(&icu::quote_operand(&context));
        out.push_str(" | ");
    }
    out.push_str(&icu::quote_operand(&element_text(relation)));
    if !extend.is_empty() {
        out.push_str(" / ");
        out.push_str(&icu::quote_operand(&extend));
    }
    out
}

/// Text content of an element, with `<cp hex="..."/>` children expanded.
fn element_text(node: Node<'_, '_>) -> String {
    let mut out = String::new();
    for child in node.children() {
        if child.is_text() {
            out.push_str(child.text().unwrap_or(""));
        } else if child.is_element() && child.tag_name().name() == "cp" {
            if let Some(ch) = child
                .attribute("hex")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .and_then(char::from_u32)
            {
                out.push(ch);
            }
        }
    }
    out
}
