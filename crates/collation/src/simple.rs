//! The simple sort rule grammar.
//!
//! Each non-blank line is a primary difference from the line before it. Items
//! separated by whitespace on one line differ at the secondary level, and items
//! grouped in parentheses, `(a A)`, differ only at the tertiary level. `\uXXXX`
//! escapes a character that would otherwise be syntax.
//!
//! ```text
//! a A
//! (b B) ḃ
//! ch
//! ```

use crate::error::RuleError;
use crate::icu::{self, Strength, Token};
use std::collections::HashSet;

/// Every converted rule set is anchored before the first regular character.
pub const ICU_PREFIX: &str = "&[before 1] [first regular]";

/// One whitespace-separated unit of a line: a single item or a tertiary group.
type Unit = Vec<String>;

fn parse(rules: &str) -> Result<Vec<Vec<Unit>>, RuleError> {
    let mut lines = Vec::new();
    let mut seen = HashSet::new();

    let mut line_start = 0;
    for (index, raw_line) in rules.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let start = line_start;
        line_start += raw_line.chars().count();
        let raw_line = raw_line.strip_suffix('\n').unwrap_or(raw_line);
        let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        let mut units: Vec<Unit> = Vec::new();
        let mut group: Option<Unit> = None;
        let mut current = String::new();
        let mut chars = raw_line.chars().enumerate();

        let mut finish_item =
            |current: &mut String, group: &mut Option<Unit>, units: &mut Vec<Unit>| -> Result<(), RuleError> {
                if current.is_empty() {
                    return Ok(());
                }
                let item = std::mem::take(current);
                if !seen.insert(item.clone()) {
                    return Err(RuleError::DuplicateElement(item));
                }
                match group {
                    Some(g) => g.push(item),
                    None => units.push(vec![item]),
                }
                Ok(())
            };

        while let Some((column, ch)) = chars.next() {
            match ch {
                c if c.is_whitespace() => finish_item(&mut current, &mut group, &mut units)?,
                '(' => {
                    finish_item(&mut current, &mut group, &mut units)?;
                    if group.is_some() {
                        return Err(RuleError::UnbalancedParenthesis { line: line_no });
                    }
                    group = Some(Vec::new());
                }
                ')' => {
                    finish_item(&mut current, &mut group, &mut units)?;
                    match group.take() {
                        Some(g) if g.is_empty() => {
                            return Err(RuleError::EmptyGroup { line: line_no });
                        }
                        Some(g) => units.push(g),
                        None => return Err(RuleError::UnbalancedParenthesis { line: line_no }),
                    }
                }
                '\\' => {
                    let invalid = RuleError::InvalidEscape { offset: start + column };
                    if !matches!(chars.next(), Some((_, 'u'))) {
                        return Err(invalid);
                    }
                    let digits: String = chars.by_ref().take(4).map(|(_, c)| c).collect();
                    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                        return Err(invalid);
                    }
                    let escaped = u32::from_str_radix(&digits, 16)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or(invalid)?;
                    current.push(escaped);
                }
                c => current.push(c),
            }
        }
        finish_item(&mut current, &mut group, &mut units)?;
        if group.is_some() {
            return Err(RuleError::UnbalancedParenthesis { line: line_no });
        }
        if !units.is_empty() {
            lines.push(units);
        }
    }
    Ok(lines)
}

pub fn validate(rules: &str) -> Result<(), RuleError> {
    parse(rules).map(|_| ())
}

/// Translates simple rules into ICU tailoring text.
pub fn to_icu(rules: &str) -> Result<String, RuleError> {
    let lines = parse(rules)?;
    if lines.is_empty() {
        return Ok(String::new());
    }
    let mut out = String::from(ICU_PREFIX);
    for line in &lines {
        for (u, unit) in line.iter().enumerate() {
            for (i, item) in unit.iter().enumerate() {
                let strength = match (u, i) {
                    (0, 0) => Strength::Primary,
                    (_, 0) => Strength::Secondary,
                    _ => Strength::Tertiary,
                };
                out.push(' ');
                out.push_str(strength.operator());
                out.push(' ');
                out.push_str(&icu::quote_operand(item));
            }
        }
    }
    Ok(out)
}

/// Recovers simple rules from ICU text, when the text has exactly the shape
/// [`to_icu`] produces.
pub fn from_icu(icu_rules: &str) -> Option<String> {
    let tokens = icu::tokenize(icu_rules).ok()?;
    if tokens.is_empty() {
        return Some(String::new());
    }
    let mut iter = tokens.into_iter().map(|s| s.token);
    if iter.next()? != Token::Reset
        || iter.next()? != Token::Option("before 1".into())
        || iter.next()? != Token::Option("first regular".into())
    {
        return None;
    }

    let mut lines: Vec<Vec<Unit>> = Vec::new();
    while let Some(token) = iter.next() {
        let Token::Relation { strength, starred: false } = token else {
            return None;
        };
        let Some(Token::Text(item)) = iter.next() else {
            return None;
        };
        match strength {
            Strength::Primary => lines.push(vec![vec![item]]),
            Strength::Secondary => lines.last_mut()?.push(vec![item]),
            Strength::Tertiary => lines.last_mut()?.last_mut()?.push(item),
            _ => return None,
        }
    }

    let rendered: Vec<String> = lines
        .iter()
        .map(|units| {
            units
                .iter()
                .map(|unit| match unit.as_slice() {
                    [single] => escape_item(single),
                    many => format!(
                        "({})",
                        many.iter().map(|i| escape_item(i)).collect::<Vec<_>>().join(" ")
                    ),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    Some(rendered.join("\n"))
}

fn escape_item(item: &str) -> String {
    item.chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '(' | ')' | '\\') {
                format!("\\u{:04X}", c as u32)
            } else {
                c.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_items_map_to_strengths() {
        let icu = to_icu("a A\nb B").unwrap();
        assert_eq!(icu, "&[before 1] [first regular] < a << A < b << B");
        assert!(icu::validate(&icu).is_ok());
    }

    #[test]
    fn test_groups_are_tertiary() {
        let icu = to_icu("(c C) ĉ").unwrap();
        assert_eq!(icu, "&[before 1] [first regular] < c <<< C << ĉ");
    }

    #[test]
    fn test_syntax_characters_are_escaped() {
        let icu = to_icu("a<b").unwrap();
        assert_eq!(icu, "&[before 1] [first regular] < a\\<b");
        assert!(icu::validate(&icu).is_ok());
    }

    #[test]
    fn test_from_icu_inverts_to_icu() {
        let simple = "a A\n(b B) ḃ\nch\na<b";
        let icu = to_icu(simple).unwrap();
        assert_eq!(from_icu(&icu).as_deref(), Some(simple));
    }

    #[test]
    fn test_from_icu_rejects_foreign_shapes() {
        assert_eq!(from_icu("&a < b"), None);
        assert_eq!(from_icu("&[before 1] [first regular] <* abc"), None);
        assert_eq!(from_icu("&[before 1] [first regular] = a"), None);
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(validate("a a"), Err(RuleError::DuplicateElement("a".into())));
        assert_eq!(validate("(a b"), Err(RuleError::UnbalancedParenthesis { line: 1 }));
        assert_eq!(validate("a\nb)"), Err(RuleError::UnbalancedParenthesis { line: 2 }));
        assert_eq!(validate("()"), Err(RuleError::EmptyGroup { line: 1 }));
        assert!(validate("").is_ok());
    }

    #[test]
    fn test_only_unicode_escapes_are_accepted() {
        assert_eq!(
            to_icu("a\nb \\x0041"),
            Err(RuleError::InvalidEscape { offset: 4 })
        );
        assert_eq!(to_icu("\\u00"), Err(RuleError::InvalidEscape { offset: 0 }));
        assert_eq!(to_icu("\\u+041"), Err(RuleError::InvalidEscape { offset: 0 }));
        assert!(to_icu("\\u0041").is_ok());
    }

    #[test]
    fn test_escapes_in_simple_rules() {
        let icu = to_icu("\\u0028 x").unwrap();
        assert_eq!(icu, "&[before 1] [first regular] < \\( << x");
        assert_eq!(from_icu(&icu).as_deref(), Some("\\u0028 x"));
    }
}
