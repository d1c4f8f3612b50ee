//! Tokenizer and structural validator for ICU tailoring rule text.
//!
//! Whitespace outside quotes is insignificant, as in ICU. Unquoted ASCII
//! punctuation that is not rule syntax is rejected.

use crate::error::RuleError;

/// Relation strength of a rule operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Primary,
    Secondary,
    Tertiary,
    Quaternary,
    Identical,
}

impl Strength {
    pub fn operator(&self) -> &'static str {
        match self {
            Strength::Primary => "<",
            Strength::Secondary => "<<",
            Strength::Tertiary => "<<<",
            Strength::Quaternary => "<<<<",
            Strength::Identical => "=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Reset,
    Relation { strength: Strength, starred: bool },
    /// The inside of a `[...]` option, trimmed.
    Option(String),
    /// Unescaped operand text.
    Text(String),
    /// `|`, separating a prefix from the operand.
    Context,
    /// `/`, introducing an extension.
    Extension,
}

/// A token with the character span it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub start: usize,
    pub end: usize,
    pub token: Token,
}

/// Options ICU accepts at the top level of a rule set.
const TOP_LEVEL_OPTIONS: &[&str] = &[
    "strength",
    "alternate",
    "backwards",
    "normalization",
    "caseLevel",
    "caseFirst",
    "hiraganaQ",
    "numericOrdering",
    "suppressContractions",
    "optimize",
    "reorder",
    "import",
    "maxVariable",
];

/// Logical positions usable as a reset or relation operand.
const POSITION_OPTIONS: &[&str] = &["first", "last"];

pub fn tokenize(rules: &str) -> Result<Vec<Spanned>, RuleError> {
    let chars: Vec<char> = rules.chars().collect();
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut text_start: Option<usize> = None;
    let mut i = 0;

    fn flush(tokens: &mut Vec<Spanned>, text: &mut String, start: &mut Option<usize>, end: usize) {
        if let Some(s) = start.take() {
            tokens.push(Spanned {
                start: s,
                end,
                token: Token::Text(std::mem::take(text)),
            });
        }
    }

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => i += 1,
            '#' => {
                flush(&mut tokens, &mut text, &mut text_start, i);
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '&' => {
                flush(&mut tokens, &mut text, &mut text_start, i);
                tokens.push(Spanned { start: i, end: i + 1, token: Token::Reset });
                i += 1;
            }
            '<' | '=' | ';' | ',' => {
                flush(&mut tokens, &mut text, &mut text_start, i);
                let start = i;
                let strength = match c {
                    '<' => {
                        let mut count = 0;
                        while i < chars.len() && chars[i] == '<' && count < 4 {
                            count += 1;
                            i += 1;
                        }
                        match count {
                            1 => Strength::Primary,
                            2 => Strength::Secondary,
                            3 => Strength::Tertiary,
                            _ => Strength::Quaternary,
                        }
                    }
                    '=' => {
                        i += 1;
                        Strength::Identical
                    }
                    ';' => {
                        i += 1;
                        Strength::Secondary
                    }
                    _ => {
                        i += 1;
                        Strength::Tertiary
                    }
                };
                let starred = i < chars.len() && chars[i] == '*' && c != ';' && c != ',';
                if starred {
                    i += 1;
                }
                tokens.push(Spanned {
                    start,
                    end: i,
                    token: Token::Relation { strength, starred },
                });
            }
            '[' => {
                flush(&mut tokens, &mut text, &mut text_start, i);
                let start = i;
                let mut depth = 0;
                let mut inner = String::new();
                loop {
                    let Some(&ch) = chars.get(i) else {
                        return Err(RuleError::UnterminatedOption { offset: start });
                    };
                    i += 1;
                    match ch {
                        '[' => {
                            depth += 1;
                            if depth > 1 {
                                inner.push(ch);
                            }
                        }
                        ']' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                            inner.push(ch);
                        }
                        _ => inner.push(ch),
                    }
                }
                tokens.push(Spanned {
                    start,
                    end: i,
                    token: Token::Option(inner.trim().to_string()),
                });
            }
            '|' | '/' => {
                flush(&mut tokens, &mut text, &mut text_start, i);
                let token = if c == '|' { Token::Context } else { Token::Extension };
                tokens.push(Spanned { start: i, end: i + 1, token });
                i += 1;
            }
            '\'' => {
                text_start.get_or_insert(i);
                let start = i;
                i += 1;
                if chars.get(i) == Some(&'\'') {
                    text.push('\'');
                    i += 1;
                    continue;
                }
                loop {
                    match chars.get(i) {
                        None => return Err(RuleError::UnterminatedQuote { offset: start }),
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            text.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(&ch) => {
                            text.push(ch);
                            i += 1;
                        }
                    }
                }
            }
            '\\' => {
                text_start.get_or_insert(i);
                let (ch, consumed) = read_escape(&chars, i)?;
                text.push(ch);
                i += consumed;
            }
            c if c.is_ascii() && !c.is_ascii_alphanumeric() => {
                return Err(RuleError::UnexpectedCharacter { ch: c, offset: i });
            }
            c => {
                text_start.get_or_insert(i);
                text.push(c);
                i += 1;
            }
        }
    }
    flush(&mut tokens, &mut text, &mut text_start, chars.len());
    Ok(tokens)
}

/// Reads `\uXXXX`, `\UXXXXXXXX` or `\c` starting at `at`; returns the char and
/// the number of chars consumed.
fn read_escape(chars: &[char], at: usize) -> Result<(char, usize), RuleError> {
    let hex = |len: usize| -> Result<(char, usize), RuleError> {
        let digits: String = chars.iter().skip(at + 2).take(len).collect();
        if digits.chars().count() != len {
            return Err(RuleError::InvalidEscape { offset: at });
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .map(|ch| (ch, len + 2))
            .ok_or(RuleError::InvalidEscape { offset: at })
    };
    match chars.get(at + 1) {
        Some('u') => hex(4),
        Some('U') => hex(8),
        Some(&ch) => Ok((ch, 2)),
        None => Err(RuleError::InvalidEscape { offset: at }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    NeedResetOperand,
    NeedOperand,
    InOperand,
    NeedModifierText,
}

/// Checks that `rules` is well-formed ICU tailoring text.
pub fn validate(rules: &str) -> Result<(), RuleError> {
    let tokens = tokenize(rules)?;
    let mut state = State::Start;
    let mut seen_reset = false;

    for Spanned { start, token, .. } in &tokens {
        let start = *start;
        state = match (token, state) {
            (Token::Option(opt), State::NeedResetOperand) if option_keyword(opt) == "before" => {
                State::NeedResetOperand
            }
            (Token::Option(opt), State::NeedResetOperand | State::NeedOperand)
                if POSITION_OPTIONS.contains(&option_keyword(opt)) =>
            {
                State::InOperand
            }
            (Token::Option(opt), State::Start | State::InOperand) => {
                if !TOP_LEVEL_OPTIONS.contains(&option_keyword(opt)) {
                    return Err(RuleError::UnknownOption(opt.clone()));
                }
                state
            }
            (Token::Option(opt), _) => return Err(RuleError::UnknownOption(opt.clone())),
            (Token::Reset, State::Start | State::InOperand) => {
                seen_reset = true;
                State::NeedResetOperand
            }
            (Token::Relation { .. }, State::InOperand) if seen_reset => State::NeedOperand,
            (Token::Relation { .. }, State::Start) => {
                return Err(RuleError::RelationBeforeReset { offset: start });
            }
            (Token::Text(_), State::NeedResetOperand | State::NeedOperand | State::NeedModifierText) => {
                State::InOperand
            }
            (Token::Text(_), _) => return Err(RuleError::DetachedText { offset: start }),
            (Token::Context | Token::Extension, State::InOperand) if seen_reset => {
                State::NeedModifierText
            }
            _ => return Err(RuleError::MissingOperand { offset: start }),
        };
    }

    match state {
        State::Start | State::InOperand => Ok(()),
        _ => Err(RuleError::MissingOperand {
            offset: rules.chars().count(),
        }),
    }
}

fn option_keyword(option: &str) -> &str {
    option.split_whitespace().next().unwrap_or("")
}

/// Quotes `text` so that it reads back as a single ICU operand.
pub fn quote_operand(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if !is_xml_char(ch) {
            let code = ch as u32;
            if code > 0xFFFF {
                out.push_str(&format!("\\U{:08X}", code));
            } else {
                out.push_str(&format!("\\u{:04X}", code));
            }
        } else if ch.is_whitespace() || (ch.is_ascii() && !ch.is_ascii_alphanumeric()) {
            out.push('\\');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}

/// Characters allowed in XML 1.0 content that survive parsing unchanged.
/// Carriage returns are left out since parsers normalize line ends.
pub fn is_xml_char(ch: char) -> bool {
    matches!(ch as u32,
        0x9 | 0xA | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF)
}

/// Replaces characters XML cannot carry with ICU escapes, leaving the rest as is.
pub fn escape_non_xml_chars(rules: &str) -> String {
    let mut out = String::with_capacity(rules.len());
    for ch in rules.chars() {
        if is_xml_char(ch) {
            out.push(ch);
        } else {
            out.push_str(&format!("\\u{:04X}", ch as u32));
        }
    }
    out
}
