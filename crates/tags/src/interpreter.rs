use ldml_types::Subtags;
use ldml_types::tag::is_private_use_language;

/// Language subtag used for legacy private-use languages after conversion.
pub const PRIVATE_USE_LANGUAGE: &str = "qaa";

/// The result of interpreting a literal set of subtags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// The canonical subtags.
    pub subtags: Subtags,
    /// True when the legacy private-use conversion was applied.
    pub legacy: bool,
}

impl Interpretation {
    pub fn tag(&self) -> String {
        self.subtags.to_tag()
    }

    /// Whether re-encoding the literal input yields `tag`. Tags compare
    /// case-insensitively.
    pub fn round_trips_to(&self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }
}

/// Interprets literal subtags, converting legacy private-use languages.
pub fn interpret(literal: &Subtags) -> Interpretation {
    if !is_private_use_language(&literal.language) {
        return Interpretation {
            subtags: literal.clone(),
            legacy: false,
        };
    }
    let subtags = convert_private_use(literal);
    log::debug!(
        "Converted legacy private-use tag '{}' to '{}'",
        literal.to_tag(),
        subtags.to_tag()
    );
    Interpretation {
        subtags,
        legacy: true,
    }
}

/// Convenience form of [`interpret`] over four separate strings.
pub fn normalize(language: &str, script: &str, region: &str, variant: &str) -> Interpretation {
    interpret(&Subtags::new(language, script, region, variant))
}

fn convert_private_use(literal: &Subtags) -> Subtags {
    let mut script = literal.script.clone();
    let mut region = literal.region.clone();

    // The first part after "x" is the private language code itself; later parts
    // may be a script or region that older tooling folded into the language.
    let mut private_use: Vec<String> = Vec::new();
    for (i, part) in literal
        .language
        .split('-')
        .skip(1)
        .filter(|p| !p.is_empty())
        .enumerate()
    {
        if i > 0 && script.is_empty() && is_script_like(part) {
            script = title_case(part);
        } else if i > 0 && region.is_empty() && is_region_like(part) {
            region = part.to_ascii_uppercase();
        } else {
            push_unique(&mut private_use, part);
        }
    }

    let (registered, variant_private) = split_variant(&literal.variant);
    for part in variant_private {
        push_unique(&mut private_use, part);
    }

    let mut variant_parts: Vec<&str> = registered;
    if !private_use.is_empty() {
        variant_parts.push("x");
        variant_parts.extend(private_use.iter().map(String::as_str));
    }

    Subtags {
        language: PRIVATE_USE_LANGUAGE.to_string(),
        script,
        region,
        variant: variant_parts.join("-"),
    }
}

/// Splits a variant into registered variants and the parts after an `x` singleton.
fn split_variant(variant: &str) -> (Vec<&str>, Vec<&str>) {
    let mut registered = Vec::new();
    let mut private = Vec::new();
    let mut in_private = false;
    for part in variant.split('-').filter(|p| !p.is_empty()) {
        if !in_private && part.eq_ignore_ascii_case("x") {
            in_private = true;
        } else if in_private {
            private.push(part);
        } else {
            registered.push(part);
        }
    }
    (registered, private)
}

fn push_unique(parts: &mut Vec<String>, part: &str) {
    if !parts.iter().any(|p| p.eq_ignore_ascii_case(part)) {
        parts.push(part.to_string());
    }
}

fn is_script_like(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region_like(s: &str) -> bool {
    (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
        || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn title_case(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
