//! Canonical sibling order of LDML elements.
//!
//! The merge copies old content forward until it reaches an element that sorts
//! at or after the section being regenerated, so the order only has to be
//! consistent among siblings. One global rank table covers every level.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;

/// A total order over element names, injected into the merge cursor.
pub trait ElementOrder: Send + Sync + Debug {
    fn compare(&self, a: &str, b: &str) -> Ordering;

    /// Whether `name` has its own place in the order. Unknown names sort with
    /// the trailing `special` elements.
    fn is_known(&self, name: &str) -> bool;
}

static CANONICAL_ORDER: &[&str] = &[
    "ldml",
    "alias",
    // identity
    "identity",
    "version",
    "generation",
    "language",
    "script",
    "territory",
    "variant",
    "localeDisplayNames",
    // layout
    "layout",
    "orientation",
    "inList",
    "inText",
    "contextTransforms",
    "characters",
    "delimiters",
    "measurement",
    "dates",
    "numbers",
    "units",
    "listPatterns",
    // collations
    "collations",
    "default",
    "collation",
    "base",
    "import",
    "settings",
    "suppress_contractions",
    "optimize",
    "cr",
    "rules",
    "posix",
    "segmentations",
    "rbnf",
    "metadata",
    "references",
    "special",
];

static RANKS: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    CANONICAL_ORDER
        .iter()
        .enumerate()
        .map(|(rank, name)| (*name, rank))
        .collect()
});

fn rank(name: &str) -> usize {
    RANKS
        .get(name)
        .copied()
        .unwrap_or(CANONICAL_ORDER.len() - 1)
}

/// The LDML canonical order.
#[derive(Debug, Default, Clone, Copy)]
pub struct LdmlElementOrder;

impl ElementOrder for LdmlElementOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        rank(a).cmp(&rank(b))
    }

    fn is_known(&self, name: &str) -> bool {
        RANKS.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_sections() {
        let order = LdmlElementOrder;
        assert_eq!(order.compare("identity", "layout"), Ordering::Less);
        assert_eq!(order.compare("layout", "collations"), Ordering::Less);
        assert_eq!(order.compare("collations", "special"), Ordering::Less);
        assert_eq!(order.compare("special", "identity"), Ordering::Greater);
    }

    #[test]
    fn test_identity_children() {
        let order = LdmlElementOrder;
        let names = ["version", "generation", "language", "script", "territory", "variant", "special"];
        for pair in names.windows(2) {
            assert_eq!(order.compare(pair[0], pair[1]), Ordering::Less, "{:?}", pair);
        }
    }

    #[test]
    fn test_unknown_names_trail_with_special() {
        let order = LdmlElementOrder;
        assert!(!order.is_known("fw:windowsLCID"));
        assert_eq!(order.compare("unknownThing", "special"), Ordering::Equal);
        assert_eq!(order.compare("collations", "unknownThing"), Ordering::Less);
        assert_eq!(order.compare("a", "b"), Ordering::Equal);
    }
}
