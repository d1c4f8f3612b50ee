//! Vendor namespaces whose `special` blocks the mapper regenerates itself.

use once_cell::sync::Lazy;
use quick_xml::events::BytesStart;

pub const PALASO: &str = "urn://palaso.org/ldmlExtensions/v1";
pub const PALASO2: &str = "urn://palaso.org/ldmlExtensions/v2";
/// Read for `windowsLCID`, but never regenerated: blocks in this namespace are
/// carried through as foreign content.
pub const FIELDWORKS: &str = "urn://fieldworks.sil.org/ldmlExtensions/v1";

#[derive(Debug)]
pub struct NamespaceTable {
    entries: Vec<(&'static str, &'static str)>,
}

static KNOWN: Lazy<NamespaceTable> = Lazy::new(|| NamespaceTable {
    entries: vec![("palaso", PALASO), ("palaso2", PALASO2)],
});

impl NamespaceTable {
    /// The namespaces the mapper writes.
    pub fn known() -> &'static NamespaceTable {
        &KNOWN
    }

    pub fn uri(&self, prefix: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, uri)| *uri)
    }

    pub fn prefix(&self, uri: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, u)| *u == uri)
            .map(|(prefix, _)| *prefix)
    }

    pub fn contains_uri(&self, uri: &str) -> bool {
        self.prefix(uri).is_some()
    }

    /// True when `start` declares one of the table's namespaces.
    pub fn declared_on(&self, start: &BytesStart<'_>) -> bool {
        declared_uris(start).iter().any(|uri| self.contains_uri(uri))
    }
}

/// URIs of the `xmlns` and `xmlns:*` declarations on a start tag.
pub fn declared_uris(start: &BytesStart<'_>) -> Vec<String> {
    start
        .attributes()
        .flatten()
        .filter(|attr| {
            let key = attr.key.as_ref();
            key == b"xmlns" || key.starts_with(b"xmlns:")
        })
        .filter_map(|attr| {
            std::str::from_utf8(&attr.value)
                .ok()
                .and_then(|raw| quick_xml::escape::unescape(raw).ok())
                .map(|uri| uri.into_owned())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let table = NamespaceTable::known();
        assert_eq!(table.uri("palaso"), Some(PALASO));
        assert_eq!(table.prefix(PALASO2), Some("palaso2"));
        assert!(!table.contains_uri(FIELDWORKS));
    }

    #[test]
    fn test_declared_on_start_tag() {
        let table = NamespaceTable::known();
        let palaso = BytesStart::new("special").with_attributes([("xmlns:palaso", PALASO)]);
        let fw = BytesStart::new("special").with_attributes([("xmlns:fw", FIELDWORKS)]);
        let renamed = BytesStart::new("special").with_attributes([("xmlns:p", PALASO)]);
        assert!(table.declared_on(&palaso));
        assert!(table.declared_on(&renamed));
        assert!(!table.declared_on(&fw));
        assert!(!table.declared_on(&BytesStart::new("special")));
    }
}
