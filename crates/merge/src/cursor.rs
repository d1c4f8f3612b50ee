//! The merge cursor: a read position in the prior document moving in lock-step
//! with the sink that builds the new one.
//!
//! Every operation works on the siblings at the cursor's current nesting level.
//! Old content is either copied to the sink untouched, skipped because it is
//! about to be regenerated, or entered so that its children can be merged in
//! turn. Without a prior document every operation is a no-op.

use crate::error::MergeError;
use crate::namespaces::{NamespaceTable, declared_uris};
use crate::order::{ElementOrder, LdmlElementOrder};
use crate::sink::XmlSink;
use crate::source::{SourceReader, element_name, local_name};
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use std::cmp::Ordering;
use std::io::{BufRead, Write};

/// What [`MergeCursor::enter`] found in the prior document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entered {
    /// The element was there and had children; the cursor is now inside it.
    Children,
    /// The element was there but empty; it has been consumed.
    Empty,
    /// The element was not next in the prior document.
    Absent,
}

impl Entered {
    pub fn is_present(&self) -> bool {
        !matches!(self, Entered::Absent)
    }
}

enum Next {
    Element(BytesStart<'static>),
    Node,
    End,
}

pub struct MergeCursor<R: BufRead, W: Write> {
    source: Option<SourceReader<R>>,
    sink: XmlSink<W>,
    order: Box<dyn ElementOrder>,
    namespaces: &'static NamespaceTable,
    /// Last anchor passed to `copy_until` at each open level of the prior document.
    anchors: Vec<Option<String>>,
}

impl<R: BufRead, W: Write> MergeCursor<R, W> {
    pub fn new(source: Option<R>, sink: XmlSink<W>) -> Self {
        Self {
            source: source.map(SourceReader::new),
            sink,
            order: Box::new(LdmlElementOrder),
            namespaces: NamespaceTable::known(),
            anchors: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: impl ElementOrder + 'static) -> Self {
        self.order = Box::new(order);
        self
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    pub fn sink(&mut self) -> &mut XmlSink<W> {
        &mut self.sink
    }

    /// Skips the prolog of the prior document and enters its root element,
    /// which must be named `root`. Returns the old root start tag, if any.
    pub fn open_root(&mut self, root: &str) -> Result<Option<BytesStart<'static>>, MergeError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };
        loop {
            match source.next()? {
                Event::Start(start) => {
                    check_root(&start, root)?;
                    self.anchors.push(None);
                    return Ok(Some(start));
                }
                Event::Empty(start) => {
                    check_root(&start, root)?;
                    self.source = None;
                    return Ok(Some(start));
                }
                Event::Eof => {
                    debug!("Prior document is empty");
                    self.source = None;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }

    /// Name of the next element at the current level, if the next node is an element.
    pub fn next_element(&mut self) -> Result<Option<String>, MergeError> {
        Ok(match self.peek()? {
            Next::Element(start) => Some(element_name(&start)),
            _ => None,
        })
    }

    pub fn is_on(&mut self, name: &str) -> Result<bool, MergeError> {
        Ok(self.next_element()?.as_deref() == Some(name))
    }

    /// Value of attribute `key` on the next element, when that element is `name`.
    pub fn attribute_of(&mut self, name: &str, key: &str) -> Result<Option<String>, MergeError> {
        match self.peek()? {
            Next::Element(start) if element_name(&start) == name => {
                crate::source::attribute(&start, key)
            }
            _ => Ok(None),
        }
    }

    /// True when the next element is a `special` block declaring `uri`.
    pub fn is_on_special(&mut self, uri: &str) -> Result<bool, MergeError> {
        Ok(match self.peek()? {
            Next::Element(start) if element_name(&start) == "special" => {
                declared_uris(&start).iter().any(|u| u == uri)
            }
            _ => false,
        })
    }

    /// Copies siblings to the sink until the next element is `anchor` or sorts
    /// after it, or the level ends.
    pub fn copy_until(&mut self, anchor: &str) -> Result<(), MergeError> {
        if self.source.is_none() {
            return Ok(());
        }
        loop {
            match self.peek()? {
                Next::End => break,
                Next::Element(start) => {
                    let name = element_name(&start);
                    if name == anchor || self.order.compare(&name, anchor) != Ordering::Less {
                        break;
                    }
                    self.check_order(&name);
                    self.copy_node()?;
                }
                Next::Node => self.copy_node()?,
            }
        }
        if let Some(last) = self.anchors.last_mut() {
            *last = Some(anchor.to_string());
        }
        Ok(())
    }

    /// Copies every remaining sibling, then consumes the end of the enclosing
    /// element. The sink's own element is left open.
    pub fn copy_remainder(&mut self) -> Result<(), MergeError> {
        if self.source.is_none() {
            return Ok(());
        }
        loop {
            match self.peek()? {
                Next::End => break,
                Next::Element(start) => {
                    self.check_order(&element_name(&start));
                    self.copy_node()?;
                }
                Next::Node => self.copy_node()?,
            }
        }
        self.leave()
    }

    /// Discards every remaining sibling and the end of the enclosing element.
    pub fn skip_remainder(&mut self) -> Result<(), MergeError> {
        if self.source.is_none() {
            return Ok(());
        }
        while !matches!(self.peek()?, Next::End) {
            self.skip_node()?;
        }
        self.leave()
    }

    /// Copies the remaining siblings, dropping every `special` block in a
    /// namespace the mapper writes itself. Other elements are copied wherever
    /// they sit, so a stale vendor block after an unknown element is still dropped.
    pub fn copy_known_or_foreign_specials(&mut self) -> Result<(), MergeError> {
        if self.source.is_none() {
            return Ok(());
        }
        loop {
            match self.peek()? {
                Next::End => break,
                Next::Element(start) if element_name(&start) == "special" => {
                    if self.namespaces.declared_on(&start) {
                        debug!("Dropping known vendor special {:?}", declared_uris(&start));
                        self.skip_node()?;
                    } else {
                        self.copy_node()?;
                    }
                }
                Next::Element(start) => {
                    self.check_order(&element_name(&start));
                    self.copy_node()?;
                }
                Next::Node => self.copy_node()?,
            }
        }
        Ok(())
    }

    /// Discards siblings until the next element is `name` (returns true) or
    /// sorts after it, or the level ends (returns false).
    pub fn find(&mut self, name: &str) -> Result<bool, MergeError> {
        while self.take_until(name)?.is_some() {}
        self.is_on(name)
    }

    /// Consumes the next sibling if it is a node that sorts before `anchor`,
    /// returning its start tag when it is an element. Non-element nodes are
    /// discarded on the way.
    pub fn take_until(&mut self, anchor: &str) -> Result<Option<BytesStart<'static>>, MergeError> {
        if self.source.is_none() {
            return Ok(None);
        }
        loop {
            match self.peek()? {
                Next::End => return Ok(None),
                Next::Node => self.skip_node()?,
                Next::Element(start) => {
                    let name = element_name(&start);
                    if name == anchor || self.order.compare(&name, anchor) != Ordering::Less {
                        return Ok(None);
                    }
                    self.skip_node()?;
                    return Ok(Some(start));
                }
            }
        }
    }

    /// Copies the first remaining child whose local name is `local`, discarding
    /// the children before it. Returns whether one was found.
    pub fn copy_child_named(&mut self, local: &str) -> Result<bool, MergeError> {
        if self.source.is_none() {
            return Ok(false);
        }
        loop {
            match self.peek()? {
                Next::End => return Ok(false),
                Next::Element(start) if local_name(&start) == local => {
                    self.copy_node()?;
                    return Ok(true);
                }
                _ => self.skip_node()?,
            }
        }
    }

    /// Consumes the next element if it is `name`.
    pub fn enter(&mut self, name: &str) -> Result<Entered, MergeError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(Entered::Absent);
        };
        let matches = match source.peek()? {
            Event::Start(start) | Event::Empty(start) => element_name(start) == name,
            _ => false,
        };
        if !matches {
            return Ok(Entered::Absent);
        }
        match source.next()? {
            Event::Start(_) => {
                self.anchors.push(None);
                Ok(Entered::Children)
            }
            _ => Ok(Entered::Empty),
        }
    }

    /// Discards the next sibling node.
    pub fn skip_node(&mut self) -> Result<(), MergeError> {
        match self.source.as_mut() {
            Some(source) => source.skip_node(),
            None => Ok(()),
        }
    }

    /// Copies the next sibling node to the sink.
    pub fn copy_node(&mut self) -> Result<(), MergeError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(());
        };
        let sink = &mut self.sink;
        source.take_node(|event| sink.raw(event))
    }

    pub fn finish(self) -> W {
        self.sink.into_inner()
    }

    fn peek(&mut self) -> Result<Next, MergeError> {
        let Some(source) = self.source.as_mut() else {
            return Ok(Next::End);
        };
        Ok(match source.peek()? {
            Event::Start(start) | Event::Empty(start) => Next::Element(start.clone()),
            Event::End(_) | Event::Eof => Next::End,
            _ => Next::Node,
        })
    }

    fn leave(&mut self) -> Result<(), MergeError> {
        if let Some(source) = self.source.as_mut() {
            if let Event::End(_) = source.peek()? {
                source.next()?;
            }
        }
        self.anchors.pop();
        Ok(())
    }

    fn check_order(&self, name: &str) {
        if name == "special" || !self.order.is_known(name) {
            return;
        }
        if let Some(Some(previous)) = self.anchors.last() {
            if self.order.compare(name, previous) != Ordering::Greater {
                warn!(
                    "<{}> appears after <{}> in the prior document; copying it as trailing content",
                    name, previous
                );
            }
        }
    }
}

fn check_root(start: &BytesStart<'_>, expected: &str) -> Result<(), MergeError> {
    let found = element_name(start);
    if found == expected {
        Ok(())
    } else {
        Err(MergeError::UnexpectedRoot {
            expected: expected.to_string(),
            found,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::PALASO;
    use crate::sink::element;

    type Cursor<'a> = MergeCursor<&'a [u8], Vec<u8>>;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn cursor(old: Option<&str>) -> Cursor<'_> {
        MergeCursor::new(old.map(str::as_bytes), XmlSink::new(Vec::new()))
    }

    fn output(cursor: Cursor<'_>) -> String {
        String::from_utf8(cursor.finish()).unwrap()
    }

    #[test]
    fn test_no_source_is_pure_generation() {
        let mut c = cursor(None);
        assert_eq!(c.open_root("ldml").unwrap(), None);
        c.sink().start(element("ldml", [])).unwrap();
        c.copy_until("identity").unwrap();
        assert_eq!(c.enter("identity").unwrap(), Entered::Absent);
        c.sink().empty(element("identity", [])).unwrap();
        c.copy_known_or_foreign_specials().unwrap();
        c.copy_remainder().unwrap();
        c.sink().end().unwrap();
        assert_eq!(output(c), "<ldml><identity/></ldml>");
    }

    #[test]
    fn test_copy_until_stops_at_anchor_or_later_element() {
        init_logger();
        let old = "<ldml><alias source='x'/><identity/><collations/><special xmlns:fw='urn:fw'/></ldml>";
        let mut c = cursor(Some(old));
        c.open_root("ldml").unwrap();
        c.copy_until("identity").unwrap();
        assert!(c.is_on("identity").unwrap());
        c.skip_node().unwrap();
        c.copy_until("layout").unwrap();
        assert!(c.is_on("collations").unwrap());
        c.copy_until("special").unwrap();
        assert!(c.is_on("special").unwrap());
        assert_eq!(output(c), "<alias source='x'/><collations/>");
    }

    #[test]
    fn test_known_specials_dropped_foreign_copied() {
        let old = format!(
            "<ldml><special xmlns:palaso='{}'><palaso:version value='2'/></special>\
             <special xmlns:fw='urn:fw'><fw:windowsLCID value='1033'/></special><trailer/></ldml>",
            PALASO
        );
        let mut c = cursor(Some(&old));
        c.open_root("ldml").unwrap();
        c.copy_known_or_foreign_specials().unwrap();
        assert_eq!(c.next_element().unwrap(), None);
        c.copy_remainder().unwrap();
        assert_eq!(
            output(c),
            "<special xmlns:fw='urn:fw'><fw:windowsLCID value='1033'/></special><trailer/>"
        );
    }

    #[test]
    fn test_known_special_after_unknown_element_is_dropped() {
        let old = format!(
            "<ldml><personNames/><special xmlns:palaso='{}'><palaso:languageName value='Old'/></special></ldml>",
            PALASO
        );
        let mut c = cursor(Some(&old));
        c.open_root("ldml").unwrap();
        c.copy_until("special").unwrap();
        assert!(c.is_on("personNames").unwrap());
        c.copy_known_or_foreign_specials().unwrap();
        c.copy_remainder().unwrap();
        assert_eq!(output(c), "<personNames/>");
    }

    #[test]
    fn test_enter_and_copy_remainder() {
        let old = "<ldml><identity><version number='1'/><language type='en'/><special><x/></special></identity></ldml>";
        let mut c = cursor(Some(old));
        c.open_root("ldml").unwrap();
        assert_eq!(c.enter("identity").unwrap(), Entered::Children);
        let language = loop {
            match c.take_until("special").unwrap() {
                Some(start) if element_name(&start) == "language" => break start,
                Some(_) => continue,
                None => panic!("language not found"),
            }
        };
        assert_eq!(crate::source::attribute(&language, "type").unwrap().as_deref(), Some("en"));
        c.copy_remainder().unwrap();
        assert_eq!(c.next_element().unwrap(), None);
        assert_eq!(output(c), "<special><x/></special>");
    }

    #[test]
    fn test_find_discards_until_name() {
        let old = "<ldml><layout><alias/><orientation characters='right-to-left'/><inList casing='x'/></layout></ldml>";
        let mut c = cursor(Some(old));
        c.open_root("ldml").unwrap();
        assert_eq!(c.enter("layout").unwrap(), Entered::Children);
        assert!(c.find("orientation").unwrap());
        c.skip_node().unwrap();
        c.copy_remainder().unwrap();
        assert_eq!(output(c), "<inList casing='x'/>");
    }

    #[test]
    fn test_copy_child_named_matches_local_name() {
        let old = format!(
            "<ldml><special xmlns:palaso='{}'><palaso:abbreviation value='a'/><palaso:languageName value='L'/></special></ldml>",
            PALASO
        );
        let mut c = cursor(Some(&old));
        c.open_root("ldml").unwrap();
        assert!(c.is_on_special(PALASO).unwrap());
        assert_eq!(c.enter("special").unwrap(), Entered::Children);
        assert!(!c.copy_child_named("zzz").unwrap());
        assert_eq!(output(c), "");

        let mut c = cursor(Some(&old));
        c.open_root("ldml").unwrap();
        c.enter("special").unwrap();
        assert!(c.copy_child_named("languageName").unwrap());
        c.skip_remainder().unwrap();
        assert_eq!(output(c), "<palaso:languageName value='L'/>");
    }

    #[derive(Debug)]
    struct Alphabetical;

    impl ElementOrder for Alphabetical {
        fn compare(&self, a: &str, b: &str) -> Ordering {
            a.cmp(b)
        }

        fn is_known(&self, _name: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_injected_order() {
        let mut c = cursor(Some("<r><a/><c/><e/></r>")).with_order(Alphabetical);
        c.open_root("r").unwrap();
        c.copy_until("d").unwrap();
        assert!(c.is_on("e").unwrap());
        assert_eq!(output(c), "<a/><c/>");
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let mut c = cursor(Some("<?xml version='1.0'?><notldml/>"));
        assert!(matches!(
            c.open_root("ldml"),
            Err(MergeError::UnexpectedRoot { .. })
        ));
    }

    #[test]
    fn test_foreign_content_keeps_entities_and_cdata() {
        let old = "<ldml><special xmlns:x='urn:x'><x:a>1 &lt; 2 &amp; <![CDATA[<raw>]]></x:a></special></ldml>";
        let mut c = cursor(Some(old));
        c.open_root("ldml").unwrap();
        c.copy_remainder().unwrap();
        assert_eq!(
            output(c),
            "<special xmlns:x='urn:x'><x:a>1 &lt; 2 &amp; <![CDATA[<raw>]]></x:a></special>"
        );
    }
}
