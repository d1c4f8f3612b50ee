//! Forward-only reader over a previously written document.

use crate::error::MergeError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use std::io::BufRead;

/// Streams owned events with one event of lookahead.
///
/// Whitespace-only text between elements is dropped, since the writer
/// re-indents everything it copies. Whitespace next to an entity reference, or
/// making up the whole content of an element, is content and is kept.
pub struct SourceReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    peeked: Option<Event<'static>>,
    held: Option<Event<'static>>,
    after_ref: bool,
    after_start: bool,
}

impl<R: BufRead> SourceReader<R> {
    pub fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            peeked: None,
            held: None,
            after_ref: false,
            after_start: false,
        }
    }

    pub fn peek(&mut self) -> Result<&Event<'static>, MergeError> {
        let event = match self.peeked.take() {
            Some(event) => event,
            None => self.next_significant()?,
        };
        let event: &Event<'static> = self.peeked.insert(event);
        Ok(event)
    }

    pub fn next(&mut self) -> Result<Event<'static>, MergeError> {
        match self.peeked.take() {
            Some(event) => Ok(event),
            None => self.next_significant(),
        }
    }

    /// Consumes the next node, element subtree included, passing every event
    /// to `emit`.
    pub fn take_node<F>(&mut self, mut emit: F) -> Result<(), MergeError>
    where
        F: FnMut(Event<'static>) -> Result<(), MergeError>,
    {
        let start = match self.next()? {
            Event::Start(start) => start,
            Event::Eof | Event::End(_) => return Ok(()),
            other => return emit(other),
        };
        let name = element_name(&start);
        emit(Event::Start(start))?;
        let mut depth = 1usize;
        while depth > 0 {
            let event = self.next()?;
            match &event {
                Event::Start(_) => depth += 1,
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(MergeError::UnexpectedEof(name)),
                _ => {}
            }
            emit(event)?;
        }
        Ok(())
    }

    pub fn skip_node(&mut self) -> Result<(), MergeError> {
        self.take_node(|_| Ok(()))
    }

    fn read_raw(&mut self) -> Result<Event<'static>, MergeError> {
        if let Some(event) = self.held.take() {
            return Ok(event);
        }
        self.buf.clear();
        Ok(self.reader.read_event_into(&mut self.buf)?.into_owned())
    }

    fn next_significant(&mut self) -> Result<Event<'static>, MergeError> {
        loop {
            let event = self.read_raw()?;
            if let Event::Text(text) = &event {
                if is_blank(text) && !self.after_ref {
                    let following = self.read_raw()?;
                    let keep = matches!(following, Event::GeneralRef(_))
                        || (self.after_start && matches!(following, Event::End(_)));
                    self.held = Some(following);
                    if !keep {
                        continue;
                    }
                }
            }
            self.after_ref = matches!(event, Event::GeneralRef(_));
            self.after_start = matches!(event, Event::Start(_));
            return Ok(event);
        }
    }
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.as_ref().iter().all(|b| b.is_ascii_whitespace())
}

/// The qualified name of an element, prefix included.
pub fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

pub fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// The unescaped value of attribute `key`, if present.
pub fn attribute(start: &BytesStart<'_>, key: &str) -> Result<Option<String>, MergeError> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            let raw = std::str::from_utf8(&attr.value)?;
            return Ok(Some(quick_xml::escape::unescape(raw)?.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(xml: &str) -> Vec<String> {
        let mut source = SourceReader::new(xml.as_bytes());
        let mut out = Vec::new();
        loop {
            match source.next().unwrap() {
                Event::Start(e) => out.push(format!("<{}>", element_name(&e))),
                Event::Empty(e) => out.push(format!("<{}/>", element_name(&e))),
                Event::End(e) => out.push(format!("</{}>", String::from_utf8_lossy(e.name().as_ref()))),
                Event::Text(t) => out.push(String::from_utf8_lossy(&t).into_owned()),
                Event::GeneralRef(r) => out.push(format!("&{};", String::from_utf8_lossy(&r))),
                Event::Eof => break,
                _ => out.push("?".into()),
            }
        }
        out
    }

    #[test]
    fn test_blank_text_is_dropped() {
        assert_eq!(
            names("<a>\n\t<b/>\n</a>"),
            vec!["<a>", "<b/>", "</a>"]
        );
    }

    #[test]
    fn test_blank_text_between_references_is_kept() {
        assert_eq!(
            names("<a>&amp; &lt;</a>"),
            vec!["<a>", "&amp;", " ", "&lt;", "</a>"]
        );
    }

    #[test]
    fn test_blank_text_as_whole_content_is_kept() {
        assert_eq!(
            names("<a>\n\t<b> </b>\n</a>"),
            vec!["<a>", "<b>", " ", "</b>", "</a>"]
        );
    }

    #[test]
    fn test_skip_node_consumes_subtree() {
        let mut source = SourceReader::new("<r><a><b>x</b></a><c/></r>".as_bytes());
        source.next().unwrap();
        source.skip_node().unwrap();
        match source.peek().unwrap() {
            Event::Empty(e) => assert_eq!(element_name(e), "c"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let mut source = SourceReader::new(r#"<a type="x&amp;y" other="1"/>"#.as_bytes());
        let Event::Empty(start) = source.next().unwrap() else {
            panic!("expected empty element");
        };
        assert_eq!(attribute(&start, "type").unwrap().as_deref(), Some("x&y"));
        assert_eq!(attribute(&start, "missing").unwrap(), None);
    }
}
