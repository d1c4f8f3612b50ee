//! Indenting XML writer with deferred start tags.

use crate::error::MergeError;
use quick_xml::Writer;
use quick_xml::events::{BytesCData, BytesDecl, BytesStart, BytesText, Event};
use std::io::Write;

struct OpenElement {
    start: BytesStart<'static>,
    written: bool,
}

/// Writes the new document.
///
/// A start tag opened with [`XmlSink::start_lazy`] is held back until something
/// is written inside it. Closing it with [`XmlSink::end_if_nonempty`] while it is
/// still held back drops the element entirely; [`XmlSink::end`] writes it as an
/// empty element instead.
pub struct XmlSink<W: Write> {
    writer: Writer<W>,
    open: Vec<OpenElement>,
}

impl<W: Write> XmlSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: Writer::new(inner),
            open: Vec::new(),
        }
    }

    pub fn with_indent(inner: W, indent_char: u8, indent_size: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(inner, indent_char, indent_size),
            open: Vec::new(),
        }
    }

    pub fn declaration(&mut self) -> Result<(), MergeError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(())
    }

    pub fn start(&mut self, start: BytesStart<'static>) -> Result<(), MergeError> {
        self.flush_pending()?;
        self.writer.write_event(Event::Start(start.borrow()))?;
        self.open.push(OpenElement { start, written: true });
        Ok(())
    }

    pub fn start_lazy(&mut self, start: BytesStart<'static>) {
        self.open.push(OpenElement {
            start,
            written: false,
        });
    }

    pub fn end(&mut self) -> Result<(), MergeError> {
        let Some(open) = self.open.pop() else {
            return Ok(());
        };
        if open.written {
            self.writer.write_event(Event::End(open.start.to_end()))?;
        } else {
            self.flush_pending()?;
            self.writer.write_event(Event::Empty(open.start))?;
        }
        Ok(())
    }

    pub fn end_if_nonempty(&mut self) -> Result<(), MergeError> {
        match self.open.pop() {
            Some(open) if open.written => {
                self.writer.write_event(Event::End(open.start.to_end()))?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn empty(&mut self, start: BytesStart<'_>) -> Result<(), MergeError> {
        self.flush_pending()?;
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    pub fn text_element(&mut self, start: BytesStart<'_>, text: &str) -> Result<(), MergeError> {
        self.flush_pending()?;
        let end = start.to_end().into_owned();
        self.writer.write_event(Event::Start(start))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(end))?;
        Ok(())
    }

    /// Writes `text` as CDATA, splitting it wherever it contains `]]>`.
    pub fn cdata_element(&mut self, start: BytesStart<'_>, text: &str) -> Result<(), MergeError> {
        self.flush_pending()?;
        let end = start.to_end().into_owned();
        self.writer.write_event(Event::Start(start))?;
        let pieces: Vec<&str> = text.split("]]>").collect();
        for (i, piece) in pieces.iter().enumerate() {
            let mut chunk = String::with_capacity(piece.len() + 3);
            if i > 0 {
                chunk.push('>');
            }
            chunk.push_str(piece);
            if i + 1 < pieces.len() {
                chunk.push_str("]]");
            }
            self.writer.write_event(Event::CData(BytesCData::new(chunk)))?;
        }
        self.writer.write_event(Event::End(end))?;
        Ok(())
    }

    /// Writes an event read from the prior document as is. Entity references
    /// go out as escaped text so indentation never lands inside character data.
    pub fn raw(&mut self, event: Event<'_>) -> Result<(), MergeError> {
        self.flush_pending()?;
        match event {
            Event::GeneralRef(reference) => {
                let name = std::str::from_utf8(&reference)?;
                self.writer
                    .write_event(Event::Text(BytesText::from_escaped(format!("&{};", name))))?;
            }
            other => self.writer.write_event(other)?,
        }
        Ok(())
    }

    /// Number of elements opened through this sink and not yet closed.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn flush_pending(&mut self) -> Result<(), MergeError> {
        for open in self.open.iter_mut().filter(|o| !o.written) {
            self.writer.write_event(Event::Start(open.start.borrow()))?;
            open.written = true;
        }
        Ok(())
    }
}

/// An element start with the given attributes.
pub fn element<'a>(name: &str, attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> BytesStart<'static> {
    let mut start = BytesStart::new(name.to_owned());
    for attribute in attributes {
        start.push_attribute(attribute);
    }
    start
}
