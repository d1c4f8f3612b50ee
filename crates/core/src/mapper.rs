//! The public entry point: [`LdmlDataMapper`].

use crate::collation;
use crate::config::{Compatibility, IndentStyle, MapperConfig};
use crate::defaults;
use crate::error::LdmlError;
use crate::reader::LdmlReader;
use crate::writer::LdmlWriter;
use ldml_collation::{IcuRuleTranslator, RuleError, RuleTranslator};
use ldml_merge::{MergeCursor, XmlSink};
use ldml_types::{CollationRules, WritingSystemDefinition};
use log::debug;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Reads and writes writing system definitions as LDML.
///
/// The mapper holds no per-call state: every read and write builds its own
/// context, so one mapper can be shared between threads.
///
/// # Examples
///
/// ```
/// use ldml_core::{Compatibility, LdmlDataMapper};
/// use ldml_types::WritingSystemDefinition;
///
/// let mapper = LdmlDataMapper::new();
/// let mut ws = WritingSystemDefinition::new();
/// mapper.read_str(r#"<ldml><identity><language type="en"/></identity></ldml>"#, &mut ws)?;
/// assert_eq!(ws.id(), "en");
///
/// let xml = mapper.write_string(&mut ws, None, Compatibility::Strict)?;
/// assert!(xml.contains(r#"<language type="en"/>"#));
/// # Ok::<(), ldml_core::LdmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LdmlDataMapper {
    config: MapperConfig,
    translator: Arc<dyn RuleTranslator>,
}

impl Default for LdmlDataMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl LdmlDataMapper {
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            translator: Arc::new(IcuRuleTranslator::new()),
        }
    }

    /// Replaces the collation rule translator.
    pub fn with_translator(mut self, translator: Arc<dyn RuleTranslator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    // --- Read ---

    pub fn read_path(
        &self,
        path: impl AsRef<Path>,
        ws: &mut WritingSystemDefinition,
    ) -> Result<(), LdmlError> {
        let path = path.as_ref();
        debug!("Reading {}", path.display());
        let xml = fs::read_to_string(path)?;
        self.read_str(&xml, ws)
    }

    pub fn read_from<R: Read>(
        &self,
        mut reader: R,
        ws: &mut WritingSystemDefinition,
    ) -> Result<(), LdmlError> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        self.read_str(&xml, ws)
    }

    pub fn read_str(&self, xml: &str, ws: &mut WritingSystemDefinition) -> Result<(), LdmlError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        LdmlReader::new(self.translator.as_ref()).read(xml, ws)
    }

    // --- Write ---

    /// Writes `ws` to `out`, merging with the prior document `old` if given.
    ///
    /// Marks `ws` as requiring a valid tag and fails with
    /// [`LdmlError::InvalidTag`] before writing anything if it does not have one.
    ///
    /// # Returns
    ///
    /// The writer, once the document has been written to it.
    pub fn write_to<W: Write>(
        &self,
        out: W,
        ws: &mut WritingSystemDefinition,
        old: Option<&mut dyn BufRead>,
        compatibility: Compatibility,
    ) -> Result<W, LdmlError> {
        ws.set_requires_valid_tag(true);
        ws.validate_tag()?;
        let cursor = MergeCursor::new(old, self.sink(out));
        LdmlWriter::new(cursor, self.translator.as_ref(), compatibility)
            .write(ws, self.config.write_declaration)
    }

    pub fn write_string(
        &self,
        ws: &mut WritingSystemDefinition,
        old: Option<&str>,
        compatibility: Compatibility,
    ) -> Result<String, LdmlError> {
        let mut old = old.map(str::as_bytes);
        let old = old.as_mut().map(|bytes| bytes as &mut dyn BufRead);
        let out = self.write_to(Vec::new(), ws, old, compatibility)?;
        String::from_utf8(out)
            .map_err(|e| LdmlError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Writes `ws` to `path`. The prior document is read from `old_path` when
    /// that file exists; it may be `path` itself. The new document is written
    /// next to `path` and moved into place only once complete.
    pub fn write_path(
        &self,
        path: impl AsRef<Path>,
        ws: &mut WritingSystemDefinition,
        old_path: Option<&Path>,
        compatibility: Compatibility,
    ) -> Result<(), LdmlError> {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = NamedTempFile::new_in(dir)?;
        {
            let mut old = match old_path {
                Some(old_path) if old_path.exists() => {
                    debug!("Merging with {}", old_path.display());
                    Some(BufReader::new(File::open(old_path)?))
                }
                _ => None,
            };
            let old = old.as_mut().map(|reader| reader as &mut dyn BufRead);
            let out = self.write_to(BufWriter::new(temp.as_file()), ws, old, compatibility)?;
            out.into_inner().map_err(|e| e.into_error())?;
        }
        temp.persist(path).map_err(|e| e.error)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    // --- Defaults and validation ---

    /// Populates `ws` for one of a handful of well-known tags.
    pub fn fill_with_defaults(&self, tag: &str, ws: &mut WritingSystemDefinition) {
        defaults::fill_with_defaults(tag, ws);
    }

    /// Checks collation rules the way Write does. Write itself drops invalid
    /// rules without reporting them.
    pub fn validate_collation(&self, rules: &CollationRules) -> Result<(), RuleError> {
        collation::validate_collation(rules, self.translator.as_ref())
    }

    fn sink<W: Write>(&self, out: W) -> XmlSink<W> {
        match self.config.indent {
            IndentStyle::None => XmlSink::new(out),
            IndentStyle::Tabs(n) => XmlSink::with_indent(out, b'\t', n),
            IndentStyle::Spaces(n) => XmlSink::with_indent(out, b' ', n),
        }
    }
}
