//! Write: regenerating the recognized sections of an LDML document and
//! splicing them into whatever the prior document carried.

use crate::collation::{CollationPlan, plan_collation};
use crate::config::Compatibility;
use crate::context::WriteContext;
use crate::dates::format_generation_date;
use crate::error::LdmlError;
use crate::vocab;
use ldml_collation::RuleTranslator;
use ldml_merge::source::{attribute, element_name};
use ldml_merge::{Entered, MergeCursor, MergeError, PALASO, PALASO2, element};
use ldml_types::{LATEST_DEFINITION_VERSION, Subtags, WritingSystemDefinition};
use log::debug;
use quick_xml::events::BytesStart;
use std::io::{BufRead, Write};

/// One Write call: the cursor over the prior document, the translator used to
/// validate collation rules, and the per-call context.
pub struct LdmlWriter<'t, R: BufRead, W: Write> {
    cursor: MergeCursor<R, W>,
    translator: &'t dyn RuleTranslator,
    ctx: WriteContext,
}

impl<'t, R: BufRead, W: Write> LdmlWriter<'t, R, W> {
    pub fn new(
        cursor: MergeCursor<R, W>,
        translator: &'t dyn RuleTranslator,
        compatibility: Compatibility,
    ) -> Self {
        Self {
            cursor,
            translator,
            ctx: WriteContext::new(compatibility),
        }
    }

    pub fn write(
        mut self,
        ws: &WritingSystemDefinition,
        declaration: bool,
    ) -> Result<W, LdmlError> {
        if declaration {
            self.cursor.sink().declaration()?;
        }
        let old_root = match self.cursor.open_root(vocab::LDML) {
            Err(MergeError::UnexpectedRoot { found, .. }) => {
                debug!("Prior document has root <{}>", found);
                return Err(LdmlError::missing_root());
            }
            other => other?,
        };
        let root = old_root.unwrap_or_else(|| element(vocab::LDML, []));
        self.cursor.sink().start(root)?;

        self.cursor.copy_until(vocab::IDENTITY)?;
        self.write_identity(ws)?;
        self.cursor.copy_until(vocab::LAYOUT)?;
        self.write_layout(ws)?;
        self.cursor.copy_until(vocab::COLLATIONS)?;
        self.write_collations(ws)?;
        self.cursor.copy_until(vocab::SPECIAL)?;
        self.write_palaso(ws)?;
        self.write_palaso2(ws)?;

        self.cursor.copy_known_or_foreign_specials()?;
        self.cursor.copy_remainder()?;
        self.cursor.sink().end()?;
        Ok(self.cursor.finish())
    }

    fn write_identity(&mut self, ws: &WritingSystemDefinition) -> Result<(), LdmlError> {
        let entered = self.cursor.enter(vocab::IDENTITY)?;
        let mut literal = Subtags::default();
        let mut literal_elements = Vec::new();
        if entered == Entered::Children {
            while let Some(start) = self.cursor.take_until(vocab::SPECIAL)? {
                let value = attribute(&start, "type")?.unwrap_or_default();
                let slot = match element_name(&start).as_str() {
                    vocab::LANGUAGE => &mut literal.language,
                    vocab::SCRIPT => &mut literal.script,
                    vocab::TERRITORY => &mut literal.region,
                    vocab::VARIANT => &mut literal.variant,
                    _ => continue,
                };
                *slot = value;
                literal_elements.push(start);
            }
        }
        self.ctx.legacy_private_use = self.keeps_literal_tag(&literal, ws);

        let sink = self.cursor.sink();
        sink.start(element(vocab::IDENTITY, []))?;
        let version = element(vocab::VERSION, [("number", ws.version_number())]);
        if ws.version_description().is_empty() {
            sink.empty(version)?;
        } else {
            sink.text_element(version, ws.version_description())?;
        }
        let date = format_generation_date(ws.date_modified());
        sink.empty(element(vocab::GENERATION, [("date", date.as_str())]))?;

        if self.ctx.legacy_private_use {
            debug!("Keeping literal tag '{}' for '{}'", literal, ws.bcp47_tag());
            for start in literal_elements {
                sink.empty(start)?;
            }
        } else {
            sink.empty(element(vocab::LANGUAGE, [("type", ws.language())]))?;
            for (name, value) in [
                (vocab::SCRIPT, ws.script()),
                (vocab::TERRITORY, ws.region()),
                (vocab::VARIANT, ws.variant()),
            ] {
                if !value.is_empty() {
                    sink.empty(element(name, [("type", value)]))?;
                }
            }
        }

        if entered == Entered::Children {
            self.cursor.copy_remainder()?;
        }
        self.cursor.sink().end()?;
        Ok(())
    }

    /// Whether the prior document's literal private-use tag still denotes the
    /// definition's tag and may be written back as is.
    fn keeps_literal_tag(&self, literal: &Subtags, ws: &WritingSystemDefinition) -> bool {
        self.ctx.compatibility == Compatibility::LegacyPrivateUse
            && literal.has_private_use_language()
            && ldml_tags::interpret(literal).round_trips_to(&ws.bcp47_tag())
    }

    fn write_layout(&mut self, ws: &WritingSystemDefinition) -> Result<(), LdmlError> {
        let entered = self.cursor.enter(vocab::LAYOUT)?;
        self.cursor.sink().start_lazy(element(vocab::LAYOUT, []));
        if ws.right_to_left() {
            self.cursor.sink().empty(element(
                vocab::ORIENTATION,
                [("characters", vocab::RIGHT_TO_LEFT)],
            ))?;
        }
        if entered == Entered::Children {
            if self.cursor.find(vocab::ORIENTATION)? {
                self.cursor.skip_node()?;
            }
            self.cursor.copy_remainder()?;
        }
        self.cursor.sink().end_if_nonempty()?;
        Ok(())
    }

    fn write_collations(&mut self, ws: &WritingSystemDefinition) -> Result<(), LdmlError> {
        let plan = plan_collation(ws.collation(), self.translator);
        let entered = self.cursor.enter(vocab::COLLATIONS)?;
        self.cursor.sink().start_lazy(element(vocab::COLLATIONS, []));
        if entered == Entered::Children {
            if self.cursor.find(vocab::ALIAS)? {
                self.cursor.skip_node()?;
            }
            self.cursor.copy_until(vocab::COLLATION)?;
        }

        let mut written = false;
        while self.cursor.is_on(vocab::COLLATION)? {
            let kind = self.cursor.attribute_of(vocab::COLLATION, "type")?;
            let standard = kind.as_deref().is_none_or(|t| t.is_empty() || t == vocab::STANDARD);
            if !standard {
                self.cursor.copy_node()?;
            } else if written {
                debug!("Dropping duplicate standard collation");
                self.cursor.skip_node()?;
            } else {
                self.write_collation(&plan, true)?;
                written = true;
            }
        }
        if !written {
            self.write_collation(&plan, false)?;
        }

        if entered == Entered::Children {
            self.cursor.copy_remainder()?;
        }
        self.cursor.sink().end()?;
        Ok(())
    }

    /// Writes the standard collation, merging with the prior one when the
    /// cursor is on it.
    fn write_collation(&mut self, plan: &CollationPlan, on_old: bool) -> Result<(), LdmlError> {
        let entered = if on_old {
            self.cursor.enter(vocab::COLLATION)?
        } else {
            Entered::Absent
        };
        if entered == Entered::Children {
            // Everything before the specials is regenerated.
            while self.cursor.take_until(vocab::SPECIAL)?.is_some() {}
        }

        let sink = self.cursor.sink();
        sink.start_lazy(element(vocab::COLLATION, []));
        match plan {
            CollationPlan::Default => {}
            CollationPlan::Alias(source) => {
                sink.start(element(vocab::BASE, []))?;
                sink.empty(element(vocab::ALIAS, [("source", source.as_str())]))?;
                sink.end()?;
            }
            CollationPlan::Rules { body, .. } => {
                if !body.settings.is_empty() {
                    sink.empty(element(vocab::SETTINGS, body.settings.iter().copied()))?;
                }
                if !body.rules.is_empty() {
                    sink.cdata_element(element(vocab::CR, []), &body.rules)?;
                }
            }
        }
        if let Some(marker) = plan.marker() {
            sink.start(element(vocab::SPECIAL, [("xmlns:palaso", PALASO)]))?;
            sink.empty(element(
                &format!("palaso:{}", vocab::SORT_RULES_TYPE),
                [("value", marker.as_str())],
            ))?;
            sink.end()?;
        }

        if entered == Entered::Children {
            self.cursor.copy_known_or_foreign_specials()?;
            self.cursor.copy_remainder()?;
        }
        self.cursor.sink().end_if_nonempty()?;
        Ok(())
    }

    fn write_palaso(&mut self, ws: &WritingSystemDefinition) -> Result<(), LdmlError> {
        let legacy = self.ctx.legacy_private_use;
        let old = if legacy && self.cursor.is_on_special(PALASO)? {
            self.cursor.enter(vocab::SPECIAL)?
        } else {
            Entered::Absent
        };
        self.cursor
            .sink()
            .start_lazy(element(vocab::SPECIAL, [("xmlns:palaso", PALASO)]));

        let latest = LATEST_DEFINITION_VERSION.to_string();
        let legacy_encoded = if ws.legacy_encoded() { "True" } else { "" };
        let fields: [(&str, &str, bool); 6] = [
            (vocab::ABBREVIATION, ws.abbreviation(), true),
            (vocab::DEFAULT_KEYBOARD, ws.default_keyboard(), false),
            (vocab::IS_LEGACY_ENCODED, legacy_encoded, false),
            (vocab::LANGUAGE_NAME, ws.language_name(), true),
            (vocab::SPELL_CHECKING_ID, ws.spell_checking_id(), false),
            (vocab::VERSION, latest.as_str(), true),
        ];
        for (name, value, kept_when_legacy) in fields {
            if legacy && kept_when_legacy {
                if old == Entered::Children {
                    self.cursor.copy_child_named(name)?;
                }
            } else if !value.is_empty() {
                self.cursor.sink().empty(vendor_field("palaso", name, value))?;
            }
        }

        if old == Entered::Children {
            self.cursor.skip_remainder()?;
        }
        self.cursor.sink().end_if_nonempty()?;
        Ok(())
    }

    fn write_palaso2(&mut self, ws: &WritingSystemDefinition) -> Result<(), LdmlError> {
        if ws.known_keyboards().is_empty() {
            return Ok(());
        }
        let legacy = self.ctx.legacy_private_use;
        let sink = self.cursor.sink();
        sink.start(element(vocab::SPECIAL, [("xmlns:palaso2", PALASO2)]))?;
        sink.start(element(&format!("palaso2:{}", vocab::KNOWN_KEYBOARDS), []))?;
        for keyboard in ws.known_keyboards() {
            sink.empty(element(
                &format!("palaso2:{}", vocab::KEYBOARD),
                [
                    ("layout", keyboard.layout.as_str()),
                    ("locale", keyboard.locale.as_str()),
                ],
            ))?;
        }
        sink.end()?;
        if !legacy {
            let latest = LATEST_DEFINITION_VERSION.to_string();
            sink.empty(vendor_field("palaso2", vocab::VERSION, &latest))?;
        }
        sink.end()?;
        Ok(())
    }
}

/// `<prefix:name value="..."/>`
fn vendor_field(prefix: &str, name: &str, value: &str) -> BytesStart<'static> {
    element(&format!("{}:{}", prefix, name), [("value", value)])
}
