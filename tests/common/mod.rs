#![allow(dead_code)]

pub mod fixtures;

use ldml_mapper::{IndentStyle, LdmlDataMapper, LdmlError, MapperConfig, WritingSystemDefinition};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A mapper writing everything on one line without a declaration, so copied
/// content can be compared byte for byte.
pub fn compact_mapper() -> LdmlDataMapper {
    LdmlDataMapper::with_config(
        MapperConfig::default()
            .with_indent(IndentStyle::None)
            .with_declaration(false),
    )
}

/// Reads `xml` into a fresh definition.
pub fn read(mapper: &LdmlDataMapper, xml: &str) -> Result<WritingSystemDefinition, LdmlError> {
    let mut ws = WritingSystemDefinition::new();
    mapper.read_str(xml, &mut ws)?;
    Ok(ws)
}

/// True when `xml` contains a `<collation>` element (as opposed to `<collations>`).
pub fn has_collation_element(xml: &str) -> bool {
    xml.contains("<collation>") || xml.contains("<collation ") || xml.contains("<collation/>")
}
