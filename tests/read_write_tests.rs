mod common;

use common::fixtures::MINIMAL_DOCUMENT;
use common::{TestResult, compact_mapper, read};
use ldml_mapper::{Compatibility, LdmlDataMapper, LdmlError, WritingSystemDefinition};
use std::fs;

#[test]
fn test_minimal_document_and_defaults() -> TestResult {
    let mapper = LdmlDataMapper::new();
    let mut ws = read(&mapper, MINIMAL_DOCUMENT)?;
    assert_eq!(ws.id(), "en");

    mapper.fill_with_defaults("en-latn", &mut ws);
    assert_eq!(ws.language(), "en");
    assert_eq!(ws.language_name(), "English");
    assert_eq!(ws.abbreviation(), "eng");
    assert_eq!(ws.script(), "Latn");
    Ok(())
}

#[test]
fn test_defaults_for_unknown_tag_only_set_script() {
    let mapper = LdmlDataMapper::new();
    let mut ws = WritingSystemDefinition::new();
    ws.set_language("tpi");
    mapper.fill_with_defaults("tpi", &mut ws);
    assert_eq!(ws.bcp47_tag(), "tpi-Latn");
    assert_eq!(ws.language_name(), "");
}

#[test]
fn test_unsupported_version_is_rejected() {
    let doc = r#"<ldml><identity><language type="en"/></identity>
        <special xmlns:palaso="urn://palaso.org/ldmlExtensions/v1"><palaso:version value="99"/></special></ldml>"#;
    match read(&compact_mapper(), doc) {
        Err(LdmlError::VersionMismatch { tag, found, expected }) => {
            assert_eq!(tag, "en");
            assert_eq!(found, "99");
            assert_eq!(expected, 2);
        }
        other => panic!("expected a version mismatch, got {:?}", other),
    }
}

#[test]
fn test_missing_root_is_a_format_error() {
    let err = read(&compact_mapper(), "<writingSystem/>").unwrap_err();
    assert!(matches!(err, LdmlError::Format(_)));
    assert_eq!(
        err.to_string(),
        "Unable to load writing system definition: Missing <ldml> tag."
    );
}

#[test]
fn test_malformed_xml_is_an_error() {
    let err = read(&compact_mapper(), "<ldml><identity></ldml>").unwrap_err();
    assert!(matches!(err, LdmlError::Xml(_)));
}

#[test]
fn test_unparseable_generation_date_does_not_fail() -> TestResult {
    let ws = read(
        &compact_mapper(),
        r#"<ldml><identity><generation date="last tuesday"/><language type="en"/></identity></ldml>"#,
    )?;
    assert_eq!(ws.id(), "en");
    Ok(())
}

#[test]
fn test_cvs_generation_date() -> TestResult {
    use chrono::{TimeZone, Utc};
    let ws = read(
        &compact_mapper(),
        r#"<ldml><identity><generation date="$Date: 2008/06/18 22:52:35 $"/><language type="en"/></identity></ldml>"#,
    )?;
    assert_eq!(ws.date_modified(), Utc.with_ymd_and_hms(2008, 6, 18, 22, 52, 35).unwrap());
    Ok(())
}

#[test]
fn test_files_on_disk() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fr.ldml");
    let mapper = LdmlDataMapper::new();

    let mut ws = WritingSystemDefinition::new();
    mapper.fill_with_defaults("fr-latn", &mut ws);
    let missing = dir.path().join("missing.ldml");
    mapper.write_path(&path, &mut ws, Some(&missing), Compatibility::Strict)?;
    assert!(!missing.exists());

    let mut back = WritingSystemDefinition::new();
    mapper.read_path(&path, &mut back)?;
    assert_eq!(back.id(), "fr-Latn");
    assert_eq!(back.language_name(), "French");

    // Vendor content added by another tool survives a rewrite in place.
    let foreign = "<special xmlns:other=\"urn:other\"><other:flag on=\"1\"/></special>";
    let text = fs::read_to_string(&path)?.replace("</ldml>", &format!("{}</ldml>", foreign));
    fs::write(&path, text)?;
    back.set_abbreviation("fr");
    mapper.write_path(&path, &mut back, Some(&path), Compatibility::Strict)?;

    let written = fs::read_to_string(&path)?;
    assert!(written.contains("<other:flag on=\"1\"/>"));
    assert!(written.contains("<palaso:abbreviation value=\"fr\"/>"));
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}

#[test]
fn test_write_to_a_stream() -> TestResult {
    let mapper = compact_mapper();
    let mut ws = read(&mapper, MINIMAL_DOCUMENT)?;
    let mut old = MINIMAL_DOCUMENT.as_bytes();
    let out = mapper.write_to(Vec::new(), &mut ws, Some(&mut old), Compatibility::Strict)?;
    let text = String::from_utf8(out)?;
    assert!(text.starts_with("<ldml><identity>"));
    Ok(())
}
