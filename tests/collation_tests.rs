mod common;

use common::{TestResult, compact_mapper, has_collation_element, init_logger, read};
use ldml_mapper::{CollationRules, Compatibility, Subtags, WritingSystemDefinition};

fn english() -> WritingSystemDefinition {
    WritingSystemDefinition::with_subtags(Subtags::new("en", "", "", ""))
}

#[test]
fn test_simple_rules_are_stored_as_icu() -> TestResult {
    let mapper = compact_mapper();
    let mut ws = english();
    ws.set_collation(CollationRules::CustomSimple("a<b".into()));

    let written = mapper.write_string(&mut ws, None, Compatibility::Strict)?;
    assert!(written.contains(r#"<palaso:sortRulesType value="CustomIcu"/>"#));

    let back = read(&mapper, &written)?;
    assert_eq!(
        back.collation(),
        &CollationRules::CustomIcu("&[before 1] [first regular] < a\\<b".into())
    );
    Ok(())
}

#[test]
fn test_invalid_icu_rules_are_dropped() -> TestResult {
    init_logger();
    let mapper = compact_mapper();
    let mut ws = english();
    ws.set_collation(CollationRules::CustomIcu("!!!not-valid!!!".into()));

    let written = mapper.write_string(&mut ws, None, Compatibility::Strict)?;
    assert!(!has_collation_element(&written));
    assert!(mapper.validate_collation(ws.collation()).is_err());

    let back = read(&mapper, &written)?;
    assert_eq!(back.collation(), &CollationRules::DefaultOrdering);
    Ok(())
}

#[test]
fn test_empty_simple_rules_read_back_as_default_ordering() -> TestResult {
    let mapper = compact_mapper();
    let mut ws = english();
    ws.set_collation(CollationRules::CustomSimple(String::new()));

    let written = mapper.write_string(&mut ws, None, Compatibility::Strict)?;
    assert!(!has_collation_element(&written));

    let back = read(&mapper, &written)?;
    assert_eq!(back.collation(), &CollationRules::DefaultOrdering);
    Ok(())
}

#[test]
fn test_carriage_return_in_rules_survives_a_round_trip() -> TestResult {
    let mapper = compact_mapper();
    let mut ws = english();
    ws.set_collation(CollationRules::CustomIcu("&a\r< b".into()));

    let written = mapper.write_string(&mut ws, None, Compatibility::Strict)?;
    assert!(!written.contains('\r'));

    let back = read(&mapper, &written)?;
    assert_eq!(back.collation(), &CollationRules::CustomIcu("&a\\u000D< b".into()));
    Ok(())
}

#[test]
fn test_invalid_simple_rules_are_dropped() -> TestResult {
    let mapper = compact_mapper();
    let mut ws = english();
    ws.set_collation(CollationRules::CustomSimple("a a".into()));

    let written = mapper.write_string(&mut ws, None, Compatibility::Strict)?;
    assert!(!has_collation_element(&written));
    Ok(())
}

#[test]
fn test_invalid_rules_replace_a_prior_collation() -> TestResult {
    let mapper = compact_mapper();
    let old = r#"<ldml><identity><language type="en"/></identity><collations><collation><cr><![CDATA[&c < k]]></cr></collation></collations></ldml>"#;
    let mut ws = read(&mapper, old)?;
    assert_eq!(ws.collation(), &CollationRules::CustomIcu("&c < k".into()));

    ws.set_collation(CollationRules::CustomIcu("&a <".into()));
    let written = mapper.write_string(&mut ws, Some(old), Compatibility::Strict)?;
    assert!(!has_collation_element(&written));
    assert!(!written.contains("&c < k"));
    Ok(())
}

#[test]
fn test_other_language_round_trips() -> TestResult {
    let mapper = compact_mapper();
    let mut ws = english();
    ws.set_collation(CollationRules::OtherLanguage("fr-FR".into()));

    let written = mapper.write_string(&mut ws, None, Compatibility::Strict)?;
    assert!(written.contains(r#"<base><alias source="fr-FR"/></base>"#));
    assert_eq!(read(&mapper, &written)?.collation(), ws.collation());
    Ok(())
}

#[test]
fn test_documents_marked_custom_simple_are_recovered() -> TestResult {
    let doc = r#"<ldml><identity><language type="en"/></identity><collations><collation>
        <cr><![CDATA[&[before 1] [first regular] < a << A < b]]></cr>
        <special xmlns:palaso="urn://palaso.org/ldmlExtensions/v1"><palaso:sortRulesType value="CustomSimple"/></special>
    </collation></collations></ldml>"#;
    let ws = read(&compact_mapper(), doc)?;
    assert_eq!(ws.collation(), &CollationRules::CustomSimple("a A\nb".into()));
    Ok(())
}

#[test]
fn test_legacy_rules_element_is_decoded() -> TestResult {
    let doc = r#"<ldml><identity><language type="en"/></identity><collations><collation>
        <settings strength="primary"/>
        <rules><reset>c</reset><p>k</p><s>K</s></rules>
    </collation></collations></ldml>"#;
    let ws = read(&compact_mapper(), doc)?;
    assert_eq!(
        ws.collation(),
        &CollationRules::CustomIcu("[strength 1] &c < k << K".into())
    );
    Ok(())
}

#[test]
fn test_unknown_sort_rules_type_fails_the_read() {
    let doc = r#"<ldml><identity><language type="en"/></identity><collations><collation>
        <special xmlns:palaso="urn://palaso.org/ldmlExtensions/v1"><palaso:sortRulesType value="Alphabetical"/></special>
    </collation></collations></ldml>"#;
    let err = read(&compact_mapper(), doc).unwrap_err();
    assert_eq!(err.to_string(), "Unhandled sort rules type 'Alphabetical'");
}
