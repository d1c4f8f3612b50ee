//! Literal LDML documents shared by the integration tests.

/// A vendor block the mapper knows nothing about. Written on one line so
/// that a compact write reproduces it byte for byte.
pub const FOREIGN_SPECIAL: &str = "<special xmlns:sil=\"urn://example.org/sil/v3\"><sil:note lang='en'>1 &lt; 2 &amp; <![CDATA[<raw>]]></sil:note><!-- kept --><sil:empty/></special>";

/// A `special` inside `identity`, carried through on write.
pub const IDENTITY_SPECIAL: &str = "<special><sil:origin xmlns:sil=\"urn://example.org/sil/v3\" source=\"survey\"/></special>";

pub const FIELDWORKS_SPECIAL: &str = "<special xmlns:fw=\"urn://fieldworks.sil.org/ldmlExtensions/v1\"><fw:windowsLCID value=\"1033\"/></special>";

/// A complete document touching every recognized section plus foreign content.
pub fn full_document() -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<ldml>
	<identity>
		<version number="3">Reviewed</version>
		<generation date="2023-05-01T08:30:00"/>
		<language type="en"/>
		<script type="Latn"/>
		<territory type="GB"/>
		{identity_special}
	</identity>
	<characters>
		<exemplarCharacters>[a-z]</exemplarCharacters>
	</characters>
	<collations>
		<collation type="phonebook"><cr><![CDATA[&ae << ä]]></cr></collation>
		<collation>
			<settings strength="secondary"/>
			<cr><![CDATA[&a < b]]></cr>
			<special xmlns:palaso="urn://palaso.org/ldmlExtensions/v1">
				<palaso:sortRulesType value="CustomIcu"/>
			</special>
		</collation>
	</collations>
	<special xmlns:palaso="urn://palaso.org/ldmlExtensions/v1">
		<palaso:abbreviation value="eng"/>
		<palaso:defaultKeyboard value="US"/>
		<palaso:languageName value="English"/>
		<palaso:spellCheckingId value="en_GB"/>
		<palaso:version value="2"/>
	</special>
	<special xmlns:palaso2="urn://palaso.org/ldmlExtensions/v2">
		<palaso2:knownKeyboards>
			<palaso2:keyboard layout="UK" locale="en-GB"/>
		</palaso2:knownKeyboards>
		<palaso2:version value="2"/>
	</special>
	{fieldworks}
	{foreign}
</ldml>
"#,
        identity_special = IDENTITY_SPECIAL,
        fieldworks = FIELDWORKS_SPECIAL,
        foreign = FOREIGN_SPECIAL,
    )
}

/// A document written by older tooling, with a legacy private-use language.
pub const LEGACY_DOCUMENT: &str = r#"<ldml>
	<identity>
		<version number=""/>
		<generation date="2008-06-18T22:52:35"/>
		<language type='x-kal'/>
		<script type='Latn'/>
	</identity>
	<special xmlns:palaso="urn://palaso.org/ldmlExtensions/v1">
		<palaso:abbreviation value="kal"/>
		<palaso:languageName value="Kalaba"/>
		<palaso:version value="1"/>
	</special>
</ldml>"#;

pub const MINIMAL_DOCUMENT: &str = r#"<ldml><identity><language type="en"/></identity></ldml>"#;
