// Tests for reading and writing FOMOD documents.

use std::io::Cursor;

use crate::{
	enums::{ConditionType, FileType, GroupType, OptionType, Order},
	error::ParseError,
	parser::{parse, parse_text, ParseOptions, Source},
	render::Render,
	tree::{Condition, Element, FileKind, PluginType},
};

use super::*;

fn parse_config(config: &str) -> crate::parser::Parsed {
	parse_text(Some("<fomod/>"), config, &ParseOptions::default()).unwrap()
}

#[test]
fn sample_package_builds_full_tree() {
	init_logger();

	let parsed = parse_text(Some(SAMPLE_INFO), SAMPLE_CONFIG, &ParseOptions::default()).unwrap();
	assert!(parsed.warnings.is_empty(), "unexpected warnings: {:?}", parsed.warnings);

	let root = parsed.root;
	assert_eq!(root.name, "Example Mod");
	assert_eq!(root.image.as_deref(), Some("fomod/images/cover.png"));
	assert_eq!(root.version(), "1.2.0");
	assert_eq!(root.website(), "https://example.com");

	assert_eq!(root.files().len(), 2);
	assert_eq!(root.files().get("textures").map(|f| f.kind), Some(FileKind::Folder));

	assert_eq!(root.pages.len(), 2);
	assert_eq!(root.pages.order, Order::Explicit);

	let options = root.pages.get(0).unwrap();
	let main = options.get(0).unwrap();
	assert_eq!(main.group_type, GroupType::ExactlyOne);
	assert_eq!(main.len(), 2);

	let light = main.get(0).unwrap();
	assert_eq!(light.description, "Light version.");
	assert_eq!(light.flags.get("variant"), Some("light"));
	assert_eq!(light.files().destination("light.esp"), Some("main.esp"));
	assert_eq!(light.plugin_type, PluginType::Static(OptionType::Recommended));

	let extras = root.pages.get(1).unwrap();
	assert_eq!(extras.conditions().get("variant"), Some(&Condition::Flag { name: "variant".into(), value: "heavy".into() }));

	let patch = extras.get(0).and_then(|g| g.get(0)).unwrap();
	let PluginType::Conditional(dependency_type) = &patch.plugin_type else { panic!("expected a conditional type") };
	assert_eq!(dependency_type.default, OptionType::Optional);

	let (conditions, option_type) = dependency_type.get(0).unwrap();
	assert_eq!(option_type, OptionType::Recommended);
	assert_eq!(conditions.operator, ConditionType::And);
	assert_eq!(conditions.get("other.esp"), Some(&Condition::File { path: "other.esp".into(), state: FileType::Active }));

	assert_eq!(root.file_patterns.len(), 1);
}

#[test]
fn rendering_is_a_fixpoint() {
	let once = sample().render();
	let again = parse_text(None, &once, &ParseOptions::default()).unwrap().root.render();
	assert_eq!(once, again);

	let info = sample().info().render();
	let reparsed = parse_text(Some(&info), &once, &ParseOptions::default()).unwrap().root;
	assert_eq!(reparsed.info().render(), info);
	assert_eq!(reparsed.author(), "Someone");
}

#[test]
fn unknown_content_survives_round_trip() {
	let config = r#"<config>
  <moduleName>Mod</moduleName>
  <installSteps order="Explicit" colour="blue">
    <installStep name="Page">
      <optionalFileGroups order="Explicit">
        <group name="Group" type="SelectAny">
          <plugins order="Explicit">
            <plugin name="Option">
              <description>Text</description>
              <typeDescriptor>
                <type name="Optional"/>
              </typeDescriptor>
              <rating stars="5">Great</rating>
            </plugin>
          </plugins>
        </group>
      </optionalFileGroups>
    </installStep>
  </installSteps>
  <customThing key="v">text</customThing>
</config>
"#;

	let parsed = parse_config(config);
	let root = &parsed.root;

	assert_eq!(root.pages.meta().attributes.get("colour").map(String::as_str), Some("blue"));
	assert_eq!(root.meta().extras.get("customThing").map(|o| o.text.as_str()), Some("text"));

	let text = root.render();
	assert!(text.contains(r#"<installSteps order="Explicit" colour="blue">"#));
	assert!(text.contains(r#"<rating stars="5">Great</rating>"#));
	assert!(text.contains(r#"<customThing key="v">text</customThing>"#));
}

#[test]
fn foreign_attributes_are_dropped_with_warning() {
	let config = r#"<config xmlns:a="urn:other"><moduleName a:thing="1">Mod</moduleName></config>"#;
	let parsed = parse_config(config);

	assert!(parsed.warnings.iter().any(|w| w.title == "Foreign Attribute"));
	assert!(!parsed.root.render().contains("thing"));
}

#[test]
fn invalid_enum_falls_back_with_warning() {
	let config = r#"<config>
  <moduleName>Mod</moduleName>
  <installSteps order="Explicit">
    <installStep name="Page">
      <optionalFileGroups>
        <group name="Group" type="SelectSome">
          <plugins/>
        </group>
      </optionalFileGroups>
    </installStep>
  </installSteps>
</config>"#;

	let parsed = parse_config(config);
	let group = parsed.root.pages.get(0).and_then(|p| p.get(0)).unwrap();
	assert_eq!(group.group_type, GroupType::Any);

	let warning = parsed.warnings.iter().find(|w| w.title == "Invalid Group Type").unwrap();
	assert_eq!(warning.tag.as_deref(), Some("group"));
	assert_eq!(warning.line, Some(6));
	assert!(warning.critical);

	// A missing order attribute defaults without a warning.
	assert_eq!(parsed.root.pages.get(0).unwrap().order, Order::Ascending);
	assert_eq!(parsed.warnings.len(), 1);
}

#[test]
fn elements_missing_required_attributes_are_skipped() {
	let config = r#"<config>
  <moduleName>Mod</moduleName>
  <requiredInstallFiles>
    <file destination="nowhere.esp"/>
    <file source="kept.esp" priority="high"/>
  </requiredInstallFiles>
</config>"#;

	let parsed = parse_config(config);
	assert_eq!(parsed.root.files().len(), 1);
	assert_eq!(parsed.root.files().get("kept.esp").map(|f| f.priority), Some(0));

	let titles: Vec<&str> = parsed.warnings.iter().map(|w| w.title.as_str()).collect();
	assert_eq!(titles, vec!["Missing Source Attribute", "Invalid Priority"]);
}

#[test]
fn comments_warn_once() {
	let config = "<config><!-- one --><moduleName>Mod</moduleName><!-- two --></config>";
	let parsed = parse_config(config);

	let comments = parsed.warnings.iter().filter(|w| w.title == "XML Comments Present").count();
	assert_eq!(comments, 1);
}

#[test]
fn missing_info_is_a_warning() {
	let parsed = parse_text(None, "<config><moduleName>Mod</moduleName></config>", &ParseOptions::default()).unwrap();
	assert_eq!(parsed.warnings.len(), 1);
	assert_eq!(parsed.warnings[0].title, "Missing Info XML");
	assert!(!parsed.warnings[0].critical);
}

#[test]
fn wrong_documents_are_rejected() {
	let result = parse_text(None, "<notConfig/>", &ParseOptions::default());
	assert!(matches!(result, Err(ParseError::NotFomod { expected: "config", .. })));

	let result = parse_text(Some("<config/>"), "<config/>", &ParseOptions::default());
	assert!(matches!(result, Err(ParseError::NotFomod { expected: "fomod", .. })));

	let result = parse_text(None, "<config><moduleName>", &ParseOptions::default());
	assert!(matches!(result, Err(ParseError::Xml { document: "config", .. })));
}

#[test]
fn strict_mode_reports_schema_violations() {
	let config = r#"<config><installSteps order="Explicit"/></config>"#;

	let parsed = parse_text(None, config, &ParseOptions::strict()).unwrap();
	let warning = parsed.warnings.iter().find(|w| w.title == "Schema Violation").unwrap();
	assert!(warning.message.contains("'config' is missing the required 'moduleName' element"));
	assert!(warning.message.contains("'installSteps' is missing the required 'installStep' element"));

	let options = ParseOptions { strict: true, fail_on_schema_error: true };
	assert!(matches!(parse_text(None, config, &options), Err(ParseError::Schema(_))));

	// The same document is accepted without strict mode.
	assert!(parse_text(None, config, &ParseOptions::default()).is_ok());
}

#[test]
fn utf16_documents_are_decoded() {
	let config = "<config><moduleName>Wide</moduleName></config>";

	let mut bytes = vec![0xFF, 0xFE];
	bytes.extend(config.encode_utf16().flat_map(u16::to_le_bytes));

	let source = Source::Readers {
		info: Some(Box::new(Cursor::new(b"\xEF\xBB\xBF<fomod/>".to_vec()))),
		config: Box::new(Cursor::new(bytes)),
	};

	let parsed = parse(source, &ParseOptions::default()).unwrap();
	assert_eq!(parsed.root.name, "Wide");
	assert!(parsed.warnings.is_empty());
}

#[test]
fn invalid_bytes_are_an_encoding_error() {
	let source = Source::Readers {
		info: None,
		config: Box::new(Cursor::new(vec![0x3C, 0xFF, 0xFF, 0x3E])),
	};

	assert!(matches!(parse(source, &ParseOptions::default()), Err(ParseError::Encoding("config"))));
}

#[test]
fn odd_length_utf16_is_an_encoding_error() {
	let mut bytes = vec![0xFF, 0xFE];
	bytes.extend("<config/>".encode_utf16().flat_map(u16::to_le_bytes));
	bytes.push(0x00);

	let source = Source::Readers { info: None, config: Box::new(Cursor::new(bytes)) };
	assert!(matches!(parse(source, &ParseOptions::default()), Err(ParseError::Encoding("config"))));
}

#[test]
fn info_schema_location_survives_round_trip() {
	let info = r#"<fomod xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="http://qconsulting.ca/fo3/ModInfo.xsd">
  <Name>Mod</Name>
</fomod>"#;

	let root = parse_text(Some(info), "<config/>", &ParseOptions::default()).unwrap().root;
	let once = root.info().render();
	assert!(once.starts_with(r#"<fomod xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="#));

	let again = parse_text(Some(&once), "<config/>", &ParseOptions::default()).unwrap().root;
	assert_eq!(again.info().render(), once);
	assert_eq!(again.info().get_text("name"), "Mod");
}

#[test]
fn whitespace_in_values_survives_round_trip() {
	let config = r#"<config>
  <moduleName>Line&#13;Break</moduleName>
  <requiredInstallFiles>
    <file source="a&#10;b" destination="c&#9;d"/>
  </requiredInstallFiles>
</config>"#;

	let root = parse_config(config).root;
	assert_eq!(root.name, "Line\rBreak");
	assert_eq!(root.files().iter().next().map(|f| f.source.as_str()), Some("a\nb"));

	let once = root.render();
	assert!(once.contains(r#"<file source="a&#10;b" destination="c&#9;d"/>"#));
	assert!(once.contains("<moduleName>Line&#13;Break</moduleName>"));

	let again = parse_text(None, &once, &ParseOptions::default()).unwrap().root.render();
	assert_eq!(once, again);
}

#[test]
fn line_numbers_come_from_line_starts() {
	let lines = crate::parser::LineIndex::new("a\nb\n\nc");

	assert_eq!(lines.line(0), 1);
	assert_eq!(lines.line(1), 1);
	assert_eq!(lines.line(2), 2);
	assert_eq!(lines.line(4), 3);
	assert_eq!(lines.line(5), 4);
}
