// Tests for FomodCore.
// Shared fixtures live here, each area of the crate gets its own file.

use simple_logger::SimpleLogger;

use crate::{
	enums::{GroupType, OptionType},
	parser::{parse_text, ParseOptions},
	tree::{FileEntry, FileKind, Files, Group, Page, Plugin, PluginType, Root},
};

mod conditions;
mod io;
mod parser;
mod tree;
mod validation;

pub(crate) const SAMPLE_INFO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fomod>
  <Name>Example Mod</Name>
  <Author>Someone</Author>
  <Version>1.2.0</Version>
  <Website>https://example.com</Website>
</fomod>
"#;

pub(crate) const SAMPLE_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<config xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="http://qconsulting.ca/fo3/ModConfig5.0.xsd">
  <moduleName>Example Mod</moduleName>
  <moduleImage path="fomod/images/cover.png"/>
  <requiredInstallFiles>
    <file source="core.esp" destination="core.esp"/>
    <folder source="textures" destination="textures"/>
  </requiredInstallFiles>
  <installSteps order="Explicit">
    <installStep name="Options">
      <optionalFileGroups order="Explicit">
        <group name="Main" type="SelectExactlyOne">
          <plugins order="Explicit">
            <plugin name="Light">
              <description>Light version.</description>
              <files>
                <file source="light.esp" destination="main.esp"/>
              </files>
              <conditionFlags>
                <flag name="variant">light</flag>
              </conditionFlags>
              <typeDescriptor>
                <type name="Recommended"/>
              </typeDescriptor>
            </plugin>
            <plugin name="Heavy">
              <description>Heavy version.</description>
              <files>
                <file source="heavy.esp" destination="main.esp"/>
              </files>
              <conditionFlags>
                <flag name="variant">heavy</flag>
              </conditionFlags>
              <typeDescriptor>
                <type name="Optional"/>
              </typeDescriptor>
            </plugin>
          </plugins>
        </group>
      </optionalFileGroups>
    </installStep>
    <installStep name="Extras">
      <visible>
        <flagDependency flag="variant" value="heavy"/>
      </visible>
      <optionalFileGroups order="Explicit">
        <group name="Addons" type="SelectAny">
          <plugins order="Explicit">
            <plugin name="Patch">
              <description>Compatibility patch.</description>
              <files>
                <file source="patch.esp" destination="patch.esp"/>
              </files>
              <typeDescriptor>
                <dependencyType>
                  <defaultType name="Optional"/>
                  <patterns>
                    <pattern>
                      <dependencies operator="And">
                        <fileDependency file="other.esp" state="Active"/>
                      </dependencies>
                      <type name="Recommended"/>
                    </pattern>
                  </patterns>
                </dependencyType>
              </typeDescriptor>
            </plugin>
          </plugins>
        </group>
      </optionalFileGroups>
    </installStep>
  </installSteps>
  <conditionalFileInstalls>
    <patterns>
      <pattern>
        <dependencies operator="And">
          <flagDependency flag="variant" value="light"/>
        </dependencies>
        <files>
          <file source="light_extra.esp" destination="extra.esp"/>
        </files>
      </pattern>
    </patterns>
  </conditionalFileInstalls>
</config>
"#;

/// Turns on logging for a test. Safe to call from every test.
pub(crate) fn init_logger() {
	let _ = SimpleLogger::new()
		.with_level(log::LevelFilter::Debug)
		.init();
}

pub(crate) fn sample() -> Root {
	parse_text(Some(SAMPLE_INFO), SAMPLE_CONFIG, &ParseOptions::default())
		.expect("the sample package should parse")
		.root
}

pub(crate) fn file(source: &str, destination: &str) -> FileEntry {
	FileEntry::new(FileKind::File, source, Some(destination.to_owned()))
}

pub(crate) fn plugin(name: &str, option_type: OptionType) -> Plugin {
	Plugin::new(name).with_type(PluginType::Static(option_type))
}

/// A plugin installing a single file.
pub(crate) fn plugin_with_file(name: &str, source: &str, destination: &str) -> Plugin {
	let mut plugin = Plugin::new(name);
	plugin.files_mut().push(file(source, destination));
	plugin
}

/// A single page holding a single group.
pub(crate) fn single_page(group_type: GroupType, plugins: Vec<Plugin>) -> Root {
	let mut group = Group::new("Group", group_type);
	for plugin in plugins { group.push(plugin); }

	let mut page = Page::new("Page");
	page.push(group);

	let mut root = Root::new();
	root.name = "Test".to_owned();
	root.pages.push(page);
	root
}

pub(crate) fn files_of(entries: Vec<FileEntry>) -> Files {
	let mut files = Files::new();
	for entry in entries { files.push(entry); }
	files
}
