// SchemaCheck :: A structural check of installer documents against the FOMOD schema.
// This covers element nesting, required children and attributes, and attribute values.

use roxmltree::{Document, Node};

use crate::{
	enums::{ConditionType, FileType, FomodEnum, GroupType, OptionType, Order},
	parser::LineIndex,
};

type ValueCheck = fn(&str) -> bool;

/// What the schema allows for a single element.
struct Rule {
	tag: &'static str,
	children: &'static [&'static str],
	required_children: &'static [&'static str],
	required_attributes: &'static [&'static str],
	values: &'static [(&'static str, ValueCheck)],
}

fn is_variant<E: FomodEnum>(value: &str) -> bool {
	E::from_attr(value).is_some()
}

fn is_integer(value: &str) -> bool {
	value.trim().parse::<i64>().is_ok()
}

const DEPENDENCY_CHILDREN: &[&str] = &["fileDependency", "flagDependency", "gameDependency", "fommDependency", "dependencies"];
const OPERATOR: &[(&str, ValueCheck)] = &[("operator", is_variant::<ConditionType>)];
const ORDER: &[(&str, ValueCheck)] = &[("order", is_variant::<Order>)];
const FILE_VALUES: &[(&str, ValueCheck)] = &[("priority", is_integer)];
const TYPE_NAME: &[(&str, ValueCheck)] = &[("name", is_variant::<OptionType>)];

const fn rule(tag: &'static str, children: &'static [&'static str]) -> Rule {
	Rule {
		tag,
		children,
		required_children: &[],
		required_attributes: &[],
		values: &[],
	}
}

const fn dependencies(tag: &'static str) -> Rule {
	Rule { values: OPERATOR, ..rule(tag, DEPENDENCY_CHILDREN) }
}

const RULES: &[Rule] = &[
	Rule {
		required_children: &["moduleName"],
		..rule("config", &["moduleName", "moduleImage", "moduleDependencies", "requiredInstallFiles", "installSteps", "conditionalFileInstalls"])
	},
	rule("moduleName", &[]),
	Rule { required_attributes: &["path"], ..rule("moduleImage", &[]) },
	dependencies("moduleDependencies"),
	dependencies("dependencies"),
	dependencies("visible"),
	Rule {
		required_attributes: &["file", "state"],
		values: &[("state", is_variant::<FileType>)],
		..rule("fileDependency", &[])
	},
	Rule { required_attributes: &["flag", "value"], ..rule("flagDependency", &[]) },
	Rule { required_attributes: &["version"], ..rule("gameDependency", &[]) },
	Rule { required_attributes: &["version"], ..rule("fommDependency", &[]) },
	rule("requiredInstallFiles", &["file", "folder"]),
	rule("files", &["file", "folder"]),
	Rule { required_attributes: &["source"], values: FILE_VALUES, ..rule("file", &[]) },
	Rule { required_attributes: &["source"], values: FILE_VALUES, ..rule("folder", &[]) },
	Rule {
		required_children: &["installStep"],
		required_attributes: &["order"],
		values: ORDER,
		..rule("installSteps", &["installStep"])
	},
	Rule {
		required_children: &["optionalFileGroups"],
		required_attributes: &["name"],
		..rule("installStep", &["visible", "optionalFileGroups"])
	},
	Rule { required_children: &["group"], values: ORDER, ..rule("optionalFileGroups", &["group"]) },
	Rule {
		required_children: &["plugins"],
		required_attributes: &["name", "type"],
		values: &[("type", is_variant::<GroupType>)],
		..rule("group", &["plugins"])
	},
	Rule { required_children: &["plugin"], values: ORDER, ..rule("plugins", &["plugin"]) },
	Rule {
		required_children: &["description", "typeDescriptor"],
		required_attributes: &["name"],
		..rule("plugin", &["description", "image", "files", "conditionFlags", "typeDescriptor"])
	},
	rule("description", &[]),
	Rule { required_attributes: &["path"], ..rule("image", &[]) },
	Rule { required_children: &["flag"], ..rule("conditionFlags", &["flag"]) },
	Rule { required_attributes: &["name"], ..rule("flag", &[]) },
	rule("typeDescriptor", &["dependencyType", "type"]),
	Rule { required_attributes: &["name"], values: TYPE_NAME, ..rule("type", &[]) },
	Rule { required_children: &["defaultType", "patterns"], ..rule("dependencyType", &["defaultType", "patterns"]) },
	Rule { required_attributes: &["name"], values: TYPE_NAME, ..rule("defaultType", &[]) },
	Rule { required_children: &["pattern"], ..rule("patterns", &["pattern"]) },
	Rule { required_children: &["dependencies"], ..rule("pattern", &["dependencies", "type", "files"]) },
	Rule { required_children: &["patterns"], ..rule("conditionalFileInstalls", &["patterns"]) },
];

fn find_rule(tag: &str) -> Option<&'static Rule> {
	RULES.iter().find(|r| r.tag == tag)
}

/// Checks an installer document, returning a description of every violation found.
pub(crate) fn check(doc: &Document) -> Vec<String> {
	let mut violations = Vec::new();
	let lines = LineIndex::new(doc.input_text());
	let line_of = |node: Node| lines.line_of(node);

	let root = doc.root_element();
	if root.tag_name().name() != "config" {
		violations.push(format!("line {}: the root element must be 'config'", line_of(root)));
		return violations;
	}

	for node in root.descendants().filter(|n| n.is_element()) {
		let tag = node.tag_name().name();
		let line = line_of(node);

		let Some(rule) = find_rule(tag) else {
			violations.push(format!("line {line}: '{tag}' is not a FOMOD element"));
			continue;
		};

		// Children of unknown elements were already reported through their parent.
		let parent_tag = node.parent_element().map(|p| p.tag_name().name()).unwrap_or_default();
		if let Some(parent_rule) = find_rule(parent_tag) {
			if !parent_rule.children.iter().any(|c| *c == tag) {
				violations.push(format!("line {line}: '{tag}' is not allowed inside '{parent_tag}'"));
			}
		}

		for attribute in rule.required_attributes {
			if node.attribute(*attribute).is_none() {
				violations.push(format!("line {line}: '{tag}' is missing the required '{attribute}' attribute"));
			}
		}

		for (attribute, is_valid) in rule.values {
			if let Some(value) = node.attribute(*attribute) {
				if !is_valid(value) {
					violations.push(format!("line {line}: '{value}' is not a valid value for '{tag}/@{attribute}'"));
				}
			}
		}

		for child in rule.required_children {
			if !node.children().any(|c| c.is_element() && c.tag_name().name() == *child) {
				violations.push(format!("line {line}: '{tag}' is missing the required '{child}' element"));
			}
		}
	}

	violations
}
