// Warnings :: Non-fatal issues found while parsing or linting a FOMOD tree.

use std::fmt::Display;

use itertools::Itertools;

use crate::enums::FomodEnum;

/// A recoverable, author-facing issue.
/// Parsing and linting collect these instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValidationWarning {
	/// Source line of the element this warning is about, if known.
	pub line: Option<u32>,
	pub title: String,
	pub message: String,

	/// Tag of the element this warning is about, if it concerns a single element.
	pub tag: Option<String>,

	/// Critical warnings describe something that changes how the package installs.
	pub critical: bool,
}

impl ValidationWarning {
	pub fn new(title: impl Into<String>, message: impl Into<String>, critical: bool) -> Self {
		Self {
			line: None,
			title: title.into(),
			message: message.into(),
			tag: None,
			critical,
		}
	}

	/// Attaches the element this warning is about.
	pub fn at(mut self, tag: &str, line: Option<u32>) -> Self {
		self.tag = Some(tag.to_owned());
		self.line = line;
		self
	}

	pub(crate) fn invalid_enum<E: FomodEnum>(tag: &str, actual: &str) -> Self {
		let values = E::VARIANTS.iter().map(|v| v.as_str()).join("', '");
		Self::new(
			format!("Invalid {}", E::NAME),
			format!(
				"{} was set to '{actual}' in tag '{tag}' but can only be one of: '{values}'. It was set to default '{}'.",
				E::NAME,
				E::first().as_str(),
			),
			true,
		)
	}

	pub(crate) fn default_attribute(tag: &str, attribute: &str, default: &str) -> Self {
		Self::new(
			format!("Missing {} Attribute", title_case(attribute)),
			format!("The '{attribute}' attribute on the '{tag}' tag is required. It was set to '{default}'."),
			true,
		)
	}

	pub(crate) fn required_attribute(tag: &str, attribute: &str) -> Self {
		Self::new(
			format!("Missing {} Attribute", title_case(attribute)),
			format!("The '{attribute}' attribute on the '{tag}' tag is required. This tag will be skipped."),
			true,
		)
	}

	pub(crate) fn invalid_priority(tag: &str, actual: &str) -> Self {
		Self::new(
			"Invalid Priority",
			format!("The priority on tag '{tag}' was set to '{actual}' but must be an integer. It was set to default '0'."),
			true,
		)
	}

	pub(crate) fn foreign_attribute(tag: &str, attribute: &str) -> Self {
		Self::new(
			"Foreign Attribute",
			format!("The attribute '{attribute}' on tag '{tag}' belongs to an unknown namespace and will be dropped."),
			false,
		)
	}

	pub(crate) fn comments_present() -> Self {
		Self::new("XML Comments Present", "There are comments in the fomod, they will be ignored.", true)
	}

	pub(crate) fn missing_info() -> Self {
		Self::new("Missing Info XML", "Info.xml is missing from the fomod subfolder.", false)
	}

	pub(crate) fn schema_violation(violations: &[String]) -> Self {
		Self::new(
			"Schema Violation",
			format!("The config document does not follow the FOMOD schema:\n{}", violations.join("\n")),
			true,
		)
	}
}

impl Display for ValidationWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if let Some(line) = self.line { write!(f, "[line {line}] ")?; }
		write!(f, "{}: {}", self.title, self.message)
	}
}

fn title_case(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
