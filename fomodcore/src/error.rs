// Errors :: Every fatal error FomodCore can return.

use std::{fmt::Display, io};

use itertools::Itertools;
use thiserror::Error;

/// Error returned when a document can't be turned into a tree at all.
#[derive(Error, Debug)]
pub enum ParseError {
	/// A document couldn't be read, or a package's files couldn't be located.
	#[error(transparent)]
	Io(#[from] io::Error),

	/// A document is not well-formed XML.
	#[error("the {document} document is malformed: {source}")]
	Xml {
		document: &'static str,
		source: roxmltree::Error,
	},

	/// A document uses an encoding that isn't UTF-8 or UTF-16 with a byte-order mark.
	#[error("the {0} document is neither UTF-8 nor UTF-16 with a byte-order mark")]
	Encoding(&'static str),

	/// A document's root element isn't the one its role requires.
	#[error("expected a '{expected}' root element, but found '{found}'")]
	NotFomod {
		expected: &'static str,
		found: String,
	},

	/// Strict parsing found schema violations and was told to fail on them.
	#[error("the config document violates the FOMOD schema:\n{}", .0.join("\n"))]
	Schema(Vec<String>),
}

/// Error returned by a mutator that was given a value it can't accept.
/// The tree is always left unchanged when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
	/// The key and value have shapes that can't be stored together.
	#[error("invalid key/value shape: {0}")]
	Shape(String),

	/// An index-based mutator was given an index past the end of its sequence.
	#[error("index {index} is out of range for a sequence of length {len}")]
	IndexOutOfRange { index: usize, len: usize },
}

/// Error returned when parsing an enumeration from a string that isn't one of its variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{value}' is not a valid {enumeration}")]
pub struct UnknownVariant {
	pub enumeration: &'static str,
	pub value: String,
}

/// A single condition that didn't hold.
/// Failures caused by a nested *Conditions* node carry that node's own failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionFailure {
	pub message: String,
	pub nested: Vec<ConditionFailure>,
}

impl ConditionFailure {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			nested: Vec::new(),
		}
	}

	fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
		writeln!(f, "{}- {}", "  ".repeat(depth), self.message)?;
		for failure in self.nested.iter() {
			failure.write_indented(f, depth + 1)?;
		}

		Ok(())
	}
}

/// Error returned when a *Conditions* node evaluates to false.
/// Its display form is an indented, multi-line description of everything that failed.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct FailedCondition {
	pub failures: Vec<ConditionFailure>,
}

impl FailedCondition {
	/// Returns every failure message, depth-first, without any indentation.
	pub fn messages(&self) -> Vec<&str> {
		fn collect<'a>(failures: &'a [ConditionFailure], out: &mut Vec<&'a str>) {
			for failure in failures {
				out.push(&failure.message);
				collect(&failure.nested, out);
			}
		}

		let mut out = Vec::new();
		collect(&self.failures, &mut out);
		out
	}
}

impl Display for FailedCondition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "The following conditions were not met:")?;
		for failure in self.failures.iter() {
			failure.write_indented(f, 1)?;
		}

		Ok(())
	}
}

/// Error returned by the installer engine.
/// The engine's state is never changed when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstallerError {
	/// The selections given to *Installer::advance* break a group's rules or an option's type.
	#[error("invalid selection: {0}")]
	InvalidSelection(String),

	/// A condition that gates the installation didn't hold.
	#[error(transparent)]
	FailedCondition(#[from] FailedCondition),
}

impl InstallerError {
	pub(crate) fn selection(messages: impl IntoIterator<Item = String>) -> Self {
		Self::InvalidSelection(messages.into_iter().join(" "))
	}
}
