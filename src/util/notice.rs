//! This module provides the *Notice* struct, which is used for pretty-printing warnings, errors, or other messages to users.

use std::{fmt::Display, io};

use fomodcore::{InstallerError, ParseError, ValidationWarning};

use crate::{prelude::*, util::text::TextStyle};

use super::text::TextColor;

/// Notices allow you to easily pretty-print warning, errors, and other various information.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Notice {
	color: TextColor,
	prefix: String,
	header: String,
	fields: Vec<(String, String)>,
}

/// Presets to use while making a notice, allowing you to quickly recreate common forms of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoticePreset {
	/// A red notice with the prefix "ERROR".
	Error,

	/// A yellow notice with the prefix "WARN".
	Warning,

	/// A green notice with the prefix "DONE".
	Success,

	/// A cyan notice with the prefix "STATS".
	Statistics,
}

impl Notice {
	/// Builds a new notice from raw components.
	pub fn new(color: TextColor, prefix: &str, header: &str) -> Self {
		Self {
			color,
			prefix: prefix.to_owned(),
			header: header.to_owned(),
			fields: Vec::new(),
		}
	}

	/// Builds a new notice from a preset and a header.
	pub fn from_preset(preset: NoticePreset, header: &str) -> Self {
		match preset {
			NoticePreset::Error => Notice::new(TextColor::Red, "ERROR", header),
			NoticePreset::Warning => Notice::new(TextColor::Yellow, "WARN", header),
			NoticePreset::Success => Notice::new(TextColor::Green, "DONE", header),
			NoticePreset::Statistics => Notice::new(TextColor::Cyan, "STATS", header),
		}
	}

	/// Adds a new field to this notice, which will be printed after any other fields.
	/// A field will be presented in the form of `"{label}: {content}"`.
	pub fn add_field(mut self, label: &str, content: &str) -> Self {
		self.fields.push((label.to_owned(), content.to_owned()));
		self
	}

	/// Convenience method to allow printing a notice at the end of a dot-call chain.
	pub fn print(self) {
		println!("{self}");
	}
}

impl Display for Notice {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let title = format!("[{} - {}]", self.prefix, self.header).stylize(Some(TextStyle::Bold), Some(self.color), None);
		writeln!(f, "{title}")?;

		for (label, content) in self.fields.iter() {
			let formatted_label = format!("  {label}: ").stylize(Some(TextStyle::Bold), Some(self.color), None);
			writeln!(f, "{formatted_label}{content}")?;
		}

		Ok(())
	}
}

// Beyond this point is just conversions into notices.

impl From<AppError> for Notice {
	fn from(value: AppError) -> Self {
		match value {
			AppError::IO(error) => error.into(),
			AppError::Parse(error) => error.into(),
			AppError::Install(error) => error.into(),
			AppError::Custom(notice) => notice,
		}
	}
}

impl From<io::Error> for Notice {
	fn from(value: io::Error) -> Self {
		let notice = Notice::from_preset(NoticePreset::Error, "IO");

		match value.kind() {
			io::ErrorKind::NotFound => notice
				.add_field("Description", "A file or folder the package needs doesn't exist.")
				.add_field("Details", &value.to_string())
				.add_field("Suggestion", "Point Fomodcrab at the package folder, or at its 'fomod' folder."),

			io::ErrorKind::PermissionDenied => notice
				.add_field("Description", "Fomodcrab tried to access a file, but it didn't have the right permissions.")
				.add_field("Suggestion", "Ensure you have full permissions for all files in this package."),

			_ => notice
				.add_field("Description", "An unknown error has occurred!")
				.add_field("Details", &value.to_string()),
		}
	}
}

impl From<ParseError> for Notice {
	fn from(value: ParseError) -> Self {
		let notice = Notice::from_preset(NoticePreset::Error, "Parse");

		match value {
			ParseError::Io(error) => error.into(),

			ParseError::Xml { document, source } => notice
				.add_field("Description", &format!("The {document} document is not valid XML."))
				.add_field("Details", &source.to_string()),

			ParseError::Encoding(document) => notice
				.add_field("Description", &format!("The {document} document uses an unsupported text encoding."))
				.add_field("Suggestion", "Save the document as UTF-8, or as UTF-16 with a byte-order mark."),

			ParseError::NotFomod { expected, found } => notice
				.add_field("Description", &format!("Expected a '{expected}' root element, but found '{found}'."))
				.add_field("Suggestion", "Ensure the package's documents are FOMOD documents and weren't swapped."),

			ParseError::Schema(violations) => notice
				.add_field("Description", "The config document violates the FOMOD schema.")
				.pipe(|n| violations.iter().fold(n, |n, v| n.add_field("Violation", v))),
		}
	}
}

impl From<InstallerError> for Notice {
	fn from(value: InstallerError) -> Self {
		let notice = Notice::from_preset(NoticePreset::Error, "Install");

		match value {
			InstallerError::InvalidSelection(message) => notice
				.add_field("Description", "Those selections break the rules of this page.")
				.add_field("Details", &message),

			InstallerError::FailedCondition(failure) => notice
				.add_field("Description", "This package can't be installed.")
				.pipe(|n| failure.messages().into_iter().fold(n, |n, m| n.add_field("Unmet", m))),
		}
	}
}

impl From<ValidationWarning> for Notice {
	fn from(value: ValidationWarning) -> Self {
		let preset = match value.critical {
			true => NoticePreset::Error,
			false => NoticePreset::Warning,
		};

		Notice::from_preset(preset, &value.title)
			.add_field("Description", &value.message)
			.pipe(|n| match (value.tag.as_deref(), value.line) {
				(Some(tag), Some(line)) => n.add_field("Element", &format!("<{tag}> on line {line}")),
				(Some(tag), None) => n.add_field("Element", &format!("<{tag}>")),
				_ => n,
			})
	}
}
