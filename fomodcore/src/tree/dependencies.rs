// Dependencies :: Boolean condition trees over game versions, flags and file states.

use crate::{
	enums::{ConditionType, FileType, FomodEnum},
	error::MutationError,
	render::{Attrs, Render, XmlWriter},
};

use super::{impl_element, tags, ElementMeta};

/// A node of a condition tree.
///
/// Entries are kept in insertion order and their keys are unique.
/// There can be at most one game version entry, flag and file entries share one key space,
/// and every nested node counts as its own key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conditions {
	pub(crate) meta: ElementMeta,
	pub(crate) tag: &'static str,

	/// How this node's entries are combined.
	pub operator: ConditionType,
	entries: Vec<Condition>,
}

/// A single entry in a *Conditions* node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
	/// The game must be at least this version.
	Version(String),

	/// A flag must currently hold this value.
	Flag { name: String, value: String },

	/// A file must be in this state.
	File { path: String, state: FileType },

	/// A sub-expression with its own operator.
	Nested(Conditions),
}

impl Condition {
	/// Returns the string key of a flag or file entry.
	pub fn key(&self) -> Option<&str> {
		match self {
			Condition::Flag { name, .. } => Some(name),
			Condition::File { path, .. } => Some(path),
			_ => None,
		}
	}
}

/// A dynamically-shaped key for *Conditions::set*.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionKey {
	/// The game version key, which requires a text value.
	Version,

	/// A flag name or file path, which requires a text value or a file state.
	Name(String),

	/// A nested node, which requires no value.
	Nested(Conditions),
}

/// A dynamically-shaped value for *Conditions::set*.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionValue {
	Text(String),
	State(FileType),
}

impl Default for Conditions {
	fn default() -> Self {
		Self::with_tag(tags::DEPENDENCIES)
	}
}

impl Conditions {
	pub fn new(operator: ConditionType) -> Self {
		Self {
			operator,
			..Self::default()
		}
	}

	pub(crate) fn with_tag(tag: &'static str) -> Self {
		Self {
			meta: ElementMeta::default(),
			tag,
			operator: ConditionType::default(),
			entries: Vec::new(),
		}
	}

	/// Inserts an entry, replacing the entry with the same key in place.
	/// Returns the replaced entry, if there was one.
	pub fn insert(&mut self, mut condition: Condition) -> Option<Condition> {
		let existing = match &condition {
			Condition::Version(_) => self.entries.iter().position(|c| matches!(c, Condition::Version(_))),
			Condition::Nested(_) => None,
			other => {
				let key = other.key();
				self.entries.iter().position(|c| c.key().is_some() && c.key() == key)
			},
		};

		if let Condition::Nested(ref mut nested) = condition { nested.tag = tags::DEPENDENCIES; }

		match existing {
			Some(index) => Some(std::mem::replace(&mut self.entries[index], condition)),
			None => {
				self.entries.push(condition);
				None
			},
		}
	}

	pub fn set_version(&mut self, version: impl Into<String>) -> Option<Condition> {
		self.insert(Condition::Version(version.into()))
	}

	pub fn set_flag(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<Condition> {
		self.insert(Condition::Flag { name: name.into(), value: value.into() })
	}

	pub fn set_file(&mut self, path: impl Into<String>, state: FileType) -> Option<Condition> {
		self.insert(Condition::File { path: path.into(), state })
	}

	/// Appends a nested node.
	pub fn push_nested(&mut self, nested: Conditions) {
		self.insert(Condition::Nested(nested));
	}

	/// Inserts an entry from a key and value whose shapes are only known at runtime.
	/// Invalid shapes are rejected, and leave this node unchanged.
	pub fn set(&mut self, key: ConditionKey, value: Option<ConditionValue>) -> Result<(), MutationError> {
		let condition = match (key, value) {
			(ConditionKey::Version, Some(ConditionValue::Text(version))) => Condition::Version(version),
			(ConditionKey::Name(name), Some(ConditionValue::Text(value))) => Condition::Flag { name, value },
			(ConditionKey::Name(path), Some(ConditionValue::State(state))) => Condition::File { path, state },
			(ConditionKey::Nested(nested), None) => Condition::Nested(nested),

			(ConditionKey::Version, _) => return Err(MutationError::Shape("a game version key requires a text value".into())),
			(ConditionKey::Name(name), None) => return Err(MutationError::Shape(format!("the key '{name}' requires a text or file state value"))),
			(ConditionKey::Nested(_), Some(_)) => return Err(MutationError::Shape("a nested conditions key can't have a value".into())),
		};

		self.insert(condition);
		Ok(())
	}

	/// Returns the required game version, if this node has one.
	pub fn version(&self) -> Option<&str> {
		self.entries.iter().find_map(|c| match c {
			Condition::Version(version) => Some(version.as_str()),
			_ => None,
		})
	}

	/// Returns the entry stored under a flag name or file path.
	pub fn get(&self, key: &str) -> Option<&Condition> {
		self.entries.iter().find(|c| c.key() == Some(key))
	}

	/// Removes the entry stored under a flag name or file path.
	pub fn remove(&mut self, key: &str) -> Option<Condition> {
		let index = self.entries.iter().position(|c| c.key() == Some(key))?;
		Some(self.entries.remove(index))
	}

	pub fn remove_version(&mut self) -> Option<String> {
		let index = self.entries.iter().position(|c| matches!(c, Condition::Version(_)))?;
		match self.entries.remove(index) {
			Condition::Version(version) => Some(version),
			_ => None,
		}
	}

	/// Removes an entry by position, which is the only way to remove a nested node.
	pub fn remove_at(&mut self, index: usize) -> Result<Condition, MutationError> {
		let len = self.entries.len();
		if index >= len { return Err(MutationError::IndexOutOfRange { index, len }); }

		Ok(self.entries.remove(index))
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<'a> IntoIterator for &'a Conditions {
	type Item = &'a Condition;
	type IntoIter = std::slice::Iter<'a, Condition>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl_element!(Conditions, |c: &Conditions| c.tag);

impl Render for Conditions {
	fn write_xml(&self, w: &mut XmlWriter) {
		let attrs = Attrs::new()
			.with("operator", self.operator.as_str())
			.extend(&self.meta.attributes);

		w.element(self.tag, attrs, |w| {
			for condition in self.entries.iter() {
				match condition {
					Condition::Version(version) => w.leaf(tags::GAME_DEPENDENCY, Attrs::new().with("version", version), ""),

					Condition::Flag { name, value } => {
						let attrs = Attrs::new().with("flag", name).with("value", value);
						w.leaf(tags::FLAG_DEPENDENCY, attrs, "");
					},

					Condition::File { path, state } => {
						let attrs = Attrs::new().with("file", path).with("state", state.as_str());
						w.leaf(tags::FILE_DEPENDENCY, attrs, "");
					},

					Condition::Nested(nested) => w.child(nested),
				}
			}

			w.extras(&self.meta.extras);
		});
	}
}
