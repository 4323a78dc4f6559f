// FomodTree :: The typed document model of a FOMOD installer.
// Every entity is owned by its parent, all the way up to a single *Root*.

use indexmap::IndexMap;

/// The tag names a FOMOD document uses for its elements.
pub mod tags {
	pub const CONFIG: &str = "config";
	pub const INFO: &str = "fomod";
	pub const MODULE_NAME: &str = "moduleName";
	pub const MODULE_IMAGE: &str = "moduleImage";
	pub const MODULE_DEPENDENCIES: &str = "moduleDependencies";
	pub const REQUIRED_FILES: &str = "requiredInstallFiles";
	pub const INSTALL_STEPS: &str = "installSteps";
	pub const INSTALL_STEP: &str = "installStep";
	pub const VISIBLE: &str = "visible";
	pub const GROUPS: &str = "optionalFileGroups";
	pub const GROUP: &str = "group";
	pub const PLUGINS: &str = "plugins";
	pub const PLUGIN: &str = "plugin";
	pub const DESCRIPTION: &str = "description";
	pub const IMAGE: &str = "image";
	pub const FILES: &str = "files";
	pub const FILE: &str = "file";
	pub const FOLDER: &str = "folder";
	pub const CONDITION_FLAGS: &str = "conditionFlags";
	pub const FLAG: &str = "flag";
	pub const TYPE_DESCRIPTOR: &str = "typeDescriptor";
	pub const TYPE: &str = "type";
	pub const DEPENDENCY_TYPE: &str = "dependencyType";
	pub const DEFAULT_TYPE: &str = "defaultType";
	pub const PATTERNS: &str = "patterns";
	pub const PATTERN: &str = "pattern";
	pub const DEPENDENCIES: &str = "dependencies";
	pub const GAME_DEPENDENCY: &str = "gameDependency";
	pub const FLAG_DEPENDENCY: &str = "flagDependency";
	pub const FILE_DEPENDENCY: &str = "fileDependency";
	pub const FILE_PATTERNS: &str = "conditionalFileInstalls";
}

/// An unrecognized child element, kept so it survives a round trip.
/// Only its attributes and text are kept, anything nested inside it is discarded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Opaque {
	pub attributes: IndexMap<String, String>,
	pub text: String,
}

impl Opaque {
	pub fn with_text(text: impl Into<String>) -> Self {
		Self {
			attributes: IndexMap::new(),
			text: text.into(),
		}
	}
}

/// Data every element carries besides its own fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementMeta {
	/// The line this element started on in its source document.
	pub line: Option<u32>,

	/// Attributes this element had that aren't part of the format.
	pub attributes: IndexMap<String, String>,

	/// Children this element had that aren't part of the format, keyed by tag.
	pub extras: IndexMap<String, Opaque>,
}

/// Read access shared by every entity, mostly used for diagnostics.
pub trait Element {
	fn meta(&self) -> &ElementMeta;
	fn meta_mut(&mut self) -> &mut ElementMeta;

	/// The tag this entity renders as.
	fn tag(&self) -> &str;

	fn line(&self) -> Option<u32> {
		self.meta().line
	}
}

macro_rules! impl_element {
	($ty:ty, $tag:expr) => {
		impl $crate::tree::Element for $ty {
			fn meta(&self) -> &$crate::tree::ElementMeta {
				&self.meta
			}

			fn meta_mut(&mut self) -> &mut $crate::tree::ElementMeta {
				&mut self.meta
			}

			fn tag(&self) -> &str {
				$tag(self)
			}
		}
	};
}

/// Generates index-based sequence methods for an entity that owns an ordered list of children.
macro_rules! impl_sequence {
	($ty:ty, $field:ident, $item:ty) => {
		impl $ty {
			pub fn get(&self, index: usize) -> Option<&$item> {
				self.$field.get(index)
			}

			pub fn get_mut(&mut self, index: usize) -> Option<&mut $item> {
				self.$field.get_mut(index)
			}

			/// Replaces the item at `index`, returning the old one.
			pub fn set(&mut self, index: usize, item: $item) -> Result<$item, $crate::error::MutationError> {
				let len = self.$field.len();
				match self.$field.get_mut(index) {
					Some(slot) => Ok(std::mem::replace(slot, item)),
					None => Err($crate::error::MutationError::IndexOutOfRange { index, len }),
				}
			}

			/// Inserts an item at `index`, shifting everything after it.
			/// An index equal to the length appends.
			pub fn insert(&mut self, index: usize, item: $item) -> Result<(), $crate::error::MutationError> {
				let len = self.$field.len();
				if index > len { return Err($crate::error::MutationError::IndexOutOfRange { index, len }); }

				self.$field.insert(index, item);
				Ok(())
			}

			pub fn push(&mut self, item: $item) {
				self.$field.push(item);
			}

			pub fn remove(&mut self, index: usize) -> Result<$item, $crate::error::MutationError> {
				let len = self.$field.len();
				if index >= len { return Err($crate::error::MutationError::IndexOutOfRange { index, len }); }

				Ok(self.$field.remove(index))
			}

			pub fn iter(&self) -> std::slice::Iter<'_, $item> {
				self.$field.iter()
			}

			pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, $item> {
				self.$field.iter_mut()
			}

			pub fn len(&self) -> usize {
				self.$field.len()
			}

			pub fn is_empty(&self) -> bool {
				self.$field.is_empty()
			}
		}

		impl<'a> IntoIterator for &'a $ty {
			type Item = &'a $item;
			type IntoIter = std::slice::Iter<'a, $item>;

			fn into_iter(self) -> Self::IntoIter {
				self.$field.iter()
			}
		}
	};
}

pub(crate) use impl_element;
pub(crate) use impl_sequence;

mod dependencies;
mod files;
mod root;
mod steps;

pub use dependencies::{Condition, ConditionKey, ConditionValue, Conditions};
pub use files::{FileEntry, FileKind, Files, FilePatterns, Flags};
pub use root::{Info, Root};
pub use steps::{DependencyType, Group, Page, Pages, Plugin, PluginType};
