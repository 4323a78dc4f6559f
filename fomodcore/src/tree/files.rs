// Files :: File lists, flag maps, and conditional file installs.

use indexmap::IndexMap;

use crate::{
	error::MutationError,
	render::{Attrs, Render, XmlWriter},
};

use super::{impl_element, tags, Conditions, ElementMeta};

/// Separators that may end a folder's source path.
const SEPARATORS: [char; 2] = ['/', '\\'];

/// Whether a file entry copies a single file or a whole folder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileKind {
	#[default]
	File,
	Folder,
}

impl FileKind {
	pub fn tag(&self) -> &'static str {
		match self {
			FileKind::File => tags::FILE,
			FileKind::Folder => tags::FOLDER,
		}
	}
}

/// A single file or folder to install.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileEntry {
	pub(crate) meta: ElementMeta,
	pub kind: FileKind,

	/// Path inside the package.
	pub source: String,

	/// Path inside the install root.
	/// When absent, the destination is the same as the source.
	pub destination: Option<String>,

	/// Entries with a higher priority win when two of them share a destination.
	pub priority: i32,
}

impl FileEntry {
	pub fn new(kind: FileKind, source: impl Into<String>, destination: Option<String>) -> Self {
		Self {
			kind,
			source: source.into(),
			destination,
			..Self::default()
		}
	}

	pub fn with_priority(mut self, priority: i32) -> Self {
		self.priority = priority;
		self
	}
}

impl_element!(FileEntry, |f: &FileEntry| f.kind.tag());

impl Render for FileEntry {
	fn write_xml(&self, w: &mut XmlWriter) {
		let priority = self.priority.to_string();
		let attrs = Attrs::new()
			.with("source", &self.source)
			.with_opt("destination", self.destination.as_deref())
			.with_opt("priority", (self.priority != 0).then_some(priority.as_str()))
			.extend(&self.meta.attributes);

		w.element(self.kind.tag(), attrs, |w| w.extras(&self.meta.extras));
	}
}

/// An ordered mapping of sources to destinations.
///
/// A source inserted with a trailing separator becomes a folder entry, and is stored without it.
/// Lookups accept either spelling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Files {
	pub(crate) meta: ElementMeta,
	pub(crate) tag: &'static str,
	entries: Vec<FileEntry>,
}

impl Default for Files {
	fn default() -> Self {
		Self::with_tag(tags::FILES)
	}
}

impl Files {
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with_tag(tag: &'static str) -> Self {
		Self {
			meta: ElementMeta::default(),
			tag,
			entries: Vec::new(),
		}
	}

	fn position(&self, key: &str) -> Option<usize> {
		self.entries.iter()
			.position(|e| e.source == key)
			.or_else(|| {
				let stripped = key.strip_suffix(SEPARATORS)?;
				self.entries.iter().position(|e| e.source == stripped)
			})
	}

	/// Maps a source to a destination.
	/// An existing entry keeps its kind and priority, otherwise a trailing separator makes a new folder entry.
	pub fn insert(&mut self, key: &str, destination: impl Into<String>) {
		let destination = Some(destination.into());

		if let Some(index) = self.entries.iter().position(|e| e.source == key) {
			self.entries[index].destination = destination;
			return;
		}

		let entry = match key.strip_suffix(SEPARATORS) {
			Some(stripped) => FileEntry::new(FileKind::Folder, stripped, destination),
			None => FileEntry::new(FileKind::File, key, destination),
		};

		self.push(entry);
	}

	/// Adds a fully-built entry, replacing any entry with the same source.
	pub fn push(&mut self, entry: FileEntry) {
		match self.entries.iter_mut().find(|e| e.source == entry.source) {
			Some(existing) => *existing = entry,
			None => self.entries.push(entry),
		}
	}

	pub fn get(&self, key: &str) -> Option<&FileEntry> {
		self.position(key).map(|i| &self.entries[i])
	}

	pub fn get_mut(&mut self, key: &str) -> Option<&mut FileEntry> {
		self.position(key).map(|i| &mut self.entries[i])
	}

	/// Returns the destination of a source, if it has one.
	pub fn destination(&self, key: &str) -> Option<&str> {
		self.get(key)?.destination.as_deref()
	}

	pub fn contains(&self, key: &str) -> bool {
		self.position(key).is_some()
	}

	pub fn remove(&mut self, key: &str) -> Option<FileEntry> {
		let index = self.position(key)?;
		Some(self.entries.remove(index))
	}

	/// Returns every source, with a trailing '/' on folders.
	pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
		self.entries.iter().map(|e| match e.kind {
			FileKind::Folder if !e.source.ends_with(SEPARATORS) => format!("{}/", e.source),
			_ => e.source.clone(),
		})
	}

	pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
		self.entries.iter()
	}

	pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, FileEntry> {
		self.entries.iter_mut()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<'a> IntoIterator for &'a Files {
	type Item = &'a FileEntry;
	type IntoIter = std::slice::Iter<'a, FileEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl_element!(Files, |f: &Files| f.tag);

impl Render for Files {
	fn write_xml(&self, w: &mut XmlWriter) {
		w.element(self.tag, Attrs::new().extend(&self.meta.attributes), |w| {
			for entry in self.entries.iter() {
				w.child(entry);
			}

			w.extras(&self.meta.extras);
		});
	}
}

/// An ordered map of flag names to the values a selected option sets them to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flags {
	pub(crate) meta: ElementMeta,
	map: IndexMap<String, String>,
}

impl Flags {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a flag, returning its previous value.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.map.insert(name.into(), value.into())
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.map.get(name).map(String::as_str)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.map.contains_key(name)
	}

	pub fn remove(&mut self, name: &str) -> Option<String> {
		self.map.shift_remove(name)
	}

	pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
		self.map.iter()
	}

	pub fn len(&self) -> usize {
		self.map.len()
	}

	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}
}

impl<'a> IntoIterator for &'a Flags {
	type Item = (&'a String, &'a String);
	type IntoIter = indexmap::map::Iter<'a, String, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.map.iter()
	}
}

impl_element!(Flags, |_: &Flags| tags::CONDITION_FLAGS);

impl Render for Flags {
	fn write_xml(&self, w: &mut XmlWriter) {
		w.element(tags::CONDITION_FLAGS, Attrs::new().extend(&self.meta.attributes), |w| {
			for (name, value) in self.map.iter() {
				w.leaf(tags::FLAG, Attrs::new().with("name", name), value);
			}

			w.extras(&self.meta.extras);
		});
	}
}

/// Files that are installed whenever their conditions hold, regardless of what the user selected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilePatterns {
	pub(crate) meta: ElementMeta,
	patterns: Vec<(Conditions, Files)>,
}

impl FilePatterns {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a pattern, stamping the tags a pattern's children render with.
	pub fn push(&mut self, mut conditions: Conditions, mut files: Files) {
		conditions.tag = tags::DEPENDENCIES;
		files.tag = tags::FILES;
		self.patterns.push((conditions, files));
	}

	pub fn get(&self, index: usize) -> Option<(&Conditions, &Files)> {
		self.patterns.get(index).map(|(c, f)| (c, f))
	}

	pub fn get_mut(&mut self, index: usize) -> Option<(&mut Conditions, &mut Files)> {
		self.patterns.get_mut(index).map(|(c, f)| (c, f))
	}

	pub fn remove(&mut self, index: usize) -> Result<(Conditions, Files), MutationError> {
		let len = self.patterns.len();
		if index >= len { return Err(MutationError::IndexOutOfRange { index, len }); }

		Ok(self.patterns.remove(index))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Conditions, &Files)> + '_ {
		self.patterns.iter().map(|(c, f)| (c, f))
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}
}

impl_element!(FilePatterns, |_: &FilePatterns| tags::FILE_PATTERNS);

impl Render for FilePatterns {
	fn write_xml(&self, w: &mut XmlWriter) {
		w.element(tags::FILE_PATTERNS, Attrs::new().extend(&self.meta.attributes), |w| {
			w.element(tags::PATTERNS, Attrs::new(), |w| {
				for (conditions, files) in self.patterns.iter() {
					w.element(tags::PATTERN, Attrs::new(), |w| {
						w.child(conditions);
						w.child(files);
					});
				}
			});

			w.extras(&self.meta.extras);
		});
	}
}
