// Root :: The top of a FOMOD tree, and the metadata stored beside it.

use indexmap::IndexMap;

use crate::{
	installer::{Installer, InstallerConfig},
	error::InstallerError,
	render::{Attrs, Render, XmlWriter},
};

use super::{impl_element, tags, Conditions, ElementMeta, FilePatterns, Files, Opaque, Pages};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str = "http://qconsulting.ca/fo3/ModConfig5.0.xsd";

/// The free-form metadata stored in a package's 'info.xml'.
/// Keys are matched case-insensitively, and any key is kept, not only the well-known ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Info {
	pub(crate) meta: ElementMeta,
	entries: IndexMap<String, Opaque>,
}

impl Info {
	pub fn new() -> Self {
		Self::default()
	}

	fn key_of(&self, key: &str) -> Option<&String> {
		self.entries.keys().find(|k| k.eq_ignore_ascii_case(key))
	}

	/// Returns the text stored under a key, or an empty string if there is none.
	pub fn get_text(&self, key: &str) -> &str {
		self.key_of(key)
			.and_then(|k| self.entries.get(k))
			.map(|o| o.text.as_str())
			.unwrap_or("")
	}

	/// Sets the text of a key, keeping the spelling of an existing key.
	pub fn set_text(&mut self, key: &str, text: impl Into<String>) {
		match self.key_of(key).cloned() {
			Some(existing) => {
				if let Some(entry) = self.entries.get_mut(&existing) { entry.text = text.into(); }
			},

			None => { self.entries.insert(key.to_owned(), Opaque::with_text(text)); },
		}
	}

	pub fn remove(&mut self, key: &str) -> Option<String> {
		let existing = self.key_of(key)?.clone();
		self.entries.shift_remove(&existing).map(|o| o.text)
	}

	/// Iterates over every key and its text, in document order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.text.as_str()))
	}

	pub(crate) fn insert_raw(&mut self, key: String, value: Opaque) {
		self.entries.insert(key, value);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl_element!(Info, |_: &Info| tags::INFO);

impl Render for Info {
	fn write_xml(&self, w: &mut XmlWriter) {
		// Prefixed attributes kept from the document need their namespace declared again.
		let uses_xsi = self.meta.attributes.keys()
			.chain(self.entries.values().flat_map(|e| e.attributes.keys()))
			.any(|k| k.starts_with("xsi:"));
		let attrs = match uses_xsi {
			true => Attrs::new().with("xmlns:xsi", XSI_NAMESPACE),
			false => Attrs::new(),
		};

		w.element(tags::INFO, attrs.extend(&self.meta.attributes), |w| w.extras(&self.entries));
	}
}

/// The root of a FOMOD tree, holding everything from both 'info.xml' and 'ModuleConfig.xml'.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Root {
	pub(crate) meta: ElementMeta,
	pub(crate) info: Info,

	/// The installer's name.
	pub name: String,
	pub(crate) name_meta: ElementMeta,

	/// Path to the installer's image, inside the package.
	pub image: Option<String>,
	pub(crate) image_meta: ElementMeta,

	conditions: Conditions,
	files: Files,

	/// The wizard's pages.
	pub pages: Pages,

	/// Files installed whenever their conditions hold.
	pub file_patterns: FilePatterns,
}

impl Default for Root {
	fn default() -> Self {
		Self {
			meta: ElementMeta::default(),
			info: Info::default(),
			name: String::new(),
			name_meta: ElementMeta::default(),
			image: None,
			image_meta: ElementMeta::default(),
			conditions: Conditions::with_tag(tags::MODULE_DEPENDENCIES),
			files: Files::with_tag(tags::REQUIRED_FILES),
			pages: Pages::default(),
			file_patterns: FilePatterns::default(),
		}
	}
}

impl Root {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn info(&self) -> &Info {
		&self.info
	}

	pub fn info_mut(&mut self) -> &mut Info {
		&mut self.info
	}

	pub fn author(&self) -> &str {
		self.info.get_text("Author")
	}

	pub fn set_author(&mut self, author: impl Into<String>) {
		self.info.set_text("Author", author);
	}

	pub fn version(&self) -> &str {
		self.info.get_text("Version")
	}

	pub fn set_version(&mut self, version: impl Into<String>) {
		self.info.set_text("Version", version);
	}

	pub fn description(&self) -> &str {
		self.info.get_text("Description")
	}

	pub fn set_description(&mut self, description: impl Into<String>) {
		self.info.set_text("Description", description);
	}

	pub fn website(&self) -> &str {
		self.info.get_text("Website")
	}

	pub fn set_website(&mut self, website: impl Into<String>) {
		self.info.set_text("Website", website);
	}

	/// The conditions a game must meet for this package to be installable at all.
	pub fn conditions(&self) -> &Conditions {
		&self.conditions
	}

	pub fn conditions_mut(&mut self) -> &mut Conditions {
		&mut self.conditions
	}

	pub fn set_conditions(&mut self, mut conditions: Conditions) {
		conditions.tag = tags::MODULE_DEPENDENCIES;
		self.conditions = conditions;
	}

	/// Files installed no matter what the user selects.
	pub fn files(&self) -> &Files {
		&self.files
	}

	pub fn files_mut(&mut self) -> &mut Files {
		&mut self.files
	}

	pub fn set_files(&mut self, mut files: Files) {
		files.tag = tags::REQUIRED_FILES;
		self.files = files;
	}

	/// Starts an installer over this tree.
	pub fn installer<'a>(&'a self, config: InstallerConfig<'a>) -> Result<Installer<'a>, InstallerError> {
		Installer::new(self, config)
	}
}

impl_element!(Root, |_: &Root| tags::CONFIG);

impl Render for Root {
	fn write_xml(&self, w: &mut XmlWriter) {
		let attrs = Attrs::new()
			.with("xmlns:xsi", XSI_NAMESPACE)
			.with("xsi:noNamespaceSchemaLocation", SCHEMA_LOCATION)
			.extend(&self.meta.attributes);

		w.element(tags::CONFIG, attrs, |w| {
			w.leaf(tags::MODULE_NAME, Attrs::new().extend(&self.name_meta.attributes), &self.name);

			if let Some(image) = self.image.as_deref() {
				let attrs = Attrs::new()
					.with("path", image)
					.extend(&self.image_meta.attributes);

				w.leaf(tags::MODULE_IMAGE, attrs, "");
			}

			if !self.conditions.is_empty() { w.child(&self.conditions); }
			if !self.files.is_empty() { w.child(&self.files); }
			if !self.pages.is_empty() { w.child(&self.pages); }
			if !self.file_patterns.is_empty() { w.child(&self.file_patterns); }

			w.extras(&self.meta.extras);
		});
	}
}
