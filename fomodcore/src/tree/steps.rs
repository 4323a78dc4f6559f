// InstallSteps :: Pages, the groups on them, and the options inside those groups.

use crate::{
	enums::{order_list, FomodEnum, GroupType, OptionType, Order},
	error::MutationError,
	render::{Attrs, Render, XmlWriter},
};

use super::{impl_element, impl_sequence, tags, Conditions, ElementMeta, Files, Flags};

/// The ordered pages of an installer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pages {
	pub(crate) meta: ElementMeta,

	/// The order pages are visited in. Stored order is never changed by this.
	pub order: Order,
	pages: Vec<Page>,
}

impl Default for Pages {
	fn default() -> Self {
		Self {
			meta: ElementMeta::default(),
			order: Order::Explicit,
			pages: Vec::new(),
		}
	}
}

impl Pages {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns every page in traversal order, alongside its stored index.
	pub fn ordered(&self) -> Vec<(usize, &Page)> {
		order_list(self.pages.iter().enumerate(), |(_, p)| p.name.as_str(), self.order)
	}
}

impl_sequence!(Pages, pages, Page);
impl_element!(Pages, |_: &Pages| tags::INSTALL_STEPS);

impl Render for Pages {
	fn write_xml(&self, w: &mut XmlWriter) {
		let attrs = Attrs::new()
			.with("order", self.order.as_str())
			.extend(&self.meta.attributes);

		w.element(tags::INSTALL_STEPS, attrs, |w| {
			for page in self.pages.iter() {
				w.child(page);
			}

			w.extras(&self.meta.extras);
		});
	}
}

/// A single screen of the installer wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
	pub(crate) meta: ElementMeta,
	pub name: String,
	conditions: Conditions,

	/// The order this page's groups are presented in.
	pub order: Order,
	groups: Vec<Group>,
}

impl Default for Page {
	fn default() -> Self {
		Self {
			meta: ElementMeta::default(),
			name: String::new(),
			conditions: Conditions::with_tag(tags::VISIBLE),
			order: Order::Explicit,
			groups: Vec::new(),
		}
	}
}

impl Page {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// The conditions that decide if this page is shown.
	pub fn conditions(&self) -> &Conditions {
		&self.conditions
	}

	pub fn conditions_mut(&mut self) -> &mut Conditions {
		&mut self.conditions
	}

	pub fn set_conditions(&mut self, mut conditions: Conditions) {
		conditions.tag = tags::VISIBLE;
		self.conditions = conditions;
	}

	/// Returns every group in presentation order, alongside its stored index.
	pub fn ordered_groups(&self) -> Vec<(usize, &Group)> {
		order_list(self.groups.iter().enumerate(), |(_, g)| g.name.as_str(), self.order)
	}
}

impl_sequence!(Page, groups, Group);
impl_element!(Page, |_: &Page| tags::INSTALL_STEP);

impl Render for Page {
	fn write_xml(&self, w: &mut XmlWriter) {
		let attrs = Attrs::new()
			.with("name", &self.name)
			.extend(&self.meta.attributes);

		w.element(tags::INSTALL_STEP, attrs, |w| {
			if !self.conditions.is_empty() { w.child(&self.conditions); }

			w.element(tags::GROUPS, Attrs::new().with("order", self.order.as_str()), |w| {
				for group in self.groups.iter() {
					w.child(group);
				}
			});

			w.extras(&self.meta.extras);
		});
	}
}

/// A set of options sharing a selection rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
	pub(crate) meta: ElementMeta,
	pub name: String,
	pub group_type: GroupType,

	/// The order this group's options are presented in.
	pub order: Order,
	plugins: Vec<Plugin>,
}

impl Default for Group {
	fn default() -> Self {
		Self {
			meta: ElementMeta::default(),
			name: String::new(),
			group_type: GroupType::AtLeastOne,
			order: Order::Explicit,
			plugins: Vec::new(),
		}
	}
}

impl Group {
	pub fn new(name: impl Into<String>, group_type: GroupType) -> Self {
		Self {
			name: name.into(),
			group_type,
			..Self::default()
		}
	}

	/// Returns every option in presentation order, alongside its stored index.
	pub fn ordered_plugins(&self) -> Vec<(usize, &Plugin)> {
		order_list(self.plugins.iter().enumerate(), |(_, p)| p.name.as_str(), self.order)
	}
}

impl_sequence!(Group, plugins, Plugin);
impl_element!(Group, |_: &Group| tags::GROUP);

impl Render for Group {
	fn write_xml(&self, w: &mut XmlWriter) {
		let attrs = Attrs::new()
			.with("name", &self.name)
			.with("type", self.group_type.as_str())
			.extend(&self.meta.attributes);

		w.element(tags::GROUP, attrs, |w| {
			w.element(tags::PLUGINS, Attrs::new().with("order", self.order.as_str()), |w| {
				for plugin in self.plugins.iter() {
					w.child(plugin);
				}
			});

			w.extras(&self.meta.extras);
		});
	}
}

/// How an option's type is decided.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PluginType {
	/// The type never changes.
	Static(OptionType),

	/// The type depends on conditions, which are checked whenever the option is shown.
	Conditional(DependencyType),
}

impl Default for PluginType {
	fn default() -> Self {
		PluginType::Static(OptionType::Optional)
	}
}

/// A single selectable option, called a plugin by the format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plugin {
	pub(crate) meta: ElementMeta,
	pub name: String,
	pub description: String,

	/// Path to this option's image, inside the package. Empty if it has none.
	pub image: String,
	files: Files,

	/// Flags set when this option is selected.
	pub flags: Flags,
	pub plugin_type: PluginType,
}

impl Plugin {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_type(mut self, plugin_type: PluginType) -> Self {
		self.plugin_type = plugin_type;
		self
	}

	/// Files installed when this option is selected.
	pub fn files(&self) -> &Files {
		&self.files
	}

	pub fn files_mut(&mut self) -> &mut Files {
		&mut self.files
	}

	pub fn set_files(&mut self, mut files: Files) {
		files.tag = tags::FILES;
		self.files = files;
	}
}

impl_element!(Plugin, |_: &Plugin| tags::PLUGIN);

impl Render for Plugin {
	fn write_xml(&self, w: &mut XmlWriter) {
		let attrs = Attrs::new()
			.with("name", &self.name)
			.extend(&self.meta.attributes);

		w.element(tags::PLUGIN, attrs, |w| {
			w.leaf(tags::DESCRIPTION, Attrs::new(), &self.description);
			if !self.image.is_empty() { w.leaf(tags::IMAGE, Attrs::new().with("path", &self.image), ""); }
			if !self.files.is_empty() { w.child(&self.files); }
			if !self.flags.is_empty() { w.child(&self.flags); }

			w.element(tags::TYPE_DESCRIPTOR, Attrs::new(), |w| match &self.plugin_type {
				PluginType::Static(option_type) => w.leaf(tags::TYPE, Attrs::new().with("name", option_type.as_str()), ""),
				PluginType::Conditional(dependency_type) => w.child(dependency_type),
			});

			w.extras(&self.meta.extras);
		});
	}
}

/// A conditional option type.
/// The first pattern whose conditions hold decides the type, otherwise the default applies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DependencyType {
	pub(crate) meta: ElementMeta,
	pub default: OptionType,
	patterns: Vec<(Conditions, OptionType)>,
}

impl DependencyType {
	pub fn new(default: OptionType) -> Self {
		Self {
			default,
			..Self::default()
		}
	}

	pub fn push(&mut self, mut conditions: Conditions, option_type: OptionType) {
		conditions.tag = tags::DEPENDENCIES;
		self.patterns.push((conditions, option_type));
	}

	pub fn get(&self, index: usize) -> Option<(&Conditions, OptionType)> {
		self.patterns.get(index).map(|(c, t)| (c, *t))
	}

	pub fn remove(&mut self, index: usize) -> Result<(Conditions, OptionType), MutationError> {
		let len = self.patterns.len();
		if index >= len { return Err(MutationError::IndexOutOfRange { index, len }); }

		Ok(self.patterns.remove(index))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Conditions, OptionType)> + '_ {
		self.patterns.iter().map(|(c, t)| (c, *t))
	}

	pub fn len(&self) -> usize {
		self.patterns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}
}

impl_element!(DependencyType, |_: &DependencyType| tags::DEPENDENCY_TYPE);

impl Render for DependencyType {
	fn write_xml(&self, w: &mut XmlWriter) {
		w.element(tags::DEPENDENCY_TYPE, Attrs::new().extend(&self.meta.attributes), |w| {
			w.leaf(tags::DEFAULT_TYPE, Attrs::new().with("name", self.default.as_str()), "");

			w.element(tags::PATTERNS, Attrs::new(), |w| {
				for (conditions, option_type) in self.patterns.iter() {
					w.element(tags::PATTERN, Attrs::new(), |w| {
						w.child(conditions);
						w.leaf(tags::TYPE, Attrs::new().with("name", option_type.as_str()), "");
					});
				}
			});

			w.extras(&self.meta.extras);
		});
	}
}
