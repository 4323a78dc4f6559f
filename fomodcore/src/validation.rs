// Linter :: Checks a FOMOD tree for authoring mistakes.
// Nothing here ever fails, every finding is reported as a *ValidationWarning*.

use crate::{
	enums::{GroupType, OptionType, Order},
	tree::{
		tags, Condition, Conditions, DependencyType, Element, FileEntry, FilePatterns, Files, Flags, Group, Page, Pages,
		Plugin, PluginType, Root,
	},
	warnings::ValidationWarning,
};

/// Hooks called for every entity of a tree, in document order.
/// Implement only the hooks you need, and push any findings into `out`.
#[allow(unused_variables)]
pub trait Visitor {
	fn visit_root(&mut self, root: &Root, out: &mut Vec<ValidationWarning>) {}
	fn visit_conditions(&mut self, conditions: &Conditions, out: &mut Vec<ValidationWarning>) {}
	fn visit_files(&mut self, files: &Files, out: &mut Vec<ValidationWarning>) {}
	fn visit_file_entry(&mut self, entry: &FileEntry, out: &mut Vec<ValidationWarning>) {}
	fn visit_pages(&mut self, pages: &Pages, out: &mut Vec<ValidationWarning>) {}
	fn visit_page(&mut self, page: &Page, out: &mut Vec<ValidationWarning>) {}
	fn visit_group(&mut self, group: &Group, out: &mut Vec<ValidationWarning>) {}
	fn visit_plugin(&mut self, plugin: &Plugin, out: &mut Vec<ValidationWarning>) {}
	fn visit_flags(&mut self, flags: &Flags, out: &mut Vec<ValidationWarning>) {}
	fn visit_dependency_type(&mut self, dependency_type: &DependencyType, out: &mut Vec<ValidationWarning>) {}
	fn visit_file_patterns(&mut self, file_patterns: &FilePatterns, out: &mut Vec<ValidationWarning>) {}

	/// Called once the whole tree was visited.
	fn finish(&mut self, out: &mut Vec<ValidationWarning>) {}
}

/// Lints a tree with the built-in checks.
pub fn validate(root: &Root) -> Vec<ValidationWarning> {
	validate_with(root, &mut [])
}

/// Lints a tree with the built-in checks, then runs every extra visitor over it.
pub fn validate_with(root: &Root, extra: &mut [&mut dyn Visitor]) -> Vec<ValidationWarning> {
	let mut out = Vec::new();

	walk(root, &mut Linter::default(), &mut out);
	for visitor in extra.iter_mut() {
		walk(root, &mut **visitor, &mut out);
	}

	debug!("Linting '{}' found {} warnings.", root.name, out.len());
	out
}

/// Visits every entity of a tree.
/// Module and page conditions are only visited when they have entries.
pub fn walk(root: &Root, visitor: &mut (impl Visitor + ?Sized), out: &mut Vec<ValidationWarning>) {
	visitor.visit_root(root, out);

	if !root.conditions().is_empty() { walk_conditions(root.conditions(), visitor, out); }
	if !root.files().is_empty() { walk_files(root.files(), visitor, out); }

	if !root.pages.is_empty() {
		visitor.visit_pages(&root.pages, out);

		for page in root.pages.iter() {
			visitor.visit_page(page, out);
			if !page.conditions().is_empty() { walk_conditions(page.conditions(), visitor, out); }

			for group in page.iter() {
				visitor.visit_group(group, out);
				for plugin in group.iter() { walk_plugin(plugin, visitor, out); }
			}
		}
	}

	if !root.file_patterns.is_empty() {
		visitor.visit_file_patterns(&root.file_patterns, out);

		for (conditions, files) in root.file_patterns.iter() {
			walk_conditions(conditions, visitor, out);
			walk_files(files, visitor, out);
		}
	}

	visitor.finish(out);
}

fn walk_plugin(plugin: &Plugin, visitor: &mut (impl Visitor + ?Sized), out: &mut Vec<ValidationWarning>) {
	visitor.visit_plugin(plugin, out);

	if !plugin.files().is_empty() { walk_files(plugin.files(), visitor, out); }
	if !plugin.flags.is_empty() { visitor.visit_flags(&plugin.flags, out); }

	if let PluginType::Conditional(dependency_type) = &plugin.plugin_type {
		visitor.visit_dependency_type(dependency_type, out);
		for (conditions, _) in dependency_type.iter() { walk_conditions(conditions, visitor, out); }
	}
}

fn walk_conditions(conditions: &Conditions, visitor: &mut (impl Visitor + ?Sized), out: &mut Vec<ValidationWarning>) {
	visitor.visit_conditions(conditions, out);

	for condition in conditions.iter() {
		if let Condition::Nested(nested) = condition { walk_conditions(nested, visitor, out); }
	}
}

fn walk_files(files: &Files, visitor: &mut (impl Visitor + ?Sized), out: &mut Vec<ValidationWarning>) {
	visitor.visit_files(files, out);
	for entry in files.iter() { visitor.visit_file_entry(entry, out); }
}

/// The built-in checks.
#[derive(Default)]
struct Linter {
	/// Every flag some option sets.
	set_flags: Vec<String>,

	/// Every flag some condition checks, with the element checking it.
	checked_flags: Vec<(String, &'static str, Option<u32>)>,
}

fn warn_at(element: &impl Element, title: &str, message: impl Into<String>, critical: bool) -> ValidationWarning {
	ValidationWarning::new(title, message, critical).at(element.tag(), element.line())
}

fn check_order(element: &impl Element, order: Order, out: &mut Vec<ValidationWarning>) {
	if order == Order::Explicit { return; }

	out.push(warn_at(
		element,
		"Non Explicit Order",
		format!("This element has {order} order, which reorders the child elements during installation. Use Explicit order to avoid this."),
		false,
	));
}

/// Whether an option is, or could become, a certain type.
fn may_be(plugin: &Plugin, option_type: OptionType) -> bool {
	match &plugin.plugin_type {
		PluginType::Static(t) => *t == option_type,
		PluginType::Conditional(dependency_type) => dependency_type.iter().any(|(_, t)| t == option_type),
	}
}

impl Visitor for Linter {
	fn visit_root(&mut self, root: &Root, out: &mut Vec<ValidationWarning>) {
		if root.name.is_empty() {
			out.push(ValidationWarning::new("Missing Installer Name", "This fomod does not have a name.", false)
				.at(tags::MODULE_NAME, root.line()));
		}

		if root.files().is_empty() && root.pages.is_empty() && root.file_patterns.is_empty() {
			out.push(warn_at(root, "Empty Fomod Tree", "This fomod is empty, nothing will be installed.", false));
		}
	}

	fn visit_conditions(&mut self, conditions: &Conditions, out: &mut Vec<ValidationWarning>) {
		if conditions.is_empty() {
			out.push(warn_at(conditions, "Empty Conditions", "This element should have at least one condition present.", false));
		}

		let at_module = conditions.tag() == tags::MODULE_DEPENDENCIES;

		for condition in conditions.iter() {
			match condition {
				Condition::Version(version) if version.is_empty() => {
					out.push(warn_at(conditions, "Empty Version Dependency", "This version dependency is empty.", false));
				},

				Condition::File { path, .. } if path.is_empty() => {
					out.push(warn_at(conditions, "Empty File Dependency", "This file dependency depends on no file, may not work correctly.", false));
				},

				Condition::Flag { name, .. } => match at_module {
					true => out.push(warn_at(
						conditions,
						"Impossible Flag",
						format!("Flag {name} shouldn't be used here since it can't have been set."),
						true,
					)),

					false => self.checked_flags.push((name.clone(), conditions.tag, conditions.line())),
				},

				_ => {},
			}
		}
	}

	fn visit_file_entry(&mut self, entry: &FileEntry, out: &mut Vec<ValidationWarning>) {
		if entry.source.is_empty() {
			out.push(warn_at(entry, "Empty Source Field", "No source specified, this could lead to problems installing.", true));
		}

		if entry.destination.is_none() {
			out.push(warn_at(
				entry,
				"Missing Destination Field",
				"If omitted, the destination is the same as the source. This may not be intended.",
				false,
			));
		}
	}

	fn visit_pages(&mut self, pages: &Pages, out: &mut Vec<ValidationWarning>) {
		check_order(pages, pages.order, out);
	}

	fn visit_page(&mut self, page: &Page, out: &mut Vec<ValidationWarning>) {
		if page.is_empty() { out.push(warn_at(page, "Empty Page", "This page is empty.", false)); }
		if page.name.is_empty() { out.push(warn_at(page, "Empty Page Name", "This page has no name.", false)); }
		check_order(page, page.order, out);
	}

	fn visit_group(&mut self, group: &Group, out: &mut Vec<ValidationWarning>) {
		if group.is_empty() { out.push(warn_at(group, "Empty Group", "This group is empty.", false)); }
		if group.name.is_empty() { out.push(warn_at(group, "Empty Group Name", "This group has no name.", false)); }
		check_order(group, group.order, out);

		let required = group.iter().filter(|p| may_be(p, OptionType::Required)).count();
		let not_usable = group.iter()
			.filter(|p| !may_be(p, OptionType::Required) && may_be(p, OptionType::NotUsable))
			.count();

		let (title, message) = match group.group_type {
			GroupType::AtLeastOne if not_usable == group.len() => (
				"Not Enough Selectable Options",
				"This group needs at least one selectable option but none are available.",
			),

			GroupType::ExactlyOne if not_usable == group.len() => (
				"Not Enough Selectable Options",
				"This group needs exactly one selectable option but none are available.",
			),

			GroupType::AtMostOne if required >= 2 => (
				"Too Many Required Options",
				"This group can have one option selected at most but at least two are required.",
			),

			GroupType::ExactlyOne if required >= 2 => (
				"Too Many Required Options",
				"This group can only have exactly one option selected but at least two are required.",
			),

			_ => return,
		};

		out.push(warn_at(group, title, message, true));
	}

	fn visit_plugin(&mut self, plugin: &Plugin, out: &mut Vec<ValidationWarning>) {
		if plugin.name.is_empty() { out.push(warn_at(plugin, "Empty Option Name", "This option has no name.", false)); }

		if plugin.description.is_empty() {
			out.push(warn_at(plugin, "Empty Option Description", "This option has no description.", false));
		}

		if plugin.files().is_empty() && plugin.flags.is_empty() {
			out.push(warn_at(plugin, "Option Does Nothing", "This option installs no files and sets no flags.", false));
		}
	}

	fn visit_flags(&mut self, flags: &Flags, _: &mut Vec<ValidationWarning>) {
		self.set_flags.extend(flags.iter().map(|(name, _)| name.clone()));
	}

	fn visit_dependency_type(&mut self, dependency_type: &DependencyType, out: &mut Vec<ValidationWarning>) {
		if dependency_type.is_empty() {
			out.push(warn_at(dependency_type, "Empty Type Descriptor", "This type descriptor is empty and will never set a type.", true));
		}
	}

	fn finish(&mut self, out: &mut Vec<ValidationWarning>) {
		for (name, tag, line) in self.checked_flags.drain(..) {
			if self.set_flags.contains(&name) { continue; }

			out.push(ValidationWarning::new("Impossible Flag", format!("The flag '{name}' is never created or set."), true)
				.at(tag, line));
		}
	}
}
