// InstallerEngine :: Walks a FOMOD tree like an install wizard, and computes what it would install.
// Nothing is ever copied, the result is a plan mapping destinations to sources.

use std::{
	fs,
	path::{Path, PathBuf},
};

use indexmap::IndexMap;
use itertools::Itertools;
use walkdir::WalkDir;

use crate::{
	conditions::{evaluate, Predicates},
	enums::{FileType, GroupType, OptionType},
	error::InstallerError,
	tree::{FileEntry, FileKind, Group, Page, Plugin, PluginType, Root},
};

type FileStateFn<'a> = dyn Fn(&str) -> Option<FileType> + 'a;

/// Outside information an installer checks conditions against.
#[derive(Default)]
pub struct InstallerConfig<'a> {
	/// The package folder. Folder sources are expanded against this.
	pub path: Option<PathBuf>,

	/// The current game version. Without one, every version requirement passes.
	pub game_version: Option<String>,

	/// Reports the state of a file. Without one, every file requirement passes.
	pub file_state: Option<Box<FileStateFn<'a>>>,
}

impl<'a> InstallerConfig<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.path = Some(path.into());
		self
	}

	pub fn with_game_version(mut self, version: impl Into<String>) -> Self {
		self.game_version = Some(version.into());
		self
	}

	pub fn with_file_state(mut self, file_state: impl Fn(&str) -> Option<FileType> + 'a) -> Self {
		self.file_state = Some(Box::new(file_state));
		self
	}
}

/// A selected option, identified by its group's index on the page and its own index in that group.
/// Both indices are in stored order, so sorting selections puts them in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Selection {
	pub group: usize,
	pub option: usize,
}

impl Selection {
	pub fn new(group: usize, option: usize) -> Self {
		Self { group, option }
	}
}

/// Where an installer currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallerState {
	NotStarted,

	/// Showing a page, by its position in traversal order.
	OnPage(usize),
	Finished,
}

/// A page the user completed, and what they selected on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
	/// Stored index of the page.
	pub page: usize,
	pub selections: Vec<Selection>,
	position: usize,
}

/// A single entry of an install plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFile {
	/// Path inside the package.
	pub source: PathBuf,
	pub kind: FileKind,
	pub priority: i32,
}

/// The install wizard.
/// It only borrows its tree, so the tree can't change while an installation is in progress.
pub struct Installer<'a> {
	root: &'a Root,
	config: InstallerConfig<'a>,

	/// Stored page indices, in traversal order.
	order: Vec<usize>,
	state: InstallerState,
	history: Vec<Step>,
}

impl<'a> Installer<'a> {
	/// Starts an installation, failing if the package can't be installed at all.
	pub fn new(root: &'a Root, config: InstallerConfig<'a>) -> Result<Self, InstallerError> {
		let order = root.pages.ordered()
			.into_iter()
			.map(|(index, _)| index)
			.collect();

		let installer = Self {
			root,
			config,
			order,
			state: InstallerState::NotStarted,
			history: Vec::new(),
		};

		evaluate(root.conditions(), &installer.context())?;

		debug!("Started installer for '{}'.", root.name);
		Ok(installer)
	}

	pub fn root(&self) -> &'a Root {
		self.root
	}

	pub fn state(&self) -> InstallerState {
		self.state
	}

	pub fn is_finished(&self) -> bool {
		self.state == InstallerState::Finished
	}

	/// Every completed page, oldest first.
	pub fn history(&self) -> &[Step] {
		&self.history
	}

	pub fn current_page(&self) -> Option<&'a Page> {
		match self.state {
			InstallerState::OnPage(position) => self.page_at(position),
			_ => None,
		}
	}

	fn page_at(&self, position: usize) -> Option<&'a Page> {
		let root = self.root;
		self.order.get(position).and_then(|&index| root.pages.get(index))
	}

	/// Submits the selections for the current page and moves on to the next visible page.
	///
	/// The first call only shows the first page, whether or not its own conditions hold.
	/// Returns `None` once no pages remain. A failed call changes nothing.
	pub fn advance(&mut self, selections: &[Selection]) -> Result<Option<&'a Page>, InstallerError> {
		let position = match self.state {
			InstallerState::Finished => return Ok(None),
			InstallerState::NotStarted => {
				let first = self.page_at(0);
				self.state = match first {
					Some(_) => InstallerState::OnPage(0),
					None => InstallerState::Finished,
				};

				return Ok(first);
			},

			InstallerState::OnPage(position) => position,
		};

		let Some(page) = self.page_at(position) else {
			self.state = InstallerState::Finished;
			return Ok(None);
		};

		let selections = self.check_selections(page, selections)?;
		self.history.push(Step { page: self.order[position], selections, position });

		let context = self.context();
		let next = (position + 1..self.order.len())
			.find(|&p| self.page_at(p).is_some_and(|page| evaluate(page.conditions(), &context).is_ok()));

		match next {
			Some(next) => {
				self.state = InstallerState::OnPage(next);
				let page = self.page_at(next);
				if let Some(page) = page { debug!("Moved to page '{}'.", page.name); }

				Ok(page)
			},

			None => {
				self.state = InstallerState::Finished;
				debug!("No visible pages remain.");
				Ok(None)
			},
		}
	}

	/// Goes back to the most recently completed page, returning it with the selections made on it.
	/// Without any history, this resets the installer and returns `None`.
	pub fn retreat(&mut self) -> Option<(&'a Page, Vec<Selection>)> {
		let Some(step) = self.history.pop() else {
			self.state = InstallerState::NotStarted;
			return None;
		};

		self.state = InstallerState::OnPage(step.position);
		self.page_at(step.position).map(|page| (page, step.selections))
	}

	/// Returns the type an option has under the current flags.
	pub fn plugin_type(&self, plugin: &Plugin) -> OptionType {
		self.effective_type(plugin, &self.context())
	}

	fn effective_type(&self, plugin: &Plugin, context: &Context) -> OptionType {
		match &plugin.plugin_type {
			PluginType::Static(option_type) => *option_type,
			PluginType::Conditional(dependency_type) => dependency_type.iter()
				.find(|(conditions, _)| evaluate(conditions, context).is_ok())
				.map(|(_, option_type)| option_type)
				.unwrap_or(dependency_type.default),
		}
	}

	/// Validates selections against a page, returning them sorted into declaration order.
	fn check_selections(&self, page: &Page, selections: &[Selection]) -> Result<Vec<Selection>, InstallerError> {
		let selections = selections.iter().copied().sorted().dedup().collect_vec();

		let unknown = selections.iter()
			.filter_map(|s| match page.get(s.group) {
				None => Some(format!("Group {} does not exist on page '{}'.", s.group, page.name)),
				Some(group) if group.get(s.option).is_none() => Some(format!("Option {} does not exist in group '{}'.", s.option, group.name)),
				Some(_) => None,
			})
			.collect_vec();

		if !unknown.is_empty() { return Err(InstallerError::selection(unknown)); }

		let context = self.context();
		let mut problems = Vec::new();

		for (group_index, group) in page.iter().enumerate() {
			let chosen = selections.iter()
				.filter(|s| s.group == group_index)
				.map(|s| s.option)
				.collect_vec();

			if let Some(problem) = check_cardinality(group, chosen.len()) { problems.push(problem); }

			for (option_index, plugin) in group.iter().enumerate() {
				let selected = chosen.contains(&option_index);

				match (self.effective_type(plugin, &context), selected) {
					(OptionType::Required, false) => problems.push(format!("Option '{}' in group '{}' is required but was not selected.", plugin.name, group.name)),
					(OptionType::NotUsable, true) => problems.push(format!("Option '{}' in group '{}' is not usable but was selected.", plugin.name, group.name)),
					_ => {},
				}
			}
		}

		match problems.is_empty() {
			true => Ok(selections),
			false => Err(InstallerError::selection(problems)),
		}
	}

	/// Every option selected so far, in history order and declaration order within a page.
	fn selected_plugins(&self) -> impl Iterator<Item = &'a Plugin> + '_ {
		let root = self.root;

		self.history.iter().flat_map(move |step| {
			step.selections.iter().filter_map(move |s| {
				root.pages.get(step.page)?
					.get(s.group)?
					.get(s.option)
			})
		})
	}

	/// Merges the flags of every selected option, with later options overwriting earlier ones.
	pub fn resolve_flags(&self) -> IndexMap<String, String> {
		let mut flags = IndexMap::new();

		for plugin in self.selected_plugins() {
			for (name, value) in plugin.flags.iter() {
				flags.insert(name.clone(), value.clone());
			}
		}

		flags
	}

	/// Computes the install plan, mapping each destination to the source that wins it.
	///
	/// Required files come first, then the files of selected options, then the file patterns whose conditions hold.
	/// An entry replaces an earlier one with the same destination unless the earlier one has a strictly higher priority.
	pub fn resolve_files(&self) -> IndexMap<PathBuf, ResolvedFile> {
		let context = self.context();

		let pattern_files = self.root.file_patterns
			.iter()
			.filter(|(conditions, _)| evaluate(conditions, &context).is_ok())
			.flat_map(|(_, files)| files.iter());

		let entries = self.root.files()
			.iter()
			.chain(self.selected_plugins().flat_map(|p| p.files().iter()))
			.chain(pattern_files);

		let mut plan: IndexMap<PathBuf, ResolvedFile> = IndexMap::new();
		for (destination, file) in entries.flat_map(|e| self.expand(e)) {
			match plan.get(&destination) {
				Some(existing) if existing.priority > file.priority => {},
				_ => { plan.insert(destination, file); },
			}
		}

		plan
	}

	/// Turns an entry into one plan entry per file, expanding folders that exist inside the package.
	fn expand(&self, entry: &FileEntry) -> Vec<(PathBuf, ResolvedFile)> {
		let source = normalize(&entry.source);
		let destination = entry.destination
			.as_deref()
			.map(normalize)
			.unwrap_or_else(|| source.clone());

		let whole = vec![(destination.clone(), ResolvedFile { source: source.clone(), kind: entry.kind, priority: entry.priority })];

		let Some(base) = self.config.path.as_deref() else { return whole };
		let folder = base.join(&source);

		if entry.kind != FileKind::Folder || !folder.is_dir() { return whole; }

		let mut expanded = Vec::new();
		for item in WalkDir::new(&folder).min_depth(1).sort_by_file_name() {
			let item = match item {
				Ok(item) => item,
				Err(error) => {
					warn!("Failed to read part of '{}': {error}", folder.display());
					continue;
				},
			};

			let kind = match item.file_type().is_dir() {
				true if is_empty_dir(item.path()) => FileKind::Folder,
				true => continue,
				false => FileKind::File,
			};

			let Ok(relative) = item.path().strip_prefix(&folder) else { continue };
			expanded.push((destination.join(relative), ResolvedFile {
				source: source.join(relative),
				kind,
				priority: entry.priority,
			}));
		}

		debug!("Expanded folder '{}' into {} entries.", source.display(), expanded.len());

		match expanded.is_empty() {
			true => whole,
			false => expanded,
		}
	}

	fn context(&self) -> Context<'_> {
		Context {
			game_version: self.config.game_version.as_deref(),
			file_state: self.config.file_state.as_deref(),
			flags: self.resolve_flags(),
		}
	}
}

/// The state conditions are checked against while installing.
struct Context<'c> {
	game_version: Option<&'c str>,
	file_state: Option<&'c FileStateFn<'c>>,
	flags: IndexMap<String, String>,
}

impl Predicates for Context<'_> {
	fn game_version(&self) -> Option<&str> {
		self.game_version
	}

	fn flag_value(&self, name: &str) -> Option<String> {
		self.flags.get(name).cloned()
	}

	fn checks_files(&self) -> bool {
		self.file_state.is_some()
	}

	fn file_state(&self, path: &str) -> Option<FileType> {
		self.file_state.and_then(|f| f(path))
	}
}

fn check_cardinality(group: &Group, count: usize) -> Option<String> {
	let rule = match group.group_type {
		GroupType::Any => return None,
		GroupType::All if count == group.len() => return None,
		GroupType::ExactlyOne if count == 1 => return None,
		GroupType::AtLeastOne if count >= 1 => return None,
		GroupType::AtMostOne if count <= 1 => return None,

		GroupType::All => format!("all {} options", group.len()),
		GroupType::ExactlyOne => "exactly one option".to_owned(),
		GroupType::AtLeastOne => "at least one option".to_owned(),
		GroupType::AtMostOne => "at most one option".to_owned(),
	};

	Some(format!("Group '{}' requires {rule} to be selected, but {count} were.", group.name))
}

/// Turns a package path into a relative path, treating both kinds of slash as separators.
fn normalize(path: &str) -> PathBuf {
	path.split(['/', '\\'])
		.filter(|part| !part.is_empty() && *part != ".")
		.collect()
}

fn is_empty_dir(path: &Path) -> bool {
	fs::read_dir(path).is_ok_and(|mut entries| entries.next().is_none())
}
