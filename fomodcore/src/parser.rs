// FomodParser :: Builds FOMOD trees from their XML documents, and writes them back out.
// Building is driven by open/close events, with a stack of frames standing in for parent links.

use std::{
	fs,
	io::{self, Read, Write},
	path::{Path, PathBuf},
};

use indexmap::IndexMap;
use roxmltree::{Document, Node};
use tap::prelude::*;

use crate::{
	enums::{ConditionType, FileType, FomodEnum, OptionType, Order},
	error::ParseError,
	io::{find_file, locate_fomod_dir, locate_package_files, CONFIG_FILE, FOMOD_DIR, INFO_FILE},
	render::Render,
	schema,
	tree::{
		tags, Condition, Conditions, DependencyType, ElementMeta, FileEntry, FileKind, FilePatterns, Files, Flags,
		Group, Info, Opaque, Page, Pages, Plugin, PluginType, Root,
	},
	warnings::ValidationWarning,
};

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Where the documents of a package are read from.
pub enum Source {
	/// A package folder, or its 'fomod' folder.
	Package(PathBuf),

	/// Explicit paths to both documents.
	Paths { info: Option<PathBuf>, config: PathBuf },

	/// Already opened documents.
	Readers { info: Option<Box<dyn Read>>, config: Box<dyn Read> },

	/// Documents that are already in memory.
	Text { info: Option<String>, config: String },
}

/// Where the documents of a package are written to.
pub enum Destination<'a> {
	/// A package folder. Its 'fomod' folder is created if missing, and existing document names are reused.
	Package(&'a Path),
	Paths { info: &'a Path, config: &'a Path },
	Writers { info: &'a mut dyn Write, config: &'a mut dyn Write },
}

/// Options that change how strictly documents are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
	/// Checks the installer document against the FOMOD schema before building the tree.
	pub strict: bool,

	/// Turns schema violations into an error instead of a warning. Only used with *strict*.
	pub fail_on_schema_error: bool,
}

impl ParseOptions {
	pub fn strict() -> Self {
		Self { strict: true, fail_on_schema_error: false }
	}
}

/// A parsed tree, along with every issue found while building it.
#[derive(Clone, Debug)]
pub struct Parsed {
	pub root: Root,
	pub warnings: Vec<ValidationWarning>,
}

/// Reads and builds a FOMOD tree.
pub fn parse(source: Source, options: &ParseOptions) -> Result<Parsed, ParseError> {
	let (info, config) = read_source(source)?;
	parse_text(info.as_deref(), &config, options)
}

/// Builds a FOMOD tree from documents that are already decoded.
pub fn parse_text(info: Option<&str>, config: &str, options: &ParseOptions) -> Result<Parsed, ParseError> {
	let config_doc = Document::parse(config)
		.map_err(|source| ParseError::Xml { document: "config", source })?;

	let mut warnings = Vec::new();

	if options.strict {
		let violations = schema::check(&config_doc);
		match (violations.is_empty(), options.fail_on_schema_error) {
			(true, _) => {},
			(false, true) => return Err(ParseError::Schema(violations)),
			(false, false) => warnings.push(ValidationWarning::schema_violation(&violations)),
		}
	}

	let mut builder = Builder::new(&config_doc, warnings);
	let mut root = builder.build_config()?;
	let mut comments = builder.comments;
	let mut warnings = builder.warnings;

	match info {
		Some(info) => {
			let info_doc = Document::parse(info)
				.map_err(|source| ParseError::Xml { document: "info", source })?;

			let mut builder = Builder::new(&info_doc, warnings);
			root.info = builder.build_info()?;
			comments |= builder.comments;
			warnings = builder.warnings;
		},

		None => warnings.push(ValidationWarning::missing_info()),
	}

	if comments { warnings.push(ValidationWarning::comments_present()); }

	debug!("Parsed installer '{}' with {} warning(s).", root.name, warnings.len());
	Ok(Parsed { root, warnings })
}

/// Writes a tree's two documents.
pub fn write(root: &Root, destination: Destination) -> io::Result<()> {
	let info = root.info().render();
	let config = root.render();

	match destination {
		Destination::Package(path) => {
			let dir = match locate_fomod_dir(path) {
				Ok(dir) => dir,
				Err(_) if path.is_dir() => {
					let dir = path.join(FOMOD_DIR);
					debug!("Creating '{}'.", dir.display());
					fs::create_dir(&dir)?;
					dir
				},

				Err(error) => return Err(error),
			};

			let info_path = find_file(&dir, INFO_FILE)?.unwrap_or_else(|| dir.join(INFO_FILE));
			let config_path = find_file(&dir, CONFIG_FILE)?.unwrap_or_else(|| dir.join(CONFIG_FILE));

			fs::write(info_path, info)?;
			fs::write(config_path, config)
		},

		Destination::Paths { info: info_path, config: config_path } => {
			fs::write(info_path, info)?;
			fs::write(config_path, config)
		},

		Destination::Writers { info: info_writer, config: config_writer } => {
			info_writer.write_all(info.as_bytes())?;
			config_writer.write_all(config.as_bytes())
		},
	}
}

fn read_source(source: Source) -> Result<(Option<String>, String), ParseError> {
	match source {
		Source::Package(path) => {
			let (info, config) = locate_package_files(path)?;
			Ok((Some(decode(&fs::read(info)?, "info")?), decode(&fs::read(config)?, "config")?))
		},

		Source::Paths { info, config } => {
			let info = match info {
				Some(path) => Some(decode(&fs::read(path)?, "info")?),
				None => None,
			};

			Ok((info, decode(&fs::read(config)?, "config")?))
		},

		Source::Readers { info, mut config } => {
			let info = match info {
				Some(mut reader) => Some(read_all(&mut reader, "info")?),
				None => None,
			};

			Ok((info, read_all(&mut config, "config")?))
		},

		Source::Text { info, config } => Ok((info, config)),
	}
}

fn read_all(reader: &mut dyn Read, document: &'static str) -> Result<String, ParseError> {
	let mut bytes = Vec::new();
	reader.read_to_end(&mut bytes)?;
	decode(&bytes, document)
}

/// Decodes a document as UTF-8, or as UTF-16 when it starts with a byte-order mark.
fn decode(bytes: &[u8], document: &'static str) -> Result<String, ParseError> {
	let utf16 = |rest: &[u8], from_bytes: fn([u8; 2]) -> u16| {
		if rest.len() % 2 != 0 { return Err(ParseError::Encoding(document)); }

		let units: Vec<u16> = rest.chunks_exact(2)
			.map(|c| from_bytes([c[0], c[1]]))
			.collect();

		String::from_utf16(&units).map_err(|_| ParseError::Encoding(document))
	};

	match bytes {
		[0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
		[0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
		[0xEF, 0xBB, 0xBF, rest @ ..] | rest => std::str::from_utf8(rest)
			.map(str::to_owned)
			.map_err(|_| ParseError::Encoding(document)),
	}
}

/// A pattern that is still being built.
/// Conditional types and conditional file installs share this until the pattern closes.
#[derive(Default)]
struct PendingPattern {
	conditions: Conditions,
	files: Files,
	option_type: OptionType,
}

/// Something on the builder's stack, one per open element.
enum Frame {
	Root(Box<Root>),
	Info(Info),
	Conditions(Conditions),
	Files(Files),
	Pages(Pages),
	Page(Page),
	Group(Group),
	Plugin(Plugin),
	Flags(Flags),
	DependencyType(DependencyType),
	FilePatterns(FilePatterns),
	Pattern(PendingPattern),

	/// An element that only groups its children, whose children belong to the entity around it.
	Wrapper(&'static str),

	/// An element that sets fields of its parent once it closes.
	Leaf,

	/// An unknown element, stored as-is on its parent.
	Opaque(String, Opaque),

	/// Anything nested in a leaf or unknown element.
	Skip,
}

impl Frame {
	fn is_entity(&self) -> bool {
		!matches!(self, Frame::Wrapper(_) | Frame::Leaf | Frame::Opaque(..) | Frame::Skip)
	}

	fn meta_mut(&mut self) -> Option<&mut ElementMeta> {
		match self {
			Frame::Root(root) => Some(&mut root.meta),
			Frame::Info(info) => Some(&mut info.meta),
			Frame::Conditions(conditions) => Some(&mut conditions.meta),
			Frame::Files(files) => Some(&mut files.meta),
			Frame::Pages(pages) => Some(&mut pages.meta),
			Frame::Page(page) => Some(&mut page.meta),
			Frame::Group(group) => Some(&mut group.meta),
			Frame::Plugin(plugin) => Some(&mut plugin.meta),
			Frame::Flags(flags) => Some(&mut flags.meta),
			Frame::DependencyType(dependency_type) => Some(&mut dependency_type.meta),
			Frame::FilePatterns(patterns) => Some(&mut patterns.meta),
			_ => None,
		}
	}
}

/// Which kind of entity owns a newly opened element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Owner {
	Root,
	Info,
	Conditions,
	Files,
	Pages,
	Page,
	Group,
	Plugin,
	Flags,
	DependencyType,
	FilePatterns,
	Pattern,
	Closed,
}

/// Start offsets of every line in a document, so byte positions turn into line numbers without rescanning.
pub(crate) struct LineIndex {
	starts: Vec<usize>,
}

impl LineIndex {
	pub(crate) fn new(text: &str) -> Self {
		let starts = std::iter::once(0)
			.chain(text.match_indices('\n').map(|(i, _)| i + 1))
			.collect();

		Self { starts }
	}

	/// The line, counting from 1, holding a byte offset.
	pub(crate) fn line(&self, offset: usize) -> u32 {
		self.starts.partition_point(|&start| start <= offset) as u32
	}

	pub(crate) fn line_of(&self, node: Node) -> u32 {
		self.line(node.range().start)
	}
}

struct Builder<'a, 'input> {
	doc: &'a Document<'input>,
	lines: LineIndex,
	stack: Vec<Frame>,
	warnings: Vec<ValidationWarning>,
	comments: bool,
}

impl<'a, 'input> Builder<'a, 'input> {
	fn new(doc: &'a Document<'input>, warnings: Vec<ValidationWarning>) -> Self {
		Self {
			doc,
			lines: LineIndex::new(doc.input_text()),
			stack: Vec::new(),
			warnings,
			comments: false,
		}
	}

	fn line(&self, node: Node) -> Option<u32> {
		Some(self.lines.line_of(node))
	}

	fn warn(&mut self, warning: ValidationWarning, node: Node) {
		let line = self.line(node);
		self.warnings.push(warning.at(node.tag_name().name(), line));
	}

	fn build_config(&mut self) -> Result<Root, ParseError> {
		let element = self.doc.root_element();
		if element.tag_name().name() != tags::CONFIG {
			return Err(ParseError::NotFomod { expected: tags::CONFIG, found: element.tag_name().name().to_owned() });
		}

		let mut root = Root::new();
		root.meta = self.meta(element, &[]);
		self.stack.push(Frame::Root(Box::new(root)));
		self.run(element);

		match self.stack.pop() {
			Some(Frame::Root(root)) => Ok(*root),
			_ => Ok(Root::new()),
		}
	}

	fn build_info(&mut self) -> Result<Info, ParseError> {
		let element = self.doc.root_element();
		if element.tag_name().name() != tags::INFO {
			return Err(ParseError::NotFomod { expected: tags::INFO, found: element.tag_name().name().to_owned() });
		}

		let mut info = Info::new();
		info.meta = self.meta(element, &[]);
		self.stack.push(Frame::Info(info));
		self.run(element);

		match self.stack.pop() {
			Some(Frame::Info(info)) => Ok(info),
			_ => Ok(Info::new()),
		}
	}

	/// Walks every descendant of the document element, which already has a frame on the stack.
	fn run(&mut self, element: Node<'a, 'input>) {
		for node in element.children() {
			match node {
				node if node.is_comment() => self.comments = true,
				node if node.is_element() => {
					self.open(node);
					self.run(node);
					self.close(node);
				},

				_ => {},
			}
		}
	}

	/// The kind of the nearest entity, and the wrapper between it and the new element, if any.
	fn context(&self) -> (Owner, Option<&'static str>) {
		let mut wrapper = None;

		for frame in self.stack.iter().rev() {
			let owner = match frame {
				Frame::Wrapper(tag) => {
					wrapper = wrapper.or(Some(*tag));
					continue;
				},

				Frame::Leaf | Frame::Opaque(..) | Frame::Skip => Owner::Closed,
				Frame::Root(_) => Owner::Root,
				Frame::Info(_) => Owner::Info,
				Frame::Conditions(_) => Owner::Conditions,
				Frame::Files(_) => Owner::Files,
				Frame::Pages(_) => Owner::Pages,
				Frame::Page(_) => Owner::Page,
				Frame::Group(_) => Owner::Group,
				Frame::Plugin(_) => Owner::Plugin,
				Frame::Flags(_) => Owner::Flags,
				Frame::DependencyType(_) => Owner::DependencyType,
				Frame::FilePatterns(_) => Owner::FilePatterns,
				Frame::Pattern(_) => Owner::Pattern,
			};

			return (owner, wrapper);
		}

		(Owner::Closed, wrapper)
	}

	fn open(&mut self, node: Node) {
		let tag = node.tag_name().name();
		let (owner, wrapper) = self.context();

		let frame = match (owner, wrapper, tag) {
			(Owner::Closed, ..) => Frame::Skip,
			(Owner::Info, ..) => self.opaque(node),

			(Owner::Root, None, tags::MODULE_NAME | tags::MODULE_IMAGE) => Frame::Leaf,
			(Owner::Root, None, tags::MODULE_DEPENDENCIES) => self.conditions(node, tags::MODULE_DEPENDENCIES),
			(Owner::Root, None, tags::REQUIRED_FILES) => Frame::Files(Files::with_tag(tags::REQUIRED_FILES).tap_mut(|f| f.meta = self.meta(node, &[]))),
			(Owner::Root, None, tags::INSTALL_STEPS) => {
				let order: Order = self.enum_attr(node, "order", true);
				Frame::Pages(Pages::new().tap_mut(|p| {
					p.meta = self.meta(node, &["order"]);
					p.order = order;
				}))
			},
			(Owner::Root, None, tags::FILE_PATTERNS) => Frame::FilePatterns(FilePatterns::new().tap_mut(|f| f.meta = self.meta(node, &[]))),

			(Owner::Conditions, None, tags::GAME_DEPENDENCY | tags::FLAG_DEPENDENCY | tags::FILE_DEPENDENCY) => Frame::Leaf,
			(Owner::Conditions, None, tags::DEPENDENCIES) => self.conditions(node, tags::DEPENDENCIES),

			(Owner::Files, None, tags::FILE | tags::FOLDER) => Frame::Leaf,

			(Owner::Pages, None, tags::INSTALL_STEP) => {
				let name = self.text_attr(node, "name");
				Frame::Page(Page::new(name).tap_mut(|p| p.meta = self.meta(node, &["name"])))
			},

			(Owner::Page, None, tags::VISIBLE) => self.conditions(node, tags::VISIBLE),
			(Owner::Page, None, tags::GROUPS) => {
				let order: Order = self.enum_attr(node, "order", true);
				if let Some(Frame::Page(page)) = self.stack.last_mut() { page.order = order; }
				Frame::Wrapper(tags::GROUPS)
			},

			(Owner::Page, Some(tags::GROUPS), tags::GROUP) => {
				let name = self.text_attr(node, "name");
				let group_type = self.enum_attr(node, "type", false);
				Frame::Group(Group::new(name, group_type).tap_mut(|g| g.meta = self.meta(node, &["name", "type"])))
			},

			(Owner::Group, None, tags::PLUGINS) => {
				let order: Order = self.enum_attr(node, "order", true);
				if let Some(Frame::Group(group)) = self.stack.last_mut() { group.order = order; }
				Frame::Wrapper(tags::PLUGINS)
			},

			(Owner::Group, Some(tags::PLUGINS), tags::PLUGIN) => {
				let name = self.text_attr(node, "name");
				Frame::Plugin(Plugin::new(name).tap_mut(|p| p.meta = self.meta(node, &["name"])))
			},

			(Owner::Plugin, None, tags::DESCRIPTION | tags::IMAGE) => Frame::Leaf,
			(Owner::Plugin, None, tags::FILES) => Frame::Files(Files::new().tap_mut(|f| f.meta = self.meta(node, &[]))),
			(Owner::Plugin, None, tags::CONDITION_FLAGS) => Frame::Flags(Flags::new().tap_mut(|f| f.meta = self.meta(node, &[]))),
			(Owner::Plugin, None, tags::TYPE_DESCRIPTOR) => Frame::Wrapper(tags::TYPE_DESCRIPTOR),
			(Owner::Plugin, Some(tags::TYPE_DESCRIPTOR), tags::TYPE) => Frame::Leaf,
			(Owner::Plugin, Some(tags::TYPE_DESCRIPTOR), tags::DEPENDENCY_TYPE) => {
				Frame::DependencyType(DependencyType::default().tap_mut(|d| d.meta = self.meta(node, &[])))
			},

			(Owner::Flags, None, tags::FLAG) => Frame::Leaf,

			(Owner::DependencyType, None, tags::DEFAULT_TYPE) => Frame::Leaf,
			(Owner::DependencyType | Owner::FilePatterns, None, tags::PATTERNS) => Frame::Wrapper(tags::PATTERNS),
			(Owner::DependencyType | Owner::FilePatterns, Some(tags::PATTERNS), tags::PATTERN) => Frame::Pattern(PendingPattern::default()),

			(Owner::Pattern, None, tags::DEPENDENCIES) => self.conditions(node, tags::DEPENDENCIES),
			(Owner::Pattern, None, tags::FILES) => Frame::Files(Files::new().tap_mut(|f| f.meta = self.meta(node, &[]))),
			(Owner::Pattern, None, tags::TYPE) => Frame::Leaf,

			_ => self.opaque(node),
		};

		self.stack.push(frame);
	}

	fn close(&mut self, node: Node) {
		let Some(frame) = self.stack.pop() else { return };

		match frame {
			Frame::Skip | Frame::Wrapper(_) => {},
			Frame::Leaf => self.close_leaf(node),
			Frame::Opaque(tag, opaque) => match self.owner_mut() {
				Some(Frame::Info(info)) => info.insert_raw(tag, opaque),
				Some(owner) => match owner.meta_mut() {
					Some(meta) => { meta.extras.insert(tag, opaque); },
					None => debug!("Discarding unknown element '{tag}' inside a pattern."),
				},
				None => {},
			},

			entity => self.attach(entity),
		}
	}

	/// Returns the nearest entity frame.
	fn owner_mut(&mut self) -> Option<&mut Frame> {
		self.stack.iter_mut().rev().find(|f| f.is_entity())
	}

	/// Hands a finished entity to the entity that owns it.
	fn attach(&mut self, child: Frame) {
		let Some(owner) = self.owner_mut() else { return };

		match (owner, child) {
			(Frame::Root(root), Frame::Conditions(conditions)) => root.set_conditions(conditions),
			(Frame::Root(root), Frame::Files(files)) => root.set_files(files),
			(Frame::Root(root), Frame::Pages(pages)) => root.pages = pages,
			(Frame::Root(root), Frame::FilePatterns(patterns)) => root.file_patterns = patterns,

			(Frame::Conditions(parent), Frame::Conditions(nested)) => parent.push_nested(nested),
			(Frame::Pages(pages), Frame::Page(page)) => pages.push(page),
			(Frame::Page(page), Frame::Conditions(conditions)) => page.set_conditions(conditions),
			(Frame::Page(page), Frame::Group(group)) => page.push(group),
			(Frame::Group(group), Frame::Plugin(plugin)) => group.push(plugin),

			(Frame::Plugin(plugin), Frame::Files(files)) => plugin.set_files(files),
			(Frame::Plugin(plugin), Frame::Flags(flags)) => plugin.flags = flags,
			(Frame::Plugin(plugin), Frame::DependencyType(dependency_type)) => plugin.plugin_type = PluginType::Conditional(dependency_type),

			(Frame::Pattern(pattern), Frame::Conditions(conditions)) => pattern.conditions = conditions,
			(Frame::Pattern(pattern), Frame::Files(files)) => pattern.files = files,
			(Frame::DependencyType(dependency_type), Frame::Pattern(pattern)) => dependency_type.push(pattern.conditions, pattern.option_type),
			(Frame::FilePatterns(patterns), Frame::Pattern(pattern)) => patterns.push(pattern.conditions, pattern.files),

			_ => debug!("Dropping an element that closed in an unexpected position."),
		}
	}

	/// Applies an element that only sets fields on its owner.
	fn close_leaf(&mut self, node: Node) {
		let tag = node.tag_name().name();

		match tag {
			tags::MODULE_NAME => {
				let text = direct_text(node);
				let meta = self.meta(node, &[]);
				if let Some(Frame::Root(root)) = self.owner_mut() {
					root.name = text;
					root.name_meta = meta;
				}
			},

			tags::MODULE_IMAGE => {
				let path = self.text_attr(node, "path");
				let meta = self.meta(node, &["path"]);
				if let Some(Frame::Root(root)) = self.owner_mut() {
					root.image = Some(path);
					root.image_meta = meta;
				}
			},

			tags::GAME_DEPENDENCY => {
				let Some(version) = self.required_attr(node, "version") else { return };
				self.push_condition(Condition::Version(version));
			},

			tags::FLAG_DEPENDENCY => {
				let Some(name) = self.required_attr(node, "flag") else { return };
				let value = self.text_attr(node, "value");
				self.push_condition(Condition::Flag { name, value });
			},

			tags::FILE_DEPENDENCY => {
				let Some(path) = self.required_attr(node, "file") else { return };
				let state: FileType = self.enum_attr(node, "state", false);
				self.push_condition(Condition::File { path, state });
			},

			tags::FILE | tags::FOLDER => {
				let Some(source) = self.required_attr(node, "source") else { return };
				let kind = match tag == tags::FOLDER {
					true => FileKind::Folder,
					false => FileKind::File,
				};

				let priority = self.priority_attr(node);
				let mut entry = FileEntry::new(kind, source, node.attribute("destination").map(str::to_owned))
					.with_priority(priority);

				entry.meta = self.meta(node, &["source", "destination", "priority"]);

				if let Some(Frame::Files(files)) = self.owner_mut() { files.push(entry); }
			},

			tags::DESCRIPTION => {
				let text = direct_text(node);
				if let Some(Frame::Plugin(plugin)) = self.owner_mut() { plugin.description = text; }
			},

			tags::IMAGE => {
				let path = self.text_attr(node, "path");
				if let Some(Frame::Plugin(plugin)) = self.owner_mut() { plugin.image = path; }
			},

			tags::FLAG => {
				let Some(name) = self.required_attr(node, "name") else { return };
				let value = direct_text(node);
				if let Some(Frame::Flags(flags)) = self.owner_mut() { flags.insert(name, value); }
			},

			tags::TYPE => {
				let option_type: OptionType = self.enum_attr(node, "name", false);
				match self.owner_mut() {
					Some(Frame::Plugin(plugin)) => plugin.plugin_type = PluginType::Static(option_type),
					Some(Frame::Pattern(pattern)) => pattern.option_type = option_type,
					_ => {},
				}
			},

			tags::DEFAULT_TYPE => {
				let option_type: OptionType = self.enum_attr(node, "name", false);
				if let Some(Frame::DependencyType(dependency_type)) = self.owner_mut() { dependency_type.default = option_type; }
			},

			_ => {},
		}
	}

	fn push_condition(&mut self, condition: Condition) {
		if let Some(Frame::Conditions(conditions)) = self.owner_mut() { conditions.insert(condition); }
	}

	fn conditions(&mut self, node: Node, tag: &'static str) -> Frame {
		let operator: ConditionType = self.enum_attr(node, "operator", true);
		let mut conditions = Conditions::with_tag(tag);
		conditions.operator = operator;
		conditions.meta = self.meta(node, &["operator"]);

		Frame::Conditions(conditions)
	}

	fn opaque(&mut self, node: Node) -> Frame {
		let opaque = Opaque {
			attributes: self.attributes(node, &[]),
			text: direct_text(node),
		};

		debug!("Keeping unknown element '{}' as-is.", node.tag_name().name());
		Frame::Opaque(node.tag_name().name().to_owned(), opaque)
	}

	fn meta(&mut self, node: Node, known: &[&str]) -> ElementMeta {
		ElementMeta {
			line: self.line(node),
			attributes: self.attributes(node, known),
			extras: IndexMap::new(),
		}
	}

	/// Collects the attributes of an element that aren't part of the format.
	fn attributes(&mut self, node: Node, known: &[&str]) -> IndexMap<String, String> {
		let mut out = IndexMap::new();
		let is_config = node.tag_name().name() == tags::CONFIG && node.parent().is_some_and(|p| p.is_root());

		for attribute in node.attributes() {
			let name = attribute.name();

			match attribute.namespace() {
				None if known.iter().any(|k| *k == name) => {},
				None => { out.insert(name.to_owned(), attribute.value().to_owned()); },

				Some(XSI_NAMESPACE) if is_config && name == "noNamespaceSchemaLocation" => {},
				Some(XSI_NAMESPACE) => { out.insert(format!("xsi:{name}"), attribute.value().to_owned()); },

				Some(_) => self.warn(ValidationWarning::foreign_attribute(node.tag_name().name(), name), node),
			}
		}

		out
	}

	/// Reads an enumerated attribute, falling back to the first variant.
	/// Missing optional attributes fall back silently.
	fn enum_attr<E: FomodEnum>(&mut self, node: Node, name: &str, optional: bool) -> E {
		let tag = node.tag_name().name();

		match node.attribute(name) {
			Some(value) => match E::from_attr(value) {
				Some(variant) => variant,
				None => {
					self.warn(ValidationWarning::invalid_enum::<E>(tag, value), node);
					E::first()
				},
			},

			None if optional => E::first(),
			None => {
				self.warn(ValidationWarning::default_attribute(tag, name, E::first().as_str()), node);
				E::first()
			},
		}
	}

	/// Reads a text attribute, falling back to an empty string.
	fn text_attr(&mut self, node: Node, name: &str) -> String {
		match node.attribute(name) {
			Some(value) => value.to_owned(),
			None => {
				self.warn(ValidationWarning::default_attribute(node.tag_name().name(), name, ""), node);
				String::new()
			},
		}
	}

	/// Reads an attribute without which its element is skipped.
	fn required_attr(&mut self, node: Node, name: &str) -> Option<String> {
		let value = node.attribute(name).map(str::to_owned);
		if value.is_none() { self.warn(ValidationWarning::required_attribute(node.tag_name().name(), name), node); }

		value
	}

	fn priority_attr(&mut self, node: Node) -> i32 {
		let Some(value) = node.attribute("priority") else { return 0 };

		match value.trim().parse() {
			Ok(priority) => priority,
			Err(_) => {
				self.warn(ValidationWarning::invalid_priority(node.tag_name().name(), value), node);
				0
			},
		}
	}
}

/// Joins the text directly inside an element, ignoring nested elements.
fn direct_text(node: Node) -> String {
	node.children()
		.filter(|c| c.is_text())
		.filter_map(|c| c.text())
		.collect::<String>()
		.trim()
		.to_owned()
}
