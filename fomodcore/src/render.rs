// Render :: Canonical text output for FOMOD trees.
// Output is deterministic: two-space indentation, one element per line, and a trailing newline.

use indexmap::IndexMap;

use crate::tree::Opaque;

/// An ordered list of attributes for a single element.
#[derive(Clone, Debug, Default)]
pub struct Attrs<'a> {
	pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Attrs<'a> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a single attribute.
	pub fn with(mut self, name: &'a str, value: &'a str) -> Self {
		self.pairs.push((name, value));
		self
	}

	/// Appends an attribute only if a value is present.
	pub fn with_opt(self, name: &'a str, value: Option<&'a str>) -> Self {
		match value {
			Some(value) => self.with(name, value),
			None => self,
		}
	}

	/// Appends every pass-through attribute, in its stored order.
	pub fn extend(mut self, extra: &'a IndexMap<String, String>) -> Self {
		self.pairs.extend(extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));
		self
	}
}

/// Builds indented XML text one element at a time.
#[derive(Debug, Default)]
pub struct XmlWriter {
	buf: String,
	depth: usize,
}

impl XmlWriter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Writes an element whose children are produced by `body`.
	/// If `body` writes nothing, the element collapses into a self-closing tag.
	pub fn element(&mut self, tag: &str, attrs: Attrs, body: impl FnOnce(&mut Self)) {
		let start = self.buf.len();
		self.open_tag(tag, &attrs);
		self.buf.push_str(">\n");

		let content_start = self.buf.len();
		self.depth += 1;
		body(self);
		self.depth -= 1;

		match self.buf.len() == content_start {
			true => {
				self.buf.truncate(start);
				self.open_tag(tag, &attrs);
				self.buf.push_str("/>\n");
			},

			false => {
				self.indent();
				self.buf.push_str("</");
				self.buf.push_str(tag);
				self.buf.push_str(">\n");
			},
		}
	}

	/// Writes an element that only holds text.
	pub fn leaf(&mut self, tag: &str, attrs: Attrs, text: &str) {
		self.open_tag(tag, &attrs);

		match text.is_empty() {
			true => self.buf.push_str("/>\n"),
			false => {
				self.buf.push('>');
				escape_into(&mut self.buf, text, false);
				self.buf.push_str("</");
				self.buf.push_str(tag);
				self.buf.push_str(">\n");
			},
		}
	}

	/// Replays preserved unknown children.
	pub fn extras(&mut self, extras: &IndexMap<String, Opaque>) {
		for (tag, opaque) in extras.iter() {
			self.leaf(tag, Attrs::new().extend(&opaque.attributes), &opaque.text);
		}
	}

	/// Writes another renderable value at the current depth.
	pub fn child(&mut self, value: &impl Render) {
		value.write_xml(self);
	}

	pub fn finish(self) -> String {
		self.buf
	}

	fn open_tag(&mut self, tag: &str, attrs: &Attrs) {
		self.indent();
		self.buf.push('<');
		self.buf.push_str(tag);

		for (name, value) in attrs.pairs.iter() {
			self.buf.push(' ');
			self.buf.push_str(name);
			self.buf.push_str("=\"");
			escape_into(&mut self.buf, value, true);
			self.buf.push('"');
		}
	}

	fn indent(&mut self) {
		for _ in 0..self.depth {
			self.buf.push_str("  ");
		}
	}
}

fn escape_into(buf: &mut String, text: &str, attribute: bool) {
	for c in text.chars() {
		match c {
			'&' => buf.push_str("&amp;"),
			'<' => buf.push_str("&lt;"),
			'>' => buf.push_str("&gt;"),
			'\r' => buf.push_str("&#13;"),

			// Attribute values have their whitespace normalized on read.
			'"' if attribute => buf.push_str("&quot;"),
			'\n' if attribute => buf.push_str("&#10;"),
			'\t' if attribute => buf.push_str("&#9;"),
			other => buf.push(other),
		}
	}
}

/// Implemented by every entity of a FOMOD tree.
pub trait Render {
	/// Writes this entity, and everything it owns, into a writer.
	fn write_xml(&self, w: &mut XmlWriter);

	/// Returns this entity's canonical text.
	fn render(&self) -> String {
		let mut w = XmlWriter::new();
		self.write_xml(&mut w);
		w.finish()
	}
}
