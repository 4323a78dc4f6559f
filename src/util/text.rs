//! This module provides facilities for coloring and styling strings.

// Source for ANSI codes: https://gist.github.com/fnky/458719343aabd01cfb17a3a4f7296797

use fomodcore::OptionType;

/// A trait to provide text styling capability to strings.
pub trait FancyText {
	/// Stylize a string with the provided options.
	///
	/// # Parameters
	/// *style* - The text style to use, such as bold or italic.
	/// *foreground* - The color of the text itself.
	/// *background* - The color of the text's background.
	fn stylize(&self, style: Option<TextStyle>, foreground: Option<TextColor>, background: Option<TextColor>) -> String;

	/// Stylize a string the way an option of the provided type is shown in the wizard.
	fn stylize_option(&self, option_type: OptionType) -> String {
		let (style, color) = match option_type {
			OptionType::Required => (Some(TextStyle::Bold), TextColor::Green),
			OptionType::Recommended => (Some(TextStyle::Bold), TextColor::Cyan),
			OptionType::Optional => (None, TextColor::White),
			OptionType::CouldBeUsable => (Some(TextStyle::Italic), TextColor::Yellow),
			OptionType::NotUsable => (Some(TextStyle::Strikedthrough), TextColor::Red),
		};

		self.stylize(style, Some(color), None)
	}
}

/// The ANSI escape code to reset all styles and colors.
const ANSI_RESET: &str = "\x1B[0m";

/// Various styles of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextStyle {
	/// **Bold** text.
	Bold,

	/// *Italic* text.
	Italic,

	/// Underlined text.
	Underlined,

	/// Strikedthrough text.
	Strikedthrough,
}

/// Various text colors available in the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextColor {
	Red,
	Green,
	Yellow,
	Blue,
	Magenta,
	Cyan,
	White,
}

impl FancyText for str {
	fn stylize(&self, style: Option<TextStyle>, foreground: Option<TextColor>, background: Option<TextColor>) -> String {
		let style_code = style.map(|s| s.ansi()).unwrap_or_default();
		let fg_code = foreground.map(|fg| fg.ansi(30)).unwrap_or_default();
		let bg_code = background.map(|bg| bg.ansi(40)).unwrap_or_default();

		format!("{style_code}{fg_code}{bg_code}{self}{ANSI_RESET}")
	}
}

impl TextStyle {
	/// Returns this style's associated ANSI escape code.
	pub fn ansi(&self) -> String {
		let code = match self {
			TextStyle::Bold => 1,
			TextStyle::Italic => 3,
			TextStyle::Underlined => 4,
			TextStyle::Strikedthrough => 9,
		};

		format!("\x1B[{code}m")
	}
}

impl TextColor {
	/// Returns this color's associated ANSI escape code.
	/// *base* is 30 for the foreground and 40 for the background.
	pub fn ansi(&self, base: u8) -> String {
		let offset = match self {
			TextColor::Red => 1,
			TextColor::Green => 2,
			TextColor::Yellow => 3,
			TextColor::Blue => 4,
			TextColor::Magenta => 5,
			TextColor::Cyan => 6,
			TextColor::White => 7,
		};

		format!("\x1B[{}m", base + offset)
	}
}
