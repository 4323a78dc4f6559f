//! This module runs an installer in the terminal, one page at a time.

use fomodcore::{GroupType, Installer, OptionType, Page, Selection};

use crate::{
	prelude::*,
	util::{misc::{display_slice, prompt}, text::{TextColor, TextStyle}},
};

/// Something the user typed at the wizard's prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Answer {
	/// Numbers of the options the user picked, as shown on screen.
	Choose(Vec<usize>),

	/// An empty line, which keeps the suggested options.
	Defaults,
	Back,
	Quit,

	/// Holds the part of the answer that couldn't be read.
	Invalid(String),
}

/// Reads one line of input into an *Answer*.
/// Numbers may be separated by commas or spaces.
fn parse_answer(line: &str) -> Answer {
	let line = line.trim();

	match line.to_ascii_lowercase().as_str() {
		"" => return Answer::Defaults,
		"b" | "back" => return Answer::Back,
		"q" | "quit" => return Answer::Quit,
		_ => {},
	}

	let mut numbers = Vec::new();
	for token in line.split([',', ' ', '\t']).filter(|t| !t.is_empty()) {
		match token.parse::<usize>() {
			Ok(number) if number > 0 => numbers.push(number),
			_ => return Answer::Invalid(token.to_owned()),
		}
	}

	Answer::Choose(numbers)
}

/// Walks through every page of an installer, then prints what it would install.
pub fn run(installer: &mut Installer) -> AppResult<()> {
	let mut page = installer.advance(&[])?;

	while let Some(current) = page {
		let choices = number_choices(current);
		show_page(installer, current, &choices);

		let Some(line) = prompt("Options (numbers, empty for suggested, 'b' to go back, 'q' to quit): ")? else {
			return cancel();
		};

		let picked = match parse_answer(&line) {
			Answer::Quit => return cancel(),

			Answer::Back => {
				page = match installer.retreat() {
					Some((previous, _)) => Some(previous),
					None => installer.advance(&[])?,
				};

				continue;
			},

			Answer::Invalid(token) => {
				Notice::from_preset(NoticePreset::Warning, "Input")
					.add_field("Description", &format!("'{token}' isn't an option number."))
					.print();

				continue;
			},

			Answer::Defaults => choices.iter()
				.copied()
				.filter(|&s| suggested(installer, current, s))
				.collect_vec(),

			Answer::Choose(numbers) => {
				let unknown = numbers.iter().filter(|&&n| n > choices.len()).collect_vec();
				if !unknown.is_empty() {
					Notice::from_preset(NoticePreset::Warning, "Input")
						.add_field("Description", &format!("This page has no option numbered {}.", display_slice(&unknown)))
						.print();

					continue;
				}

				numbers.iter().map(|n| choices[n - 1]).collect_vec()
			},
		};

		let selections = picked.into_iter()
			.chain(choices.iter().copied().filter(|&s| automatic(installer, current, s)))
			.collect_vec();

		match installer.advance(&selections) {
			Ok(next) => page = next,
			Err(error) => AppError::from(error).conv::<Notice>().print(),
		}
	}

	show_plan(installer);
	Ok(())
}

fn cancel() -> AppResult<()> {
	Notice::from_preset(NoticePreset::Warning, "Install")
		.add_field("Description", "The installer was cancelled, nothing was planned.")
		.print();

	Ok(())
}

/// Lists every option of a page in the order it is shown.
/// The option numbered *n* on screen is at index *n - 1*.
fn number_choices(page: &Page) -> Vec<Selection> {
	page.ordered_groups()
		.into_iter()
		.flat_map(|(group_index, group)| {
			group.ordered_plugins()
				.into_iter()
				.map(move |(option_index, _)| Selection::new(group_index, option_index))
		})
		.collect_vec()
}

/// Options that are always submitted, whatever the user picked.
fn automatic(installer: &Installer, page: &Page, selection: Selection) -> bool {
	let Some(group) = page.get(selection.group) else { return false };
	let Some(plugin) = group.get(selection.option) else { return false };

	match installer.plugin_type(plugin) {
		OptionType::Required => true,
		OptionType::NotUsable => false,
		_ => group.group_type == GroupType::All,
	}
}

/// Options picked when the user accepts the suggestions.
fn suggested(installer: &Installer, page: &Page, selection: Selection) -> bool {
	page.get(selection.group)
		.and_then(|g| g.get(selection.option))
		.is_some_and(|p| installer.plugin_type(p) == OptionType::Recommended)
}

fn show_page(installer: &Installer, page: &Page, choices: &[Selection]) {
	println!();
	println!("{}", page.name.stylize(Some(TextStyle::Underlined), Some(TextColor::Blue), None));

	let mut last_group = None;
	for (number, selection) in choices.iter().enumerate() {
		let Some(group) = page.get(selection.group) else { continue };
		let Some(plugin) = group.get(selection.option) else { continue };

		if last_group != Some(selection.group) {
			let header = format!("  {} ({})", group.name, group.group_type);
			println!("{}", header.stylize(Some(TextStyle::Bold), None, None));
			last_group = Some(selection.group);
		}

		let option_type = installer.plugin_type(plugin);
		let line = format!("[{}] {} - {option_type}", number + 1, plugin.name);
		println!("    {}", line.stylize_option(option_type));

		if let Some(summary) = plugin.description.lines().map(str::trim).find(|l| !l.is_empty()) {
			println!("        {}", summary.stylize(Some(TextStyle::Italic), None, None));
		}
	}
}

fn show_plan(installer: &Installer) {
	let plan = installer.resolve_files();

	let notice = Notice::from_preset(NoticePreset::Success, "Install Plan")
		.add_field("Files", &plan.len().to_string());

	plan.iter()
		.fold(notice, |n, (destination, file)| {
			n.add_field(&destination.display().to_string(), &file.source.display().to_string())
		})
		.print();

	let flags = installer.resolve_flags();
	if flags.is_empty() { return; }

	let pairs = flags.iter()
		.map(|(name, value)| format!("{name}={value}").stylize(None, Some(TextColor::Magenta), None))
		.collect_vec();

	println!("Flags: {}", display_slice(&pairs));
}
