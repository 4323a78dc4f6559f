//! This module holds the logic behind each of Fomodcrab's subcommands.

use std::path::Path;

use fomodcore::{io::locate_fomod_dir, parse, validate, write, Destination, Installer, InstallerConfig, ParseOptions, Parsed, Root, Source};

use crate::{prelude::*, wizard};

/// Reads the package at the provided path, without failing on schema violations.
fn load(path: &Path, strict: bool) -> AppResult<Parsed> {
	let options = ParseOptions { strict, fail_on_schema_error: false };
	let parsed = parse(Source::Package(path.to_path_buf()), &options)?;

	info!("Loaded package '{}' from {}.", parsed.root.name, path.display());
	Ok(parsed)
}

/// Parses and lints a package, printing every warning found.
pub fn check(path: &Path, strict: bool) -> AppResult<()> {
	let Parsed { root, warnings } = load(path, strict)?;

	let warnings = warnings.into_iter()
		.chain(validate(&root))
		.collect_vec();

	let critical = warnings.iter().filter(|w| w.critical).count();
	for warning in warnings.iter().cloned() {
		warning.conv::<Notice>().print();
	}

	statistics(&root)
		.add_field("Warnings", &warnings.len().to_string())
		.add_field("Critical", &critical.to_string())
		.print();

	Ok(())
}

/// Builds a notice describing the size of a package.
fn statistics(root: &Root) -> Notice {
	let groups = root.pages.iter().map(|p| p.len()).sum::<usize>();
	let options = root.pages.iter()
		.flat_map(|p| p.iter())
		.map(|g| g.len())
		.sum::<usize>();

	let name = match root.name.is_empty() {
		true => "Unnamed Package",
		false => root.name.as_str(),
	};

	Notice::from_preset(NoticePreset::Statistics, name)
		.add_field("Pages", &root.pages.len().to_string())
		.add_field("Groups", &groups.to_string())
		.add_field("Options", &options.to_string())
		.add_field("Conditional Installs", &root.file_patterns.len().to_string())
}

/// Rewrites a package's documents in canonical form.
pub fn fmt(path: &Path) -> AppResult<()> {
	let Parsed { root, warnings } = load(path, false)?;
	if !warnings.is_empty() {
		warn!("Formatting a package with {} parse warning(s), run 'check' to see them.", warnings.len());
	}

	write(&root, Destination::Package(path))?;

	Notice::from_preset(NoticePreset::Success, "Format")
		.add_field("Package", &path.display().to_string())
		.print();

	Ok(())
}

/// Runs a package's installer interactively.
pub fn install(path: &Path, game_version: Option<String>) -> AppResult<()> {
	let Parsed { root, .. } = load(path, false)?;

	// Sources are relative to the folder holding 'fomod', whichever of the two was given.
	let fomod_dir = locate_fomod_dir(path)?;
	let package = fomod_dir.parent().unwrap_or(path);

	let config = InstallerConfig::new()
		.with_path(package)
		.pipe(|c| match game_version {
			Some(version) => c.with_game_version(version),
			None => c,
		});

	let mut installer = Installer::new(&root, config)?;
	wizard::run(&mut installer)
}
