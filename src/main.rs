//! Fomodcrab is a command-line companion for FOMOD installer packages.
//! It can lint a package, reformat its documents, and walk through its installer in the terminal.

mod commands;
mod error;
mod prelude;
mod util;
mod wizard;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::prelude::*;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
	/// Print debugging information while running.
	#[arg(short, long)]
	verbose: bool,

	/// The command to execute.
	#[command(subcommand)]
	cmd: Command,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Command {
	/// Parses a package and reports every issue found in it.
	Check {
		/// The package folder, or its 'fomod' folder.
		path: PathBuf,

		/// Also check the installer document against the FOMOD schema.
		#[arg(long)]
		strict: bool,
	},

	/// Rewrites a package's documents in their canonical form.
	Fmt {
		/// The package folder, or its 'fomod' folder.
		path: PathBuf,
	},

	/// Walks through a package's installer and prints the files it would install.
	Install {
		/// The package folder, or its 'fomod' folder.
		path: PathBuf,

		/// The game version used for version conditions.
		#[arg(long)]
		game_version: Option<String>,
	},
}

/// Entrypoint for Fomodcrab.
fn main() {
	let args = Cli::parse();

	let level = match args.verbose {
		true => LevelFilter::Debug,
		false => LevelFilter::Warn,
	};

	if let Err(error) = SimpleLogger::new().with_colors(true).with_level(level).init() {
		eprintln!("Failed to start logger: {error}");
	}

	if let Err(error) = run_command(args) { error.conv::<Notice>().print(); }
}

/// Runs the command specified by the passed CLI arguements.
fn run_command(args: Cli) -> AppResult<()> {
	match args.cmd {
		Command::Check { path, strict } => commands::check(&path, strict),
		Command::Fmt { path } => commands::fmt(&path),
		Command::Install { path, game_version } => commands::install(&path, game_version),
	}
}
