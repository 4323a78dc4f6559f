//! This module contains the errors used all over this program.

use std::io;

use fomodcore::{InstallerError, ParseError};

use crate::prelude::*;

/// Convenience wrapper around *Result<T, AppError>*.
pub type AppResult<T> = Result<T, AppError>;

/// Error returned by several functions in Fomodcrab.
#[derive(Error, Debug)]
pub enum AppError {
	/// Error returned by failing IO operations.
	/// Most of these will occur while reading user input or writing a package.
	#[error(transparent)]
	IO(#[from] io::Error),

	/// Error returned when a package's documents can't be read into a tree.
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// Error returned by the installer, either from bad selections or from a package that can't be installed.
	#[error(transparent)]
	Install(#[from] InstallerError),

	/// Custom error that simply wraps a *Notice*.
	#[error("{0}")]
	Custom(Notice),
}
