//! This module is the general place for utilities that don't need their own module.

use std::{fmt::Display, io::{self, BufRead, Write}};

use crate::prelude::*;

/// Helper function to generate a pretty string based on a slice's contents.
pub fn display_slice<T: Display> (slice: &[T]) -> String {
	slice.iter().join(", ")
}

/// Prints the provided message, and then reads a single line typed by the user.
/// The returned line has its surrounding whitespace removed.
/// Returns `None` once STDIN has been closed.
pub fn prompt(msg: impl AsRef<str>) -> AppResult<Option<String>> {
	let mut stdout = io::stdout();

	// Writes and manually flushes STDOUT so the cursor is at the end.
	stdout.write_all(msg.as_ref().as_bytes())?;
	stdout.flush()?;

	let mut line = String::new();
	let read = io::stdin().lock().read_line(&mut line)?;

	match read {
		0 => Ok(None),
		_ => Ok(Some(line.trim().to_owned())),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn slices_are_comma_separated() {
		assert_eq!(display_slice(&[1, 2, 3]), "1, 2, 3");
		assert_eq!(display_slice::<u8>(&[]), "");
	}
}
