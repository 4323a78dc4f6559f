// PackageDiscovery :: Locates the two documents of a FOMOD package on disk.

use std::{fs, io, path::{Path, PathBuf}};

/// Name of the folder holding a package's documents.
pub const FOMOD_DIR: &str = "fomod";

/// Name used for a package's metadata document.
pub const INFO_FILE: &str = "info.xml";

/// Name used for a package's installer document.
pub const CONFIG_FILE: &str = "ModuleConfig.xml";

/// Finds the 'info.xml' and 'ModuleConfig.xml' files of a package.
///
/// The search path may be either the package itself or its 'fomod' folder,
/// with a 'fomod' subfolder taking priority.
/// Every name is matched case-insensitively.
pub fn locate_package_files(search_path: impl AsRef<Path>) -> io::Result<(PathBuf, PathBuf)> {
	let fomod_dir = locate_fomod_dir(search_path.as_ref())?;

	let info = find_file(&fomod_dir, INFO_FILE)?
		.ok_or_else(|| not_found(INFO_FILE))?;

	let config = find_file(&fomod_dir, CONFIG_FILE)?
		.ok_or_else(|| not_found(CONFIG_FILE))?;

	Ok((info, config))
}

/// Finds the 'fomod' folder of a package.
pub fn locate_fomod_dir(search_path: &Path) -> io::Result<PathBuf> {
	if !search_path.is_dir() {
		return Err(io::Error::new(
			io::ErrorKind::NotFound,
			format!("'{}' is not a directory", search_path.display()),
		));
	}

	if let Some(dir) = find_entry(search_path, FOMOD_DIR, true)? { return Ok(dir); }

	let is_fomod = search_path.file_name()
		.and_then(|n| n.to_str())
		.is_some_and(|n| n.eq_ignore_ascii_case(FOMOD_DIR));

	match is_fomod {
		true => Ok(search_path.to_path_buf()),
		false => Err(not_found(FOMOD_DIR)),
	}
}

/// Looks for a direct child of `dir` with a case-insensitive name.
/// Entries are visited in name order, so the result is the same on every filesystem.
fn find_entry(dir: &Path, name: &str, want_dir: bool) -> io::Result<Option<PathBuf>> {
	let mut entries = fs::read_dir(dir)?
		.collect::<io::Result<Vec<_>>>()?;

	entries.sort_by_key(|e| e.file_name());

	let found = entries.into_iter()
		.map(|e| e.path())
		.find(|p| {
			let matches = p.file_name()
				.and_then(|n| n.to_str())
				.is_some_and(|n| n.eq_ignore_ascii_case(name));

			matches && p.is_dir() == want_dir
		});

	Ok(found)
}

/// Looks for a file inside `dir` with a case-insensitive name.
pub(crate) fn find_file(dir: &Path, name: &str) -> io::Result<Option<PathBuf>> {
	find_entry(dir, name, false)
}

fn not_found(item: &str) -> io::Error {
	io::Error::new(io::ErrorKind::NotFound, format!("could not find '{item}'"))
}
