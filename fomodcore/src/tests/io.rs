// Tests for locating, reading and writing packages on disk.

use std::{fs, io::ErrorKind};

use crate::{
	io::{locate_fomod_dir, locate_package_files},
	parser::{parse, write, Destination, ParseOptions, Source},
	render::Render,
};

use super::*;

#[test]
fn discovery_ignores_case() {
	let package = tempfile::tempdir().unwrap();
	let fomod = package.path().join("FOMOD");
	fs::create_dir(&fomod).unwrap();
	fs::write(fomod.join("Info.XML"), SAMPLE_INFO).unwrap();
	fs::write(fomod.join("moduleconfig.xml"), SAMPLE_CONFIG).unwrap();

	let (info, config) = locate_package_files(package.path()).unwrap();
	assert_eq!(info, fomod.join("Info.XML"));
	assert_eq!(config, fomod.join("moduleconfig.xml"));

	// The 'fomod' folder itself works as a search path too.
	assert_eq!(locate_fomod_dir(&fomod).unwrap(), fomod);

	let parsed = parse(Source::Package(package.path().to_path_buf()), &ParseOptions::default()).unwrap();
	assert_eq!(parsed.root.name, "Example Mod");
}

#[test]
fn discovery_fails_without_fomod_folder() {
	let package = tempfile::tempdir().unwrap();

	let error = locate_package_files(package.path()).unwrap_err();
	assert_eq!(error.kind(), ErrorKind::NotFound);

	let error = locate_package_files(package.path().join("missing")).unwrap_err();
	assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn discovery_fails_without_config() {
	let package = tempfile::tempdir().unwrap();
	let fomod = package.path().join("fomod");
	fs::create_dir(&fomod).unwrap();
	fs::write(fomod.join("info.xml"), SAMPLE_INFO).unwrap();

	let error = locate_package_files(package.path()).unwrap_err();
	assert!(error.to_string().contains("ModuleConfig.xml"));
}

#[test]
fn writing_creates_fomod_folder() {
	init_logger();

	let package = tempfile::tempdir().unwrap();
	let root = sample();
	write(&root, Destination::Package(package.path())).unwrap();

	let fomod = package.path().join("fomod");
	assert_eq!(fs::read_to_string(fomod.join("ModuleConfig.xml")).unwrap(), root.render());
	assert_eq!(fs::read_to_string(fomod.join("info.xml")).unwrap(), root.info().render());

	let reparsed = parse(Source::Package(package.path().to_path_buf()), &ParseOptions::default()).unwrap();
	assert_eq!(reparsed.root.render(), root.render());
	assert_eq!(reparsed.root.author(), "Someone");
}

#[test]
fn writing_reuses_existing_names() {
	let package = tempfile::tempdir().unwrap();
	let fomod = package.path().join("Fomod");
	fs::create_dir(&fomod).unwrap();
	fs::write(fomod.join("moduleconfig.xml"), "old").unwrap();

	write(&sample(), Destination::Package(package.path())).unwrap();

	let mut names: Vec<String> = fs::read_dir(&fomod).unwrap()
		.map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
		.collect();

	names.sort();
	assert_eq!(names, vec!["info.xml".to_owned(), "moduleconfig.xml".to_owned()]);
	assert_ne!(fs::read_to_string(fomod.join("moduleconfig.xml")).unwrap(), "old");
}

#[test]
fn writing_to_writers() {
	let root = sample();
	let mut info = Vec::new();
	let mut config = Vec::new();

	write(&root, Destination::Writers { info: &mut info, config: &mut config }).unwrap();
	assert_eq!(String::from_utf8(config).unwrap(), root.render());
	assert!(String::from_utf8(info).unwrap().contains("<Author>Someone</Author>"));
}
