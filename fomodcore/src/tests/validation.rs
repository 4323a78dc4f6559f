// Tests for the linter.

use crate::{
	enums::{GroupType, OptionType, Order},
	tree::{Conditions, Plugin, Root},
	validation::{validate, validate_with, Visitor},
	warnings::ValidationWarning,
};

use super::*;

fn titles(warnings: &[ValidationWarning]) -> Vec<&str> {
	warnings.iter().map(|w| w.title.as_str()).collect()
}

#[test]
fn empty_tree_is_reported() {
	let warnings = validate(&Root::new());
	assert_eq!(titles(&warnings), vec!["Missing Installer Name", "Empty Fomod Tree"]);
}

#[test]
fn sample_package_is_clean() {
	// The second page checks a flag that an option on the first page sets.
	let warnings = validate(&sample());
	assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn flags_nobody_sets_are_impossible() {
	let mut root = single_page(GroupType::Any, vec![plugin_with_file("Option", "a.esp", "a.esp")]);
	root.pages.get_mut(0).unwrap().conditions_mut().set_flag("ghost", "on");

	let warnings = validate(&root);
	let impossible = warnings.iter().find(|w| w.title == "Impossible Flag").unwrap();
	assert_eq!(impossible.message, "The flag 'ghost' is never created or set.");
	assert_eq!(impossible.tag.as_deref(), Some("visible"));
	assert!(impossible.critical);
}

#[test]
fn module_conditions_cannot_check_flags() {
	let mut root = single_page(GroupType::Any, vec![plugin_with_file("Option", "a.esp", "a.esp")]);
	root.conditions_mut().set_flag("early", "on");

	let warnings = validate(&root);
	let warning = warnings.iter().find(|w| w.title == "Impossible Flag").unwrap();
	assert_eq!(warning.message, "Flag early shouldn't be used here since it can't have been set.");
	assert_eq!(warning.tag.as_deref(), Some("moduleDependencies"));
}

#[test]
fn group_rules_are_checked() {
	let root = single_page(GroupType::ExactlyOne, vec![
		plugin("First", OptionType::Required),
		plugin("Second", OptionType::Required),
	]);

	let warnings = validate(&root);
	let warning = warnings.iter().find(|w| w.title == "Too Many Required Options").unwrap();
	assert_eq!(warning.tag.as_deref(), Some("group"));

	let root = single_page(GroupType::AtLeastOne, vec![plugin("Broken", OptionType::NotUsable)]);
	assert!(titles(&validate(&root)).contains(&"Not Enough Selectable Options"));
}

#[test]
fn entity_lints() {
	let mut root = single_page(GroupType::Any, vec![Plugin::new("")]);
	root.pages.order = Order::Ascending;
	root.pages.get_mut(0).unwrap().name.clear();
	root.pages.get_mut(0).unwrap().conditions_mut().push_nested(Conditions::default());

	let warnings = validate(&root);
	let titles = titles(&warnings);

	for expected in [
		"Non Explicit Order",
		"Empty Page Name",
		"Empty Conditions",
		"Empty Option Name",
		"Empty Option Description",
		"Option Does Nothing",
	] {
		assert!(titles.contains(&expected), "missing '{expected}' in {titles:?}");
	}
}

#[derive(Default)]
struct CountPlugins(usize);

impl Visitor for CountPlugins {
	fn visit_plugin(&mut self, _: &Plugin, _: &mut Vec<ValidationWarning>) {
		self.0 += 1;
	}

	fn finish(&mut self, out: &mut Vec<ValidationWarning>) {
		out.push(ValidationWarning::new("Plugin Count", self.0.to_string(), false));
	}
}

#[test]
fn custom_visitors_run_after_builtin_checks() {
	let root = sample();
	let mut counter = CountPlugins::default();

	let warnings = validate_with(&root, &mut [&mut counter]);
	assert_eq!(counter.0, 3);
	assert_eq!(warnings.last().map(|w| w.message.as_str()), Some("3"));
}
