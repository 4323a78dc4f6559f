// Tests for condition evaluation.

use std::{cell::Cell, collections::HashMap};

use crate::{
	conditions::{evaluate, Predicates, StaticPredicates},
	enums::{ConditionType, FileType},
	tree::Conditions,
};

fn flags(pairs: &[(&str, &str)]) -> StaticPredicates {
	StaticPredicates {
		flags: pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
		..Default::default()
	}
}

#[test]
fn empty_conditions_pass() {
	assert!(evaluate(&Conditions::new(ConditionType::And), &StaticPredicates::default()).is_ok());
	assert!(evaluate(&Conditions::new(ConditionType::Or), &StaticPredicates::default()).is_ok());
}

#[test]
fn and_stops_at_first_failure() {
	let mut conditions = Conditions::new(ConditionType::And);
	conditions.set_flag("a", "1");
	conditions.set_flag("b", "2");
	conditions.set_flag("c", "3");

	let error = evaluate(&conditions, &flags(&[("c", "3")])).unwrap_err();
	assert_eq!(error.messages(), vec!["Flag 'a' should be '1' but is not set."]);
}

/// Predicates with no flags set, counting how often a flag was looked up.
#[derive(Default)]
struct CountingPredicates {
	lookups: Cell<usize>,
}

impl Predicates for CountingPredicates {
	fn game_version(&self) -> Option<&str> {
		None
	}

	fn flag_value(&self, _name: &str) -> Option<String> {
		self.lookups.set(self.lookups.get() + 1);
		None
	}

	fn checks_files(&self) -> bool {
		false
	}

	fn file_state(&self, _path: &str) -> Option<FileType> {
		None
	}
}

#[test]
fn and_never_checks_entries_after_a_failure() {
	let mut conditions = Conditions::new(ConditionType::And);
	for name in ["a", "b", "c"] { conditions.set_flag(name, "on"); }

	let predicates = CountingPredicates::default();
	assert!(evaluate(&conditions, &predicates).is_err());
	assert_eq!(predicates.lookups.get(), 1);

	conditions.operator = ConditionType::Or;
	let predicates = CountingPredicates::default();
	assert!(evaluate(&conditions, &predicates).is_err());
	assert_eq!(predicates.lookups.get(), 3);
}

#[test]
fn or_reports_every_failure() {
	let mut conditions = Conditions::new(ConditionType::Or);
	conditions.set_flag("a", "1");
	conditions.set_flag("b", "2");
	conditions.set_flag("c", "3");

	let error = evaluate(&conditions, &flags(&[("a", "0")])).unwrap_err();
	assert_eq!(error.messages().len(), 3);
	assert_eq!(error.messages()[0], "Flag 'a' should be '1' but is '0'.");

	assert!(evaluate(&conditions, &flags(&[("b", "2")])).is_ok());
}

#[test]
fn nested_failures_are_indented() {
	let mut nested = Conditions::new(ConditionType::Or);
	nested.set_flag("x", "on");

	let mut conditions = Conditions::new(ConditionType::And);
	conditions.push_nested(nested);

	let error = evaluate(&conditions, &StaticPredicates::default()).unwrap_err();
	assert_eq!(error.messages(), vec!["Nested Or conditions failed:", "Flag 'x' should be 'on' but is not set."]);
	assert_eq!(
		error.to_string(),
		"The following conditions were not met:\n  - Nested Or conditions failed:\n    - Flag 'x' should be 'on' but is not set.\n",
	);
}

#[test]
fn version_checks_need_a_game_version() {
	let mut conditions = Conditions::default();
	conditions.set_version("1.5");

	assert!(evaluate(&conditions, &StaticPredicates::default()).is_ok());

	let old = StaticPredicates { game_version: Some("1.4.9".into()), ..Default::default() };
	let error = evaluate(&conditions, &old).unwrap_err();
	assert_eq!(error.messages(), vec!["Game version 1.4.9 is older than the required 1.5."]);

	let new = StaticPredicates { game_version: Some("1.10".into()), ..Default::default() };
	assert!(evaluate(&conditions, &new).is_ok());
}

#[test]
fn file_checks_need_file_states() {
	let mut conditions = Conditions::default();
	conditions.set_file("plugin.esp", FileType::Active);

	assert!(evaluate(&conditions, &StaticPredicates::default()).is_ok());

	let states = StaticPredicates { file_states: Some(HashMap::new()), ..Default::default() };
	let error = evaluate(&conditions, &states).unwrap_err();
	assert_eq!(error.messages(), vec!["File 'plugin.esp' should be Active but is unknown."]);

	let states = StaticPredicates {
		file_states: Some(HashMap::from([("plugin.esp".to_owned(), FileType::Active)])),
		..Default::default()
	};

	assert!(evaluate(&conditions, &states).is_ok());
}
