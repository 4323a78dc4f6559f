// ConditionEvaluator :: Evaluates condition trees against the state of a game.

use std::{cmp::Ordering, collections::HashMap};

use indexmap::IndexMap;

use crate::{
	enums::{ConditionType, FileType},
	error::{ConditionFailure, FailedCondition},
	tree::{Condition, Conditions},
	version,
};

/// Supplies the outside state that conditions are checked against.
pub trait Predicates {
	/// The current game version. Without one, every version requirement passes.
	fn game_version(&self) -> Option<&str>;

	/// Checks whether the current game version satisfies a required version.
	fn version_check(&self, current: &str, required: &str) -> bool {
		version::compare(current, required) != Ordering::Less
	}

	/// The current value of a flag. An unset flag never matches.
	fn flag_value(&self, name: &str) -> Option<String>;

	/// Whether file states can be checked at all. If not, every file requirement passes.
	fn checks_files(&self) -> bool;

	/// The current state of a file, if it can be determined.
	fn file_state(&self, path: &str) -> Option<FileType>;
}

/// Predicates backed by plain data.
#[derive(Clone, Debug, Default)]
pub struct StaticPredicates {
	pub game_version: Option<String>,
	pub flags: IndexMap<String, String>,

	/// Known file states. Leaving this empty turns file checks off.
	pub file_states: Option<HashMap<String, FileType>>,
}

impl Predicates for StaticPredicates {
	fn game_version(&self) -> Option<&str> {
		self.game_version.as_deref()
	}

	fn flag_value(&self, name: &str) -> Option<String> {
		self.flags.get(name).cloned()
	}

	fn checks_files(&self) -> bool {
		self.file_states.is_some()
	}

	fn file_state(&self, path: &str) -> Option<FileType> {
		self.file_states.as_ref()?.get(path).copied()
	}
}

/// Evaluates a condition tree.
///
/// An *And* node stops at its first failing entry and reports only that failure.
/// An *Or* node checks every entry, and fails only when all of them failed, reporting every failure.
/// A node without entries always passes.
pub fn evaluate(conditions: &Conditions, predicates: &impl Predicates) -> Result<(), FailedCondition> {
	evaluate_node(conditions, predicates).map_err(|failures| FailedCondition { failures })
}

fn evaluate_node(conditions: &Conditions, predicates: &impl Predicates) -> Result<(), Vec<ConditionFailure>> {
	let mut failures = Vec::new();
	let mut passed = false;

	for condition in conditions.iter() {
		match evaluate_entry(condition, predicates) {
			Ok(()) => passed = true,
			Err(failure) => {
				failures.push(failure);
				if conditions.operator == ConditionType::And { return Err(failures); }
			},
		}
	}

	match conditions.operator {
		ConditionType::Or if !passed && !failures.is_empty() => Err(failures),
		_ => Ok(()),
	}
}

fn evaluate_entry(condition: &Condition, predicates: &impl Predicates) -> Result<(), ConditionFailure> {
	match condition {
		Condition::Version(required) => {
			let Some(current) = predicates.game_version() else { return Ok(()) };

			match predicates.version_check(current, required) {
				true => Ok(()),
				false => Err(ConditionFailure::new(format!("Game version {current} is older than the required {required}."))),
			}
		},

		Condition::File { path, state } => {
			if !predicates.checks_files() { return Ok(()); }

			let actual = predicates.file_state(path);
			match actual == Some(*state) {
				true => Ok(()),
				false => {
					let actual = actual.map(|a| a.to_string()).unwrap_or_else(|| "unknown".to_owned());
					Err(ConditionFailure::new(format!("File '{path}' should be {state} but is {actual}.")))
				},
			}
		},

		Condition::Flag { name, value } => match predicates.flag_value(name) {
			Some(actual) if actual == *value => Ok(()),
			Some(actual) => Err(ConditionFailure::new(format!("Flag '{name}' should be '{value}' but is '{actual}'."))),
			None => Err(ConditionFailure::new(format!("Flag '{name}' should be '{value}' but is not set."))),
		},

		Condition::Nested(nested) => evaluate_node(nested, predicates).map_err(|failures| ConditionFailure {
			message: format!("Nested {} conditions failed:", nested.operator),
			nested: failures,
		}),
	}
}
