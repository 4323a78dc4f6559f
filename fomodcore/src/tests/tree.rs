// Tests for the document model and its rendering.

use crate::{
	enums::{order_list, ConditionType, FileType, GroupType, Order},
	error::MutationError,
	render::Render,
	tree::{Condition, ConditionKey, ConditionValue, Conditions, FileKind, Files, Group, Page, Root},
};

use super::*;

#[test]
fn info_keys_are_case_insensitive() {
	let mut root = sample();
	assert_eq!(root.author(), "Someone");
	assert_eq!(root.info().get_text("AUTHOR"), "Someone");
	assert_eq!(root.info().get_text("Nonexistent"), "");

	root.info_mut().set_text("author", "Someone Else");
	assert_eq!(root.author(), "Someone Else");

	// The original spelling of the key is kept.
	assert!(root.info().iter().any(|(key, value)| key == "Author" && value == "Someone Else"));
	assert_eq!(root.info().len(), 4);
}

#[test]
fn conditions_replace_entries_in_place() {
	let mut conditions = Conditions::new(ConditionType::Or);
	conditions.set_flag("a", "1");
	conditions.set_version("1.0");
	conditions.set_file("b.esp", FileType::Active);

	let replaced = conditions.set_flag("a", "2");
	assert_eq!(replaced, Some(Condition::Flag { name: "a".into(), value: "1".into() }));
	assert_eq!(conditions.len(), 3);
	assert_eq!(conditions.get("a"), Some(&Condition::Flag { name: "a".into(), value: "2".into() }));

	conditions.set_version("2.0");
	assert_eq!(conditions.version(), Some("2.0"));
	assert_eq!(conditions.len(), 3);

	// Nested nodes are never merged.
	conditions.push_nested(Conditions::new(ConditionType::And));
	conditions.push_nested(Conditions::new(ConditionType::And));
	assert_eq!(conditions.len(), 5);

	assert!(conditions.remove("b.esp").is_some());
	assert_eq!(conditions.remove_version(), Some("2.0".to_owned()));
	assert_eq!(conditions.len(), 3);
}

#[test]
fn conditions_reject_invalid_shapes() {
	let mut conditions = Conditions::default();

	let result = conditions.set(ConditionKey::Version, Some(ConditionValue::State(FileType::Missing)));
	assert!(matches!(result, Err(MutationError::Shape(_))));

	let result = conditions.set(ConditionKey::Name("flag".into()), None);
	assert!(matches!(result, Err(MutationError::Shape(_))));

	let result = conditions.set(
		ConditionKey::Nested(Conditions::default()),
		Some(ConditionValue::Text("value".into())),
	);

	assert!(matches!(result, Err(MutationError::Shape(_))));
	assert!(conditions.is_empty());

	conditions.set(ConditionKey::Name("flag".into()), Some(ConditionValue::Text("on".into()))).unwrap();
	assert_eq!(conditions.len(), 1);
}

#[test]
fn files_treat_trailing_separators_as_folders() {
	let mut files = Files::new();
	files.insert("meshes/", "data/meshes");
	files.insert("plugin.esp", "plugin.esp");

	let folder = files.get("meshes/").unwrap();
	assert_eq!(folder.kind, FileKind::Folder);
	assert_eq!(folder.source, "meshes");
	assert!(files.contains("meshes"));

	// Updating an existing key only changes its destination.
	files.insert("meshes", "other");
	assert_eq!(files.len(), 2);
	assert_eq!(files.destination("meshes\\"), Some("other"));
	assert_eq!(files.get("meshes").unwrap().kind, FileKind::Folder);

	let keys: Vec<String> = files.keys().collect();
	assert_eq!(keys, vec!["meshes/".to_owned(), "plugin.esp".to_owned()]);
}

#[test]
fn sequences_check_their_indices() {
	let mut page = Page::new("Page");
	page.push(Group::new("First", GroupType::Any));

	assert!(page.insert(1, Group::new("Second", GroupType::Any)).is_ok());
	assert_eq!(page.insert(5, Group::default()), Err(MutationError::IndexOutOfRange { index: 5, len: 2 }));
	assert_eq!(page.remove(2).err(), Some(MutationError::IndexOutOfRange { index: 2, len: 2 }));

	let old = page.set(0, Group::new("Replaced", GroupType::All)).unwrap();
	assert_eq!(old.name, "First");
	assert_eq!(page.get(0).map(|g| g.name.as_str()), Some("Replaced"));
}

#[test]
fn order_list_sorts_stably() {
	let names = vec!["b", "a", "c", "a"];
	let indexed: Vec<(usize, &str)> = names.into_iter().enumerate().collect();

	let ascending = order_list(indexed.clone(), |(_, n)| *n, Order::Ascending);
	assert_eq!(ascending, vec![(1, "a"), (3, "a"), (0, "b"), (2, "c")]);

	let descending = order_list(indexed.clone(), |(_, n)| *n, Order::Descending);
	assert_eq!(descending, vec![(2, "c"), (0, "b"), (1, "a"), (3, "a")]);

	let explicit = order_list(indexed.clone(), |(_, n)| *n, Order::Explicit);
	assert_eq!(explicit, indexed);
}

#[test]
fn enums_parse_their_document_spelling() {
	assert_eq!("SelectExactlyOne".parse::<GroupType>(), Ok(GroupType::ExactlyOne));
	assert_eq!(GroupType::Any.to_string(), "SelectAny");

	let error = "Sideways".parse::<Order>().unwrap_err();
	assert_eq!(error.value, "Sideways");
}

#[test]
fn pages_are_traversed_in_their_order() {
	let mut root = Root::new();
	for name in ["Beta", "Alpha", "Gamma"] { root.pages.push(Page::new(name)); }

	root.pages.order = Order::Ascending;
	let names: Vec<&str> = root.pages.ordered().into_iter().map(|(_, p)| p.name.as_str()).collect();
	assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);

	// Stored order never changes.
	assert_eq!(root.pages.get(0).map(|p| p.name.as_str()), Some("Beta"));
}

#[test]
fn groups_and_options_keep_their_stored_indices() {
	let mut page = Page::new("Page");
	page.order = Order::Descending;

	let mut group = Group::new("Group", GroupType::Any);
	group.order = Order::Ascending;
	for name in ["b", "c", "a"] { group.push(plugin(name, OptionType::Optional)); }

	page.push(Group::new("First", GroupType::Any));
	page.push(group);

	let groups = page.ordered_groups().into_iter().map(|(i, g)| (i, g.name.as_str())).collect::<Vec<_>>();
	assert_eq!(groups, vec![(1, "Group"), (0, "First")]);

	let Some(group) = page.get(1) else { panic!("group is missing") };
	let plugins = group.ordered_plugins().into_iter().map(|(i, p)| (i, p.name.as_str())).collect::<Vec<_>>();
	assert_eq!(plugins, vec![(2, "a"), (0, "b"), (1, "c")]);
}

#[test]
fn empty_tree_renders_minimal_config() {
	init_logger();

	let text = Root::new().render();
	assert!(text.starts_with("<config xmlns:xsi="));
	assert!(text.contains("  <moduleName/>\n"));
	assert!(!text.contains("installSteps"));
	assert!(text.ends_with("</config>\n"));
}

#[test]
fn rendering_escapes_text() {
	let mut root = Root::new();
	root.name = "Salt & \"Pepper\" <Deluxe>".to_owned();

	let text = root.render();
	assert!(text.contains("<moduleName>Salt &amp; \"Pepper\" &lt;Deluxe&gt;</moduleName>"));
}

#[test]
fn file_priority_is_only_written_when_set() {
	let mut files = files_of(vec![file("a.esp", "a.esp")]);
	assert!(!files.render().contains("priority"));

	if let Some(entry) = files.get_mut("a.esp") { entry.priority = 3; }
	assert!(files.render().contains(r#"<file source="a.esp" destination="a.esp" priority="3"/>"#));
}
