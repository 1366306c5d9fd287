use crate::map::{MapError, Path, PathStep};

#[test]
fn parses_keys_and_indices() {
	let path = Path::parse("in[1].version").expect("path parses");
	assert_eq!(
		path.steps,
		vec![PathStep::Key("in".to_owned()), PathStep::Index(1), PathStep::Key("version".to_owned())]
	);
	assert_eq!(path.to_string(), "in[1].version");
}

#[test]
fn parses_leading_index_and_dashed_keys() {
	let path = Path::parse("[0].opt-desc[2][3]").expect("path parses");
	assert_eq!(
		path.steps,
		vec![
			PathStep::Index(0),
			PathStep::Key("opt-desc".to_owned()),
			PathStep::Index(2),
			PathStep::Index(3),
		]
	);
	assert_eq!(path.to_string(), "[0].opt-desc[2][3]");
}

#[test]
fn rejects_malformed_paths() {
	for input in ["", "a.", ".a", "a..b", "a[", "a[]", "a[x]", "a.[0]", "a b"] {
		let err = Path::parse(input).expect_err("malformed path should fail");
		assert!(matches!(err, MapError::InvalidPath { .. }), "unexpected error for {input:?}: {err}");
	}
}

#[test]
fn root_describes_itself() {
	let mut path = Path::root();
	assert!(path.is_root());
	assert_eq!(path.describe(), "<root>");

	path.push_key("nm");
	path.push_key("b");
	assert_eq!(path.describe(), "nm.b");
	assert_eq!(path.pop(), Some(PathStep::Key("b".to_owned())));
}

#[test]
fn join_concatenates_steps() {
	let base = Path::parse("in[1]").expect("base parses");
	let tail = Path::parse("version").expect("tail parses");
	assert_eq!(base.join(&tail).to_string(), "in[1].version");
	assert_eq!(Path::root().join(&tail), tail);
}
