#![allow(missing_docs)]

use std::collections::BTreeMap;

use canonmap::map::{Attribute, CaseRule, Convert, EnumDescriptor, Json, MapError, Path, Registry, StructDescriptor, Toml, Yaml};
use canonmap_testkit::{fixture_json, read_fixture};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
	Input,
	#[default]
	Output,
	Input2,
	Output2,
}

impl Convert for Mode {}

#[derive(Debug, Clone, PartialEq, Default)]
struct Nested {
	version: String,
	opt_desc: Option<String>,
	desc: String,
}

impl Convert for Nested {}

#[derive(Debug, Clone, PartialEq, Default)]
struct Sample {
	text: Option<String>,
	i: i32,
	vec: Option<Vec<String>>,
	io: Mode,
	inputs: Vec<Nested>,
	pri: String,
	m: BTreeMap<String, String>,
	nm: BTreeMap<String, Nested>,
}

impl Convert for Sample {}

fn registry() -> Registry {
	let mode = EnumDescriptor::builder("mode")
		.symbol("INPUT", Mode::Input)
		.symbol("OUTPUT", Mode::Output)
		.symbol("INPUT_2", Mode::Input2)
		.symbol("OUTPUT_2", Mode::Output2)
		.build();
	let nested = StructDescriptor::<Nested>::builder("nested")
		.field("version", |s| &s.version, |s| &mut s.version)
		.field("opt_desc", |s| &s.opt_desc, |s| &mut s.opt_desc)
		.field_with("desc", |s| &s.desc, |s| &mut s.desc, [Attribute::default_value("default value")])
		.strict()
		.build();
	let sample = StructDescriptor::<Sample>::builder("sample")
		.field_with("str", |s| &s.text, |s| &mut s.text, [Attribute::default_value("hello")])
		.field("i", |s| &s.i, |s| &mut s.i)
		.field("vec", |s| &s.vec, |s| &mut s.vec)
		.field_with(
			"io",
			|s| &s.io,
			|s| &mut s.io,
			[
				Attribute::default_value("OUTPUT"),
				Attribute::Case(CaseRule::Lower),
				Attribute::Case(CaseRule::UnderscoreToDash),
			],
		)
		.field_with("in", |s| &s.inputs, |s| &mut s.inputs, [Attribute::MakeOptional, Attribute::ValueOrStruct])
		.field_with(
			"pri",
			|s| &s.pri,
			|s| &mut s.pri,
			[Attribute::Case(CaseRule::Upper), Attribute::Case(CaseRule::UnderscoreToDash)],
		)
		.field_with("m", |s| &s.m, |s| &mut s.m, [Attribute::MakeOptional])
		.field_with("nm", |s| &s.nm, |s| &mut s.nm, [Attribute::MakeOptional, Attribute::ValueOrStruct])
		.build();

	Registry::builder()
		.register_enum(mode)
		.register_struct(nested)
		.register_struct(sample)
		.build()
		.expect("sample registry builds")
}

fn expected() -> Sample {
	let nested = |version: &str| Nested {
		version: version.to_owned(),
		opt_desc: None,
		desc: "default value".to_owned(),
	};
	Sample {
		text: Some("hello".to_owned()),
		i: 10,
		vec: Some(vec!["one".to_owned(), "two".to_owned(), "three".to_owned()]),
		io: Mode::Output2,
		inputs: vec![nested("hello"), nested("single")],
		pri: "PRI_FF".to_owned(),
		m: [("a", "1"), ("b", "2"), ("c", "3")].into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect(),
		nm: [("a", nested("hello")), ("b", nested("hello2"))].into_iter().map(|(k, v)| (k.to_owned(), v)).collect(),
	}
}

#[test]
fn json_fixture_maps_to_sample() {
	let sample: Sample = registry().decode::<Json, _>(&fixture_json("sample.json")).expect("json fixture maps");
	assert_eq!(sample, expected());
}

#[test]
fn toml_fixture_maps_to_sample() {
	let external: toml::Value = toml::from_str(&read_fixture("sample.toml")).expect("toml fixture parses");
	let sample: Sample = registry().decode::<Toml, _>(&external).expect("toml fixture maps");
	assert_eq!(sample, expected());
}

#[test]
fn yaml_fixture_maps_to_sample() {
	let external: serde_yaml::Value = serde_yaml::from_str(&read_fixture("sample.yaml")).expect("yaml fixture parses");
	let sample: Sample = registry().decode::<Yaml, _>(&external).expect("yaml fixture maps");
	assert_eq!(sample, expected());
}

#[test]
fn written_sample_uses_declared_case_rules() {
	let registry = registry();
	let written = registry.encode::<Json, _>(&expected()).expect("sample encodes");
	assert_eq!(written["io"], "output-2");
	assert_eq!(written["pri"], "PRI-FF");
	assert_eq!(written["str"], "hello");
	assert_eq!(written["in"][1]["version"], "single");
	assert_eq!(written["nm"]["b"]["desc"], "default value");
}

#[test]
fn json_fixture_is_stable_across_a_write_and_read() {
	let registry = registry();
	let first: Sample = registry.decode::<Json, _>(&fixture_json("sample.json")).expect("json fixture maps");
	let written = registry.encode::<Json, _>(&first).expect("sample encodes");
	let second: Sample = registry.decode::<Json, _>(&written).expect("written sample maps");
	assert_eq!(second, first);

	let cleared = Sample { text: None, ..first };
	let written = registry.encode::<Json, _>(&cleared).expect("cleared sample encodes");
	assert!(written["str"].is_null());
	let back: Sample = registry.decode::<Json, _>(&written).expect("cleared sample maps");
	assert_eq!(back, cleared);
}

#[test]
fn strict_nested_elements_report_their_path() {
	let err = registry()
		.decode::<Json, Sample>(&fixture_json("strict_extra.json"))
		.expect_err("colour is not a nested field");
	assert_eq!(
		err,
		MapError::UnexpectedFields {
			path: Path::parse("in[1]").expect("path parses"),
			keys: vec!["colour".to_owned()],
		}
	);
	assert_eq!(err.to_string(), "unexpected fields at in[1]: colour");
}

#[test]
fn missing_required_field_is_reported_at_root() {
	let err = registry()
		.decode::<Json, Sample>(&fixture_json("missing_i.json"))
		.expect_err("i is required");
	assert_eq!(err.to_string(), "missing field \"i\" at <root>");
}
