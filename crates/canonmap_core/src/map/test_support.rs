use std::collections::BTreeMap;

use crate::map::{Attribute, CaseRule, Convert, EnumDescriptor, Registry, StructDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Mode {
	Input,
	#[default]
	Output,
	Input2,
	Output2,
}

impl Convert for Mode {}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Nested {
	pub(crate) version: String,
	pub(crate) opt_desc: Option<String>,
	pub(crate) desc: String,
}

impl Convert for Nested {}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Sample {
	pub(crate) text: Option<String>,
	pub(crate) i: i32,
	pub(crate) vec: Option<Vec<String>>,
	pub(crate) io: Mode,
	pub(crate) inputs: Vec<Nested>,
	pub(crate) pri: String,
	pub(crate) m: BTreeMap<String, String>,
	pub(crate) nm: BTreeMap<String, Nested>,
}

impl Convert for Sample {}

pub(crate) fn mode_descriptor() -> EnumDescriptor<Mode> {
	EnumDescriptor::builder("mode")
		.symbol("INPUT", Mode::Input)
		.symbol("OUTPUT", Mode::Output)
		.symbol("INPUT_2", Mode::Input2)
		.symbol("OUTPUT_2", Mode::Output2)
		.build()
}

pub(crate) fn nested_descriptor() -> StructDescriptor<Nested> {
	StructDescriptor::<Nested>::builder("nested")
		.field("version", |s| &s.version, |s| &mut s.version)
		.field("opt_desc", |s| &s.opt_desc, |s| &mut s.opt_desc)
		.field_with("desc", |s| &s.desc, |s| &mut s.desc, [Attribute::default_value("default value")])
		.strict()
		.build()
}

pub(crate) fn sample_descriptor() -> StructDescriptor<Sample> {
	let shouting = [Attribute::Case(CaseRule::Upper), Attribute::Case(CaseRule::UnderscoreToDash)];
	StructDescriptor::<Sample>::builder("sample")
		.field_with("str", |s| &s.text, |s| &mut s.text, [Attribute::default_value("hello")])
		.field("i", |s| &s.i, |s| &mut s.i)
		.field("vec", |s| &s.vec, |s| &mut s.vec)
		.field_with(
			"io",
			|s| &s.io,
			|s| &mut s.io,
			[Attribute::default_value("OUTPUT"), shouting[0].clone(), shouting[1].clone()],
		)
		.field_with("in", |s| &s.inputs, |s| &mut s.inputs, [Attribute::MakeOptional, Attribute::ValueOrStruct])
		.field_with("pri", |s| &s.pri, |s| &mut s.pri, [Attribute::MakeOptional, shouting[0].clone(), shouting[1].clone()])
		.field_with("m", |s| &s.m, |s| &mut s.m, [Attribute::MakeOptional])
		.field_with("nm", |s| &s.nm, |s| &mut s.nm, [Attribute::MakeOptional, Attribute::ValueOrStruct])
		.build()
}

pub(crate) fn sample_registry() -> Registry {
	Registry::builder()
		.register_enum(mode_descriptor())
		.register_struct(nested_descriptor())
		.register_struct(sample_descriptor())
		.build()
		.expect("sample registry builds")
}

pub(crate) fn nested(version: &str) -> Nested {
	Nested {
		version: version.to_owned(),
		opt_desc: None,
		desc: "default value".to_owned(),
	}
}
