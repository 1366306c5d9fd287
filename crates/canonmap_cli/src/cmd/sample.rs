//! Bundled example schema used by `map` and `schema`.

use std::collections::BTreeMap;

use canonmap::map::{Attribute, CaseRule, Convert, EnumDescriptor, Registry, Result, StructDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	Input,
	#[default]
	Output,
	Input2,
	Output2,
}

impl Convert for Mode {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Nested {
	pub version: String,
	pub opt_desc: Option<String>,
	pub desc: String,
}

impl Convert for Nested {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sample {
	pub text: Option<String>,
	pub i: i32,
	pub vec: Option<Vec<String>>,
	pub io: Mode,
	pub inputs: Vec<Nested>,
	pub pri: String,
	pub m: BTreeMap<String, String>,
	pub nm: BTreeMap<String, Nested>,
}

impl Convert for Sample {}

/// Registry holding `mode`, `nested`, and `sample`.
pub fn registry() -> Result<Registry> {
	Registry::builder()
		.register_enum(mode())
		.register_struct(nested())
		.register_struct(sample())
		.build()
}

fn mode() -> EnumDescriptor<Mode> {
	EnumDescriptor::builder("mode")
		.symbol("INPUT", Mode::Input)
		.symbol("OUTPUT", Mode::Output)
		.symbol("INPUT_2", Mode::Input2)
		.symbol("OUTPUT_2", Mode::Output2)
		.build()
}

fn nested() -> StructDescriptor<Nested> {
	StructDescriptor::<Nested>::builder("nested")
		.field("version", |s| &s.version, |s| &mut s.version)
		.field("opt_desc", |s| &s.opt_desc, |s| &mut s.opt_desc)
		.field_with("desc", |s| &s.desc, |s| &mut s.desc, [Attribute::default_value("default value")])
		.primary("version")
		.strict()
		.build()
}

fn sample() -> StructDescriptor<Sample> {
	StructDescriptor::<Sample>::builder("sample")
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
		.build()
}
