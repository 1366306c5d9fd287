#![allow(missing_docs)]

use std::collections::BTreeMap;

use canonmap::map::{Attribute, CaseRule, Convert, Format, Json, Registry, StructDescriptor, Toml, Value, Yaml};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
	prop_oneof![
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::Int),
		(-1.0e12..1.0e12_f64).prop_map(Value::Float),
		"[a-zA-Z0-9 _-]{0,12}".prop_map(Value::from),
	]
}

fn tree(leaf: BoxedStrategy<Value>) -> impl Strategy<Value = Value> {
	leaf.prop_recursive(3, 32, 4, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
			prop::collection::vec(("[a-z][a-z0-9_-]{0,6}", inner), 0..4)
				.prop_map(|members| Value::Object(members.into_iter().collect())),
		]
	})
}

fn with_nulls() -> impl Strategy<Value = Value> {
	tree(prop_oneof![Just(Value::Null), scalar()].boxed())
}

fn without_nulls() -> impl Strategy<Value = Value> {
	tree(scalar().boxed())
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Record {
	name: String,
	count: i32,
	ratio: f64,
	tags: Vec<String>,
	labels: BTreeMap<String, i64>,
	note: Option<String>,
}

impl Convert for Record {}

fn registry() -> Registry {
	Registry::builder()
		.register_struct(
			StructDescriptor::<Record>::builder("record")
				.field("name", |s| &s.name, |s| &mut s.name)
				.field("count", |s| &s.count, |s| &mut s.count)
				.field("ratio", |s| &s.ratio, |s| &mut s.ratio)
				.field_with("tags", |s| &s.tags, |s| &mut s.tags, [Attribute::MakeOptional, Attribute::Case(CaseRule::UnderscoreToDash)])
				.field_with("labels", |s| &s.labels, |s| &mut s.labels, [Attribute::MakeOptional])
				.field("note", |s| &s.note, |s| &mut s.note)
				.strict()
				.build(),
		)
		.build()
		.expect("record registry builds")
}

fn record() -> impl Strategy<Value = Record> {
	(
		"[a-z]{0,8}",
		any::<i32>(),
		(-1.0e9..1.0e9_f64),
		prop::collection::vec("[a-z_]{1,6}", 0..4),
		prop::collection::btree_map("[a-z]{1,4}", any::<i64>(), 0..4),
		prop::option::of("[a-z ]{0,8}"),
	)
		.prop_map(|(name, count, ratio, tags, labels, note)| Record {
			name,
			count,
			ratio,
			tags,
			labels,
			note,
		})
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(256))]

	#[test]
	fn json_round_trips_every_value(value in with_nulls()) {
		prop_assert_eq!(Json::to_canonical(&Json::from_canonical(&value))?, value);
	}

	#[test]
	fn yaml_round_trips_every_value(value in with_nulls()) {
		prop_assert_eq!(Yaml::to_canonical(&Yaml::from_canonical(&value))?, value);
	}

	#[test]
	fn toml_round_trips_null_free_values(value in without_nulls()) {
		prop_assert_eq!(Toml::to_canonical(&Toml::from_canonical(&value))?, value);
	}

	#[test]
	fn records_round_trip_through_every_adaptor(record in record()) {
		let registry = registry();
		let json: Record = registry.decode::<Json, _>(&registry.encode::<Json, _>(&record)?)?;
		prop_assert_eq!(&json, &record);
		let toml: Record = registry.decode::<Toml, _>(&registry.encode::<Toml, _>(&record)?)?;
		prop_assert_eq!(&toml, &record);
		let yaml: Record = registry.decode::<Yaml, _>(&registry.encode::<Yaml, _>(&record)?)?;
		prop_assert_eq!(&yaml, &record);
	}
}
