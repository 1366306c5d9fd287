//! YAML adaptor over `serde_yaml::Value`.
//!
//! Lossy cases:
//! - tagged values and mapping keys that are not strings are rejected with
//!   `UnsupportedValue`;
//! - integers above `i64::MAX` are rejected with `UnsupportedValue`.

use serde_yaml::{Mapping, Number};

use crate::map::{Format, MapError, Object, Path, Result, Value};

/// YAML value model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Format for Yaml {
	type External = serde_yaml::Value;

	const NAME: &'static str = "yaml";

	fn to_canonical(external: &serde_yaml::Value) -> Result<Value> {
		read(external, &mut Path::root())
	}

	fn from_canonical(value: &Value) -> serde_yaml::Value {
		write(value)
	}
}

fn read(external: &serde_yaml::Value, path: &mut Path) -> Result<Value> {
	Ok(match external {
		serde_yaml::Value::Null => Value::Null,
		serde_yaml::Value::Bool(value) => Value::Bool(*value),
		serde_yaml::Value::Number(number) => read_number(number, path)?,
		serde_yaml::Value::String(text) => Value::string(text.as_str()),
		serde_yaml::Value::Sequence(items) => {
			let mut out = Vec::with_capacity(items.len());
			for (index, item) in items.iter().enumerate() {
				path.push_index(index);
				out.push(read(item, path)?);
				path.pop();
			}
			Value::Array(out)
		}
		serde_yaml::Value::Mapping(members) => {
			let mut out = Object::with_capacity(members.len());
			for (key, item) in members {
				let serde_yaml::Value::String(key) = key else {
					return Err(MapError::UnsupportedValue {
						path: path.clone(),
						external: format!("non-string mapping key {}", describe(key)),
					});
				};
				path.push_key(key);
				out.insert(key.as_str(), read(item, path)?);
				path.pop();
			}
			Value::Object(out)
		}
		serde_yaml::Value::Tagged(tagged) => {
			return Err(MapError::UnsupportedValue {
				path: path.clone(),
				external: format!("tagged value {}", tagged.tag),
			});
		}
	})
}

fn read_number(number: &Number, path: &Path) -> Result<Value> {
	if let Some(value) = number.as_i64() {
		return Ok(Value::Int(value));
	}
	if number.is_u64() {
		return Err(MapError::UnsupportedValue {
			path: path.clone(),
			external: format!("integer {number} above i64::MAX"),
		});
	}
	match number.as_f64() {
		Some(value) => Ok(Value::Float(value)),
		None => Err(MapError::UnsupportedValue {
			path: path.clone(),
			external: format!("number {number}"),
		}),
	}
}

fn describe(key: &serde_yaml::Value) -> &'static str {
	match key {
		serde_yaml::Value::Null => "null",
		serde_yaml::Value::Bool(_) => "bool",
		serde_yaml::Value::Number(_) => "number",
		serde_yaml::Value::String(_) => "string",
		serde_yaml::Value::Sequence(_) => "sequence",
		serde_yaml::Value::Mapping(_) => "mapping",
		serde_yaml::Value::Tagged(_) => "tagged",
	}
}

fn write(value: &Value) -> serde_yaml::Value {
	match value {
		Value::Null => serde_yaml::Value::Null,
		Value::Bool(value) => serde_yaml::Value::Bool(*value),
		Value::Int(value) => serde_yaml::Value::Number((*value).into()),
		Value::Float(value) => serde_yaml::Value::Number((*value).into()),
		Value::String(text) => serde_yaml::Value::String(text.to_string()),
		Value::Array(items) => serde_yaml::Value::Sequence(items.iter().map(write).collect()),
		Value::Object(object) => {
			let mut members = Mapping::with_capacity(object.len());
			for entry in object {
				members.insert(serde_yaml::Value::String(entry.key.to_string()), write(&entry.value));
			}
			serde_yaml::Value::Mapping(members)
		}
	}
}
