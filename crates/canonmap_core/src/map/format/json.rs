//! JSON adaptor over `serde_json::Value`.
//!
//! Lossy cases:
//! - integers above `i64::MAX` are rejected with `UnsupportedValue`;
//! - non-finite floats have no JSON form and are written as `null`.

use serde_json::{Map, Number};

use crate::map::{Format, MapError, Object, Path, Result, Value};

/// JSON value model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Format for Json {
	type External = serde_json::Value;

	const NAME: &'static str = "json";

	fn to_canonical(external: &serde_json::Value) -> Result<Value> {
		read(external, &mut Path::root())
	}

	fn from_canonical(value: &Value) -> serde_json::Value {
		write(value)
	}
}

fn read(external: &serde_json::Value, path: &mut Path) -> Result<Value> {
	Ok(match external {
		serde_json::Value::Null => Value::Null,
		serde_json::Value::Bool(value) => Value::Bool(*value),
		serde_json::Value::Number(number) => read_number(number, path)?,
		serde_json::Value::String(text) => Value::string(text.as_str()),
		serde_json::Value::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for (index, item) in items.iter().enumerate() {
				path.push_index(index);
				out.push(read(item, path)?);
				path.pop();
			}
			Value::Array(out)
		}
		serde_json::Value::Object(members) => {
			let mut out = Object::with_capacity(members.len());
			for (key, item) in members {
				path.push_key(key);
				out.insert(key.as_str(), read(item, path)?);
				path.pop();
			}
			Value::Object(out)
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

fn write(value: &Value) -> serde_json::Value {
	match value {
		Value::Null => serde_json::Value::Null,
		Value::Bool(value) => serde_json::Value::Bool(*value),
		Value::Int(value) => serde_json::Value::Number((*value).into()),
		Value::Float(value) => Number::from_f64(*value).map_or(serde_json::Value::Null, serde_json::Value::Number),
		Value::String(text) => serde_json::Value::String(text.to_string()),
		Value::Array(items) => serde_json::Value::Array(items.iter().map(write).collect()),
		Value::Object(object) => {
			let mut members = Map::with_capacity(object.len());
			for entry in object {
				members.insert(entry.key.to_string(), write(&entry.value));
			}
			serde_json::Value::Object(members)
		}
	}
}
