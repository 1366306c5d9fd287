//! TOML adaptor over `toml::Value`.
//!
//! Lossy cases:
//! - datetimes are rejected with `UnsupportedValue`;
//! - TOML has no null: null object members are omitted, and null array
//!   elements or a null root are written as empty tables.

use ::toml::value::{Array, Table};

use crate::map::{Format, MapError, Object, Path, Result, Value};

/// TOML value model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toml;

impl Format for Toml {
	type External = ::toml::Value;

	const NAME: &'static str = "toml";

	fn to_canonical(external: &::toml::Value) -> Result<Value> {
		read(external, &mut Path::root())
	}

	fn from_canonical(value: &Value) -> ::toml::Value {
		write(value).unwrap_or_else(|| ::toml::Value::Table(Table::new()))
	}
}

fn read(external: &::toml::Value, path: &mut Path) -> Result<Value> {
	Ok(match external {
		::toml::Value::Boolean(value) => Value::Bool(*value),
		::toml::Value::Integer(value) => Value::Int(*value),
		::toml::Value::Float(value) => Value::Float(*value),
		::toml::Value::String(text) => Value::string(text.as_str()),
		::toml::Value::Datetime(datetime) => {
			return Err(MapError::UnsupportedValue {
				path: path.clone(),
				external: format!("datetime {datetime}"),
			});
		}
		::toml::Value::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for (index, item) in items.iter().enumerate() {
				path.push_index(index);
				out.push(read(item, path)?);
				path.pop();
			}
			Value::Array(out)
		}
		::toml::Value::Table(members) => {
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

fn write(value: &Value) -> Option<::toml::Value> {
	Some(match value {
		Value::Null => return None,
		Value::Bool(value) => ::toml::Value::Boolean(*value),
		Value::Int(value) => ::toml::Value::Integer(*value),
		Value::Float(value) => ::toml::Value::Float(*value),
		Value::String(text) => ::toml::Value::String(text.to_string()),
		Value::Array(items) => ::toml::Value::Array(
			items
				.iter()
				.map(|item| write(item).unwrap_or_else(|| ::toml::Value::Table(Table::new())))
				.collect::<Array>(),
		),
		Value::Object(object) => {
			let mut members = Table::new();
			for entry in object {
				if let Some(item) = write(&entry.value) {
					members.insert(entry.key.to_string(), item);
				}
			}
			::toml::Value::Table(members)
		}
	})
}
