use std::collections::HashMap;
use std::fmt;

use crate::map::{MapError, Path, PathStep, Result};

/// Largest integer magnitude that widens to `f64` without rounding.
const MAX_EXACT_FLOAT_INT: i64 = 1 << 53;

/// Variant tag of a canonical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Absent/null value.
	Null,
	/// Boolean.
	Bool,
	/// Signed 64-bit integer.
	Int,
	/// 64-bit float.
	Float,
	/// Text.
	String,
	/// Ordered sequence.
	Array,
	/// Keyed mapping.
	Object,
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::String => "string",
			Self::Array => "array",
			Self::Object => "object",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Format-neutral tree value every conversion passes through.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Absent/null value.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed 64-bit integer.
	Int(i64),
	/// 64-bit float.
	Float(f64),
	/// Text.
	String(Box<str>),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// Keyed mapping with unique keys.
	Object(Object),
}

/// One object member.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
	/// Member key.
	pub key: Box<str>,
	/// Member value.
	pub value: Value,
}

/// Insertion-ordered mapping of unique text keys to values.
///
/// Equality ignores member order: two objects are equal when they hold the same
/// keys bound to equal values. Key lookups go through a hash index.
#[derive(Debug, Clone, Default)]
pub struct Object {
	entries: Vec<Entry>,
	index: HashMap<Box<str>, usize>,
}

impl Object {
	/// Create an empty object.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an empty object with room for `capacity` members.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: Vec::with_capacity(capacity),
			index: HashMap::with_capacity(capacity),
		}
	}

	/// Number of members.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the object has no members.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up a member by key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.index.get(key).map(|&position| &self.entries[position].value)
	}

	/// Whether `key` is present.
	pub fn contains_key(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// Insert a member, replacing an existing value in place.
	///
	/// Returns the previous value for `key`, if any. Replacement keeps the
	/// member's original position.
	pub fn insert(&mut self, key: impl Into<Box<str>>, value: Value) -> Option<Value> {
		let key = key.into();
		if let Some(&position) = self.index.get(&key) {
			return Some(std::mem::replace(&mut self.entries[position].value, value));
		}
		self.index.insert(key.clone(), self.entries.len());
		self.entries.push(Entry { key, value });
		None
	}

	/// Remove a member by key, preserving the order of the rest.
	pub fn remove(&mut self, key: &str) -> Option<Value> {
		let position = self.index.remove(key)?;
		let removed = self.entries.remove(position);
		for entry in &self.entries[position..] {
			if let Some(slot) = self.index.get_mut(&entry.key) {
				*slot -= 1;
			}
		}
		Some(removed.value)
	}

	/// Members in insertion order.
	pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
		self.entries.iter()
	}

	/// Keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.key.as_ref())
	}
}

impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len()
			&& self
				.entries
				.iter()
				.all(|entry| other.get(&entry.key).is_some_and(|value| *value == entry.value))
	}
}

impl<'a> IntoIterator for &'a Object {
	type Item = &'a Entry;
	type IntoIter = std::slice::Iter<'a, Entry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl IntoIterator for Object {
	type Item = Entry;
	type IntoIter = std::vec::IntoIter<Entry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl<K: Into<Box<str>>> FromIterator<(K, Value)> for Object {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		let mut out = Object::new();
		for (key, value) in iter {
			out.insert(key, value);
		}
		out
	}
}

impl Value {
	/// Build a string value.
	pub fn string(text: impl Into<Box<str>>) -> Self {
		Self::String(text.into())
	}

	/// Variant tag.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Null => Kind::Null,
			Self::Bool(_) => Kind::Bool,
			Self::Int(_) => Kind::Int,
			Self::Float(_) => Kind::Float,
			Self::String(_) => Kind::String,
			Self::Array(_) => Kind::Array,
			Self::Object(_) => Kind::Object,
		}
	}

	/// Whether this is `Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Whether this is a non-null leaf (bool, number, or string).
	pub fn is_scalar(&self) -> bool {
		matches!(self, Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_))
	}

	/// Boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Integer payload.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Float payload, widening integers that convert exactly.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(v) => Some(*v),
			Self::Int(v) if v.unsigned_abs() <= MAX_EXACT_FLOAT_INT as u64 => Some(*v as f64),
			_ => None,
		}
	}

	/// String payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(v),
			_ => None,
		}
	}

	/// Array payload.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(v) => Some(v),
			_ => None,
		}
	}

	/// Object payload.
	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(v) => Some(v),
			_ => None,
		}
	}

	/// Boolean payload or a root-relative `TypeMismatch`.
	pub fn try_bool(&self) -> Result<bool> {
		self.as_bool().ok_or_else(|| self.mismatch(Kind::Bool))
	}

	/// Integer payload or a root-relative `TypeMismatch`.
	pub fn try_int(&self) -> Result<i64> {
		self.as_int().ok_or_else(|| self.mismatch(Kind::Int))
	}

	/// Float payload or a root-relative error.
	///
	/// Integers widen when the conversion is exact; larger magnitudes fail with
	/// `IntOutOfRange` instead of rounding.
	pub fn try_float(&self) -> Result<f64> {
		match self {
			Self::Int(v) => self.as_float().ok_or(MapError::IntOutOfRange {
				path: Path::root(),
				value: *v,
				target: "f64",
			}),
			_ => self.as_float().ok_or_else(|| self.mismatch(Kind::Float)),
		}
	}

	/// String payload or a root-relative `TypeMismatch`.
	pub fn try_str(&self) -> Result<&str> {
		self.as_str().ok_or_else(|| self.mismatch(Kind::String))
	}

	/// Array payload or a root-relative `TypeMismatch`.
	pub fn try_array(&self) -> Result<&[Value]> {
		self.as_array().ok_or_else(|| self.mismatch(Kind::Array))
	}

	/// Object payload or a root-relative `TypeMismatch`.
	pub fn try_object(&self) -> Result<&Object> {
		self.as_object().ok_or_else(|| self.mismatch(Kind::Object))
	}

	/// Follow `path` from this value.
	pub fn select(&self, path: &Path) -> Option<&Value> {
		let mut current = self;
		for step in &path.steps {
			current = match (step, current) {
				(PathStep::Key(key), Self::Object(object)) => object.get(key)?,
				(PathStep::Index(index), Self::Array(items)) => items.get(*index)?,
				_ => return None,
			};
		}
		Some(current)
	}

	fn mismatch(&self, expected: Kind) -> MapError {
		MapError::TypeMismatch {
			path: Path::root(),
			expected,
			actual: self.kind(),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Self::Array(value)
	}
}

impl From<Object> for Value {
	fn from(value: Object) -> Self {
		Self::Object(value)
	}
}
