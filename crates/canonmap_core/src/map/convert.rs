use std::collections::{BTreeMap, HashMap};

use crate::map::{Kind, MapError, Object, Path, Registry, Result, Shape, TypeRef, Value};

/// Traversal state shared by one conversion.
pub struct Context<'r> {
	registry: &'r Registry,
	path: Path,
}

impl<'r> Context<'r> {
	/// Start a conversion at the root.
	pub fn new(registry: &'r Registry) -> Self {
		Self {
			registry,
			path: Path::root(),
		}
	}

	/// Registry resolving nested struct and enum types.
	pub fn registry(&self) -> &'r Registry {
		self.registry
	}

	/// Current location from the conversion root.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Run `f` one object member deeper.
	pub fn at_key<T>(&mut self, key: &str, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		self.path.push_key(key);
		let out = f(self);
		self.path.pop();
		out
	}

	/// Run `f` one array element deeper.
	pub fn at_index<T>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		self.path.push_index(index);
		let out = f(self);
		self.path.pop();
		out
	}

	/// `TypeMismatch` for `value` at the current location.
	pub fn mismatch(&self, expected: Kind, value: &Value) -> MapError {
		MapError::TypeMismatch {
			path: self.path.clone(),
			expected,
			actual: value.kind(),
		}
	}

	/// Re-root an error raised relative to the current value.
	pub fn rebase(&self, err: MapError) -> MapError {
		err.rebase(&self.path)
	}
}

/// Native type that converts to and from canonical values.
///
/// The provided methods route through the registry, so a registered struct or
/// enum only needs an empty `impl Convert for MyType {}`.
pub trait Convert: Sized + 'static {
	/// Structural outline used to steer field attributes.
	fn shape() -> Shape {
		Shape::Named(TypeRef::of::<Self>())
	}

	/// Build a native value from `value`.
	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		cx.registry().read_named(value, cx)
	}

	/// Render `self` as a canonical value.
	fn write(&self, cx: &mut Context<'_>) -> Result<Value> {
		cx.registry().write_named(self, cx)
	}

	/// The "no value" state used by optional fields, if the type has one.
	fn no_value() -> Option<Self> {
		None
	}

	/// Whether `self` differs from the "no value" state.
	fn has_value(&self) -> bool {
		true
	}
}

impl Convert for bool {
	fn shape() -> Shape {
		Shape::Bool
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		value.try_bool().map_err(|err| cx.rebase(err))
	}

	fn write(&self, _cx: &mut Context<'_>) -> Result<Value> {
		Ok(Value::Bool(*self))
	}

	fn no_value() -> Option<Self> {
		Some(false)
	}

	fn has_value(&self) -> bool {
		*self
	}
}

macro_rules! int_convert {
	($($ty:ty),* $(,)?) => {$(
		impl Convert for $ty {
			fn shape() -> Shape {
				Shape::Int
			}

			fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
				let wide = value.try_int().map_err(|err| cx.rebase(err))?;
				<$ty>::try_from(wide).map_err(|_| MapError::IntOutOfRange {
					path: cx.path().clone(),
					value: wide,
					target: stringify!($ty),
				})
			}

			fn write(&self, _cx: &mut Context<'_>) -> Result<Value> {
				Ok(Value::Int(i64::from(*self)))
			}

			fn no_value() -> Option<Self> {
				Some(0)
			}

			fn has_value(&self) -> bool {
				*self != 0
			}
		}
	)*};
}

int_convert!(i8, i16, i32, i64, u8, u16, u32);

impl Convert for f64 {
	fn shape() -> Shape {
		Shape::Float
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		value.try_float().map_err(|err| cx.rebase(err))
	}

	fn write(&self, _cx: &mut Context<'_>) -> Result<Value> {
		Ok(Value::Float(*self))
	}

	fn no_value() -> Option<Self> {
		Some(0.0)
	}

	fn has_value(&self) -> bool {
		*self != 0.0
	}
}

impl Convert for f32 {
	fn shape() -> Shape {
		Shape::Float
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		let wide = f64::read(value, cx)?;
		if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
			return Err(MapError::FloatOutOfRange {
				path: cx.path().clone(),
				value: wide,
				target: "f32",
			});
		}
		Ok(wide as f32)
	}

	fn write(&self, _cx: &mut Context<'_>) -> Result<Value> {
		Ok(Value::Float(f64::from(*self)))
	}

	fn no_value() -> Option<Self> {
		Some(0.0)
	}

	fn has_value(&self) -> bool {
		*self != 0.0
	}
}

impl Convert for String {
	fn shape() -> Shape {
		Shape::String
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		value.try_str().map(str::to_owned).map_err(|err| cx.rebase(err))
	}

	fn write(&self, _cx: &mut Context<'_>) -> Result<Value> {
		Ok(Value::string(self.as_str()))
	}

	fn no_value() -> Option<Self> {
		Some(String::new())
	}

	fn has_value(&self) -> bool {
		!self.is_empty()
	}
}

impl<T: Convert> Convert for Vec<T> {
	fn shape() -> Shape {
		Shape::Sequence(Box::new(T::shape()))
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		let items = value.try_array().map_err(|err| cx.rebase(err))?;
		items
			.iter()
			.enumerate()
			.map(|(index, item)| cx.at_index(index, |cx| T::read(item, cx)))
			.collect()
	}

	fn write(&self, cx: &mut Context<'_>) -> Result<Value> {
		self.iter()
			.enumerate()
			.map(|(index, item)| cx.at_index(index, |cx| item.write(cx)))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array)
	}

	fn no_value() -> Option<Self> {
		Some(Vec::new())
	}

	fn has_value(&self) -> bool {
		!self.is_empty()
	}
}

impl<T: Convert> Convert for BTreeMap<String, T> {
	fn shape() -> Shape {
		Shape::Map(Box::new(T::shape()))
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		let object = value.try_object().map_err(|err| cx.rebase(err))?;
		object
			.iter()
			.map(|entry| cx.at_key(&entry.key, |cx| Ok((entry.key.to_string(), T::read(&entry.value, cx)?))))
			.collect()
	}

	fn write(&self, cx: &mut Context<'_>) -> Result<Value> {
		write_members(self.iter(), cx)
	}

	fn no_value() -> Option<Self> {
		Some(BTreeMap::new())
	}

	fn has_value(&self) -> bool {
		!self.is_empty()
	}
}

impl<T: Convert> Convert for HashMap<String, T> {
	fn shape() -> Shape {
		Shape::Map(Box::new(T::shape()))
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		let object = value.try_object().map_err(|err| cx.rebase(err))?;
		object
			.iter()
			.map(|entry| cx.at_key(&entry.key, |cx| Ok((entry.key.to_string(), T::read(&entry.value, cx)?))))
			.collect()
	}

	fn write(&self, cx: &mut Context<'_>) -> Result<Value> {
		let mut members: Vec<_> = self.iter().collect();
		members.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
		write_members(members.into_iter(), cx)
	}

	fn no_value() -> Option<Self> {
		Some(HashMap::new())
	}

	fn has_value(&self) -> bool {
		!self.is_empty()
	}
}

fn write_members<'a, T: Convert>(members: impl Iterator<Item = (&'a String, &'a T)>, cx: &mut Context<'_>) -> Result<Value> {
	let mut object = Object::new();
	for (key, item) in members {
		let value = cx.at_key(key, |cx| item.write(cx))?;
		object.insert(key.as_str(), value);
	}
	Ok(Value::Object(object))
}

impl<T: Convert> Convert for Option<T> {
	fn shape() -> Shape {
		Shape::Optional(Box::new(T::shape()))
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		if value.is_null() {
			return Ok(None);
		}
		T::read(value, cx).map(Some)
	}

	fn write(&self, cx: &mut Context<'_>) -> Result<Value> {
		match self {
			Some(inner) => inner.write(cx),
			None => Ok(Value::Null),
		}
	}

	fn no_value() -> Option<Self> {
		Some(None)
	}

	fn has_value(&self) -> bool {
		self.is_some()
	}
}

impl<T: Convert> Convert for Box<T> {
	fn shape() -> Shape {
		T::shape()
	}

	fn read(value: &Value, cx: &mut Context<'_>) -> Result<Self> {
		T::read(value, cx).map(Box::new)
	}

	fn write(&self, cx: &mut Context<'_>) -> Result<Value> {
		(**self).write(cx)
	}

	fn no_value() -> Option<Self> {
		T::no_value().map(Box::new)
	}

	fn has_value(&self) -> bool {
		(**self).has_value()
	}
}
