use std::collections::HashSet;

use tracing::trace;

use crate::map::{Context, Convert, EnumDescriptor, Format, Kind, MapError, Object, Registry, Result, StructDescriptor, Value};

impl<S: 'static> StructDescriptor<S> {
	/// Build `S` from an object, field by field in declaration order.
	pub(crate) fn read(&self, value: &Value, cx: &mut Context<'_>) -> Result<S> {
		let Some(object) = value.as_object() else {
			return Err(cx.mismatch(Kind::Object, value));
		};

		let mut out = (self.make)();
		for (field, slot) in self.schema.fields.iter().zip(&self.slots) {
			field.read_into(slot.as_ref(), &mut out, object, cx)?;
		}

		if self.schema.strict && self.schema.keys().filter(|key| object.contains_key(key)).count() < object.len() {
			let declared: HashSet<&str> = self.schema.keys().collect();
			return Err(MapError::UnexpectedFields {
				path: cx.path().clone(),
				keys: object.keys().filter(|key| !declared.contains(key)).map(str::to_owned).collect(),
			});
		}
		Ok(out)
	}

	/// Render `source` as a fresh object in declaration order.
	pub(crate) fn write(&self, source: &S, cx: &mut Context<'_>) -> Result<Value> {
		let mut object = Object::with_capacity(self.schema.fields.len());
		for (field, slot) in self.schema.fields.iter().zip(&self.slots) {
			field.write_from(slot.as_ref(), source, &mut object, cx)?;
		}
		Ok(Value::Object(object))
	}
}

impl<E> EnumDescriptor<E> {
	/// Resolve a canonical symbol name.
	pub(crate) fn read(&self, value: &Value, cx: &mut Context<'_>) -> Result<E> {
		let Some(text) = value.as_str() else {
			return Err(cx.mismatch(Kind::String, value));
		};
		self.schema
			.symbols
			.iter()
			.position(|symbol| &**symbol == text)
			.map(|index| (self.clone)(&self.values[index]))
			.ok_or_else(|| MapError::InvalidEnumValue {
				path: cx.path().clone(),
				text: text.to_owned(),
			})
	}

	/// Canonical symbol name of `value`.
	pub(crate) fn write(&self, value: &E, cx: &mut Context<'_>) -> Result<Value> {
		self.values
			.iter()
			.position(|candidate| (self.eq)(candidate, value))
			.map(|index| Value::string(&*self.schema.symbols[index]))
			.ok_or_else(|| MapError::UnmappedVariant {
				path: cx.path().clone(),
				type_name: self.schema.name.to_string(),
			})
	}
}

impl Registry {
	/// Convert a canonical value into a native value.
	pub fn convert_in<T: Convert>(&self, value: &Value) -> Result<T> {
		trace!(type_name = std::any::type_name::<T>(), "convert_in");
		T::read(value, &mut Context::new(self))
	}

	/// Convert a native value into a canonical value.
	pub fn convert_out<T: Convert>(&self, value: &T) -> Result<Value> {
		trace!(type_name = std::any::type_name::<T>(), "convert_out");
		value.write(&mut Context::new(self))
	}

	/// Adapt an external value and convert it into a native value.
	pub fn decode<F: Format, T: Convert>(&self, external: &F::External) -> Result<T> {
		let value = F::to_canonical(external)?;
		self.convert_in(&value)
	}

	/// Convert a native value and adapt it to an external value.
	pub fn encode<F: Format, T: Convert>(&self, value: &T) -> Result<F::External> {
		self.convert_out(value).map(|value| F::from_canonical(&value))
	}
}
