use std::borrow::Cow;

use crate::map::{Attributes, Context, Convert, MapError, Object, Registry, Result, Shape, TypeRef, Value};

/// Untyped description of one struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
	/// Key in the canonical object.
	pub key: Box<str>,
	/// Declared attribute pipeline.
	pub attributes: Attributes,
	/// Outline of the native field type.
	pub shape: Shape,
	pub(crate) empty_state: bool,
}

impl FieldSchema {
	pub(crate) fn of<T: Convert>(key: &str, attributes: Attributes) -> Self {
		Self {
			key: key.into(),
			attributes,
			shape: T::shape(),
			empty_state: T::no_value().is_some(),
		}
	}

	/// Whether an absent key maps to the "no value" state.
	pub fn is_optional(&self) -> bool {
		self.attributes.is_optional() || self.shape.is_optional()
	}

	/// Whether the native field type has a "no value" state.
	pub fn has_empty_state(&self) -> bool {
		self.empty_state
	}

	/// Read this field from `object` into `target`.
	pub(crate) fn read_into<S>(&self, slot: &dyn Slot<S>, target: &mut S, object: &Object, cx: &mut Context<'_>) -> Result<()> {
		let key = &*self.key;
		let Some(raw) = object.get(key) else {
			return self.read_absent(slot, target, cx);
		};
		if raw.is_null() && self.is_optional() {
			slot.clear(target);
			return Ok(());
		}

		cx.at_key(key, |cx| {
			let value = if self.attributes.has_case_rules() || self.attributes.value_or_struct() {
				Cow::Owned(inbound(raw, &self.shape, &self.attributes, cx)?)
			} else {
				Cow::Borrowed(raw)
			};
			slot.read(target, &value, cx)
		})
	}

	fn read_absent<S>(&self, slot: &dyn Slot<S>, target: &mut S, cx: &mut Context<'_>) -> Result<()> {
		if let Some(default) = self.attributes.default_value() {
			return cx.at_key(&self.key, |cx| slot.read(target, default, cx));
		}
		if self.is_optional() {
			slot.clear(target);
			return Ok(());
		}
		Err(MapError::MissingField {
			path: cx.path().clone(),
			key: self.key.to_string(),
		})
	}

	/// Write this field of `source` into `object`.
	///
	/// Empty optional fields are omitted. A `None` in a defaulted `Option` field is
	/// written as null, so the next read does not substitute the default.
	pub(crate) fn write_from<S>(&self, slot: &dyn Slot<S>, source: &S, object: &mut Object, cx: &mut Context<'_>) -> Result<()> {
		if self.is_optional() && slot.is_empty(source) {
			if self.shape.is_optional() && self.attributes.default_value().is_some() {
				object.insert(&*self.key, Value::Null);
			}
			return Ok(());
		}

		let value = cx.at_key(&self.key, |cx| slot.write(source, cx))?;
		let value = if self.attributes.has_case_rules() {
			outbound(value, &self.shape, &self.attributes, cx.registry())
		} else {
			value
		};
		object.insert(&*self.key, value);
		Ok(())
	}
}

/// Typed access to one field of `S`.
pub(crate) trait Slot<S>: Send + Sync {
	fn read(&self, target: &mut S, value: &Value, cx: &mut Context<'_>) -> Result<()>;

	fn clear(&self, target: &mut S);

	fn is_empty(&self, source: &S) -> bool;

	fn write(&self, source: &S, cx: &mut Context<'_>) -> Result<Value>;
}

/// Getter pair binding a field of `S` with native type `T`.
pub(crate) struct Accessor<S, T> {
	pub(crate) get: fn(&S) -> &T,
	pub(crate) get_mut: fn(&mut S) -> &mut T,
}

impl<S: 'static, T: Convert> Slot<S> for Accessor<S, T> {
	fn read(&self, target: &mut S, value: &Value, cx: &mut Context<'_>) -> Result<()> {
		*(self.get_mut)(target) = T::read(value, cx)?;
		Ok(())
	}

	fn clear(&self, target: &mut S) {
		if let Some(empty) = T::no_value() {
			*(self.get_mut)(target) = empty;
		}
	}

	fn is_empty(&self, source: &S) -> bool {
		!(self.get)(source).has_value()
	}

	fn write(&self, source: &S, cx: &mut Context<'_>) -> Result<Value> {
		(self.get)(source).write(cx)
	}
}

/// Undo case rules and apply scalar-to-struct promotion, following `shape`.
fn inbound(value: &Value, shape: &Shape, attributes: &Attributes, cx: &mut Context<'_>) -> Result<Value> {
	match (shape, value) {
		(Shape::String, Value::String(text)) => Ok(Value::string(attributes.decode_text(text))),
		(Shape::Named(ty), _) => inbound_named(value, ty, attributes, cx),
		(Shape::Sequence(inner), Value::Array(items)) => items
			.iter()
			.enumerate()
			.map(|(index, item)| cx.at_index(index, |cx| inbound(item, inner, attributes, cx)))
			.collect::<Result<Vec<_>>>()
			.map(Value::Array),
		(Shape::Map(inner), Value::Object(object)) => object
			.iter()
			.map(|entry| cx.at_key(&entry.key, |cx| Ok((entry.key.clone(), inbound(&entry.value, inner, attributes, cx)?))))
			.collect::<Result<Object>>()
			.map(Value::Object),
		(Shape::Optional(inner), _) if !value.is_null() => inbound(value, inner, attributes, cx),
		_ => Ok(value.clone()),
	}
}

fn inbound_named(value: &Value, ty: &TypeRef, attributes: &Attributes, cx: &mut Context<'_>) -> Result<Value> {
	let registry = cx.registry();
	if let Some(symbols) = registry.enum_symbols(ty) {
		let Value::String(text) = value else {
			return Ok(value.clone());
		};
		return match attributes.match_symbol(symbols, text) {
			Some(symbol) => Ok(Value::string(symbol)),
			None => Err(MapError::InvalidEnumValue {
				path: cx.path().clone(),
				text: text.to_string(),
			}),
		};
	}

	if attributes.value_or_struct()
		&& value.is_scalar()
		&& let Some(primary) = registry.primary_key(ty)
	{
		let mut object = Object::with_capacity(1);
		object.insert(primary, value.clone());
		return Ok(Value::Object(object));
	}
	Ok(value.clone())
}

/// Apply case rules to string and enum leaves, following `shape`.
fn outbound(value: Value, shape: &Shape, attributes: &Attributes, registry: &Registry) -> Value {
	match (shape, value) {
		(Shape::String, Value::String(text)) => Value::string(attributes.encode_text(&text)),
		(Shape::Named(ty), Value::String(text)) if registry.enum_symbols(ty).is_some() => Value::string(attributes.encode_text(&text)),
		(Shape::Sequence(inner), Value::Array(items)) => {
			Value::Array(items.into_iter().map(|item| outbound(item, inner, attributes, registry)).collect())
		}
		(Shape::Map(inner), Value::Object(object)) => Value::Object(
			object
				.into_iter()
				.map(|entry| (entry.key, outbound(entry.value, inner, attributes, registry)))
				.collect(),
		),
		(Shape::Optional(inner), value) => outbound(value, inner, attributes, registry),
		(_, value) => value,
	}
}
