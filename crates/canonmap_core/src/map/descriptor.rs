use std::any::Any;

use crate::map::field::{Accessor, Slot};
use crate::map::{Attribute, Attributes, Context, Convert, FieldSchema, MapError, Registry, Result, TypeRef};

/// Untyped description of a registered struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructSchema {
	/// Registered name.
	pub name: Box<str>,
	/// Native type identity.
	pub type_ref: TypeRef,
	/// Fields in declaration order.
	pub fields: Vec<FieldSchema>,
	/// Whether unmapped source keys are rejected.
	pub strict: bool,
	/// Field receiving a promoted scalar under `ValueOrStruct`.
	pub primary: Option<Box<str>>,
	pub(crate) explicit_primary: bool,
}

impl StructSchema {
	/// Look up a field by key.
	pub fn field(&self, key: &str) -> Option<&FieldSchema> {
		self.fields.iter().find(|field| &*field.key == key)
	}

	/// Field keys in declaration order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|field| &*field.key)
	}
}

/// Field table of one native struct `S`.
pub struct StructDescriptor<S> {
	pub(crate) schema: StructSchema,
	pub(crate) make: fn() -> S,
	pub(crate) slots: Vec<Box<dyn Slot<S>>>,
}

impl<S: Default + 'static> StructDescriptor<S> {
	/// Start a descriptor whose fresh instances come from `S::default`.
	pub fn builder(name: &str) -> StructBuilder<S> {
		StructBuilder::new(name, S::default)
	}
}

impl<S: 'static> StructDescriptor<S> {
	/// Start a descriptor whose fresh instances come from `make`.
	pub fn builder_with(name: &str, make: fn() -> S) -> StructBuilder<S> {
		StructBuilder::new(name, make)
	}

	/// Untyped schema.
	pub fn schema(&self) -> &StructSchema {
		&self.schema
	}
}

/// Builder for [`StructDescriptor`].
pub struct StructBuilder<S> {
	name: Box<str>,
	make: fn() -> S,
	fields: Vec<FieldSchema>,
	slots: Vec<Box<dyn Slot<S>>>,
	strict: bool,
	primary: Option<Box<str>>,
}

impl<S: 'static> StructBuilder<S> {
	fn new(name: &str, make: fn() -> S) -> Self {
		Self {
			name: name.into(),
			make,
			fields: Vec::new(),
			slots: Vec::new(),
			strict: false,
			primary: None,
		}
	}

	/// Map `key` to a field with no attributes.
	pub fn field<T: Convert>(self, key: &str, get: fn(&S) -> &T, get_mut: fn(&mut S) -> &mut T) -> Self {
		self.field_with(key, get, get_mut, std::iter::empty::<Attribute>())
	}

	/// Map `key` to a field with an attribute pipeline.
	pub fn field_with<T: Convert>(
		mut self,
		key: &str,
		get: fn(&S) -> &T,
		get_mut: fn(&mut S) -> &mut T,
		attributes: impl IntoIterator<Item = Attribute>,
	) -> Self {
		self.fields.push(FieldSchema::of::<T>(key, Attributes::new(attributes)));
		self.slots.push(Box::new(Accessor { get, get_mut }));
		self
	}

	/// Reject source keys that no field maps.
	pub fn strict(mut self) -> Self {
		self.strict = true;
		self
	}

	/// Field receiving promoted scalars; defaults to the first field without a default.
	pub fn primary(mut self, key: &str) -> Self {
		self.primary = Some(key.into());
		self
	}

	/// Finish the descriptor.
	pub fn build(self) -> StructDescriptor<S> {
		let explicit_primary = self.primary.is_some();
		let primary = self.primary.or_else(|| {
			self.fields
				.iter()
				.find(|field| field.attributes.default_value().is_none())
				.map(|field| field.key.clone())
		});
		StructDescriptor {
			schema: StructSchema {
				name: self.name,
				type_ref: TypeRef::of::<S>(),
				fields: self.fields,
				strict: self.strict,
				primary,
				explicit_primary,
			},
			make: self.make,
			slots: self.slots,
		}
	}
}

/// Untyped description of a registered enum.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
	/// Registered name.
	pub name: Box<str>,
	/// Native type identity.
	pub type_ref: TypeRef,
	/// Canonical symbol names in declaration order.
	pub symbols: Vec<Box<str>>,
}

/// Symbol table of one native enum `E`.
pub struct EnumDescriptor<E> {
	pub(crate) schema: EnumSchema,
	pub(crate) values: Vec<E>,
	pub(crate) eq: fn(&E, &E) -> bool,
	pub(crate) clone: fn(&E) -> E,
}

impl<E: Clone + PartialEq + Send + Sync + 'static> EnumDescriptor<E> {
	/// Start a descriptor.
	pub fn builder(name: &str) -> EnumBuilder<E> {
		EnumBuilder {
			name: name.into(),
			symbols: Vec::new(),
			values: Vec::new(),
		}
	}
}

impl<E> EnumDescriptor<E> {
	/// Untyped schema.
	pub fn schema(&self) -> &EnumSchema {
		&self.schema
	}
}

/// Builder for [`EnumDescriptor`].
pub struct EnumBuilder<E> {
	name: Box<str>,
	symbols: Vec<Box<str>>,
	values: Vec<E>,
}

impl<E: Clone + PartialEq + Send + Sync + 'static> EnumBuilder<E> {
	/// Bind the canonical symbol `name` to `value`.
	pub fn symbol(mut self, name: &str, value: E) -> Self {
		self.symbols.push(name.into());
		self.values.push(value);
		self
	}

	/// Finish the descriptor.
	pub fn build(self) -> EnumDescriptor<E> {
		EnumDescriptor {
			schema: EnumSchema {
				name: self.name,
				type_ref: TypeRef::of::<E>(),
				symbols: self.symbols,
			},
			values: self.values,
			eq: <E as PartialEq>::eq,
			clone: <E as Clone>::clone,
		}
	}
}

/// Type-erased struct descriptor stored by the registry.
pub(crate) trait ErasedStruct: Send + Sync {
	fn schema(&self) -> &StructSchema;

	fn as_any(&self) -> &dyn Any;

	/// Convert every declared default into a scratch instance.
	fn check_defaults(&self, registry: &Registry) -> Result<()>;
}

impl<S: 'static> ErasedStruct for StructDescriptor<S> {
	fn schema(&self) -> &StructSchema {
		&self.schema
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn check_defaults(&self, registry: &Registry) -> Result<()> {
		let mut scratch = (self.make)();
		for (field, slot) in self.schema.fields.iter().zip(&self.slots) {
			let Some(default) = field.attributes.default_value() else {
				continue;
			};
			let mut cx = Context::new(registry);
			cx.at_key(&field.key, |cx| slot.read(&mut scratch, default, cx))
				.map_err(|err| MapError::InvalidSchema {
					type_name: self.schema.name.to_string(),
					reason: format!("default for {:?} does not convert: {err}", field.key),
				})?;
		}
		Ok(())
	}
}

/// Type-erased enum descriptor stored by the registry.
pub(crate) trait ErasedEnum: Send + Sync {
	fn schema(&self) -> &EnumSchema;

	fn as_any(&self) -> &dyn Any;
}

impl<E: Send + Sync + 'static> ErasedEnum for EnumDescriptor<E> {
	fn schema(&self) -> &EnumSchema {
		&self.schema
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
