use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use tracing::debug;

use crate::map::descriptor::{ErasedEnum, ErasedStruct};
use crate::map::{
	Attribute, Context, Convert, EnumDescriptor, EnumSchema, MapError, Object, Result, Shape, StructDescriptor, StructSchema, TypeRef,
	Value,
};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Process-wide registry, once installed.
pub fn global() -> Option<&'static Registry> {
	GLOBAL.get()
}

/// Borrowed schema of one registered type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Schema<'a> {
	/// Registered struct.
	Struct(&'a StructSchema),
	/// Registered enum.
	Enum(&'a EnumSchema),
}

impl<'a> Schema<'a> {
	/// Registered name.
	pub fn name(&self) -> &'a str {
		match self {
			Self::Struct(schema) => &schema.name,
			Self::Enum(schema) => &schema.name,
		}
	}

	/// Native type identity.
	pub fn type_ref(&self) -> TypeRef {
		match self {
			Self::Struct(schema) => schema.type_ref,
			Self::Enum(schema) => schema.type_ref,
		}
	}
}

enum Registered {
	Struct(Box<dyn ErasedStruct>),
	Enum(Box<dyn ErasedEnum>),
}

impl Registered {
	fn schema(&self) -> Schema<'_> {
		match self {
			Self::Struct(descriptor) => Schema::Struct(descriptor.schema()),
			Self::Enum(descriptor) => Schema::Enum(descriptor.schema()),
		}
	}
}

/// Collects descriptors before freezing them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
	entries: Vec<Registered>,
}

impl RegistryBuilder {
	/// Register a struct descriptor.
	pub fn register_struct<S: 'static>(mut self, descriptor: StructDescriptor<S>) -> Self {
		self.entries.push(Registered::Struct(Box::new(descriptor)));
		self
	}

	/// Register an enum descriptor.
	pub fn register_enum<E: Send + Sync + 'static>(mut self, descriptor: EnumDescriptor<E>) -> Self {
		self.entries.push(Registered::Enum(Box::new(descriptor)));
		self
	}

	/// Validate every descriptor and freeze the registry.
	pub fn build(self) -> Result<Registry> {
		let mut order = Vec::with_capacity(self.entries.len());
		let mut names = HashSet::new();
		let mut entries = HashMap::with_capacity(self.entries.len());

		for entry in self.entries {
			let schema = entry.schema();
			let type_ref = schema.type_ref();
			if entries.contains_key(&type_ref.id()) {
				return Err(invalid(schema.name(), format!("{} is registered twice", type_ref.name())));
			}
			if !names.insert(schema.name().to_owned()) {
				return Err(invalid(schema.name(), "name is already registered".to_owned()));
			}
			order.push(type_ref.id());
			entries.insert(type_ref.id(), entry);
		}

		let registry = Registry { entries, order };
		for schema in registry.schemas() {
			match schema {
				Schema::Struct(schema) => registry.check_struct(schema)?,
				Schema::Enum(schema) => check_enum(schema)?,
			}
		}
		registry.check_cycles()?;
		for id in &registry.order {
			if let Some(Registered::Struct(descriptor)) = registry.entries.get(id) {
				descriptor.check_defaults(&registry)?;
			}
		}

		let structs = registry.schemas().filter(|schema| matches!(schema, Schema::Struct(_))).count();
		debug!(structs, enums = registry.len() - structs, "registry frozen");
		Ok(registry)
	}
}

/// Frozen set of struct and enum descriptors.
pub struct Registry {
	entries: HashMap<TypeId, Registered>,
	order: Vec<TypeId>,
}

impl Registry {
	/// Start collecting descriptors.
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::default()
	}

	/// Store this registry in the process-wide slot.
	pub fn install(self) -> Result<&'static Registry> {
		let types = self.len();
		GLOBAL.set(self).map_err(|_| MapError::AlreadyInstalled)?;
		debug!(types, "registry installed");
		GLOBAL.get().ok_or(MapError::AlreadyInstalled)
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Schemas in registration order.
	pub fn schemas(&self) -> impl Iterator<Item = Schema<'_>> {
		self.order.iter().filter_map(|id| self.entries.get(id)).map(Registered::schema)
	}

	/// Schema registered for `T`.
	pub fn schema_of<T: 'static>(&self) -> Option<Schema<'_>> {
		self.lookup(&TypeRef::of::<T>()).map(Registered::schema)
	}

	/// Schema registered under `name`.
	pub fn schema_named(&self, name: &str) -> Option<Schema<'_>> {
		self.schemas().find(|schema| schema.name() == name)
	}

	/// Symbols of the enum `ty`, if `ty` is a registered enum.
	pub fn enum_symbols(&self, ty: &TypeRef) -> Option<&[Box<str>]> {
		match self.lookup(ty)? {
			Registered::Enum(descriptor) => Some(&descriptor.schema().symbols),
			Registered::Struct(_) => None,
		}
	}

	/// Primary field of the struct `ty`, if `ty` is a registered struct with one.
	pub fn primary_key(&self, ty: &TypeRef) -> Option<&str> {
		match self.lookup(ty)? {
			Registered::Struct(descriptor) => descriptor.schema().primary.as_deref(),
			Registered::Enum(_) => None,
		}
	}

	/// Read a registered struct or enum.
	pub fn read_named<T: Convert>(&self, value: &Value, cx: &mut Context<'_>) -> Result<T> {
		match self.lookup(&TypeRef::of::<T>()) {
			Some(Registered::Struct(descriptor)) => match descriptor.as_any().downcast_ref::<StructDescriptor<T>>() {
				Some(descriptor) => descriptor.read(value, cx),
				None => Err(unregistered::<T>()),
			},
			Some(Registered::Enum(descriptor)) => match descriptor.as_any().downcast_ref::<EnumDescriptor<T>>() {
				Some(descriptor) => descriptor.read(value, cx),
				None => Err(unregistered::<T>()),
			},
			None => Err(unregistered::<T>()),
		}
	}

	/// Write a registered struct or enum.
	pub fn write_named<T: Convert>(&self, value: &T, cx: &mut Context<'_>) -> Result<Value> {
		match self.lookup(&TypeRef::of::<T>()) {
			Some(Registered::Struct(descriptor)) => match descriptor.as_any().downcast_ref::<StructDescriptor<T>>() {
				Some(descriptor) => descriptor.write(value, cx),
				None => Err(unregistered::<T>()),
			},
			Some(Registered::Enum(descriptor)) => match descriptor.as_any().downcast_ref::<EnumDescriptor<T>>() {
				Some(descriptor) => descriptor.write(value, cx),
				None => Err(unregistered::<T>()),
			},
			None => Err(unregistered::<T>()),
		}
	}

	/// Render every schema as a canonical value, in registration order.
	pub fn describe(&self) -> Value {
		Value::Array(self.schemas().map(|schema| self.describe_schema(schema)).collect())
	}

	fn describe_schema(&self, schema: Schema<'_>) -> Value {
		let mut out = Object::new();
		match schema {
			Schema::Struct(schema) => {
				out.insert("kind", Value::from("struct"));
				out.insert("name", Value::string(&*schema.name));
				out.insert("strict", Value::Bool(schema.strict));
				out.insert("primary", schema.primary.as_deref().map_or(Value::Null, Value::from));
				let fields = schema
					.fields
					.iter()
					.map(|field| {
						let attributes = field
							.attributes
							.iter()
							.map(|attribute| match attribute {
								Attribute::Default(value) => Value::Object([("default", value.clone())].into_iter().collect()),
								other => Value::from(other.label()),
							})
							.collect();
						let mut entry = Object::new();
						entry.insert("key", Value::string(&*field.key));
						entry.insert("shape", Value::from(self.render_shape(&field.shape)));
						entry.insert("attributes", Value::Array(attributes));
						Value::Object(entry)
					})
					.collect();
				out.insert("fields", Value::Array(fields));
			}
			Schema::Enum(schema) => {
				out.insert("kind", Value::from("enum"));
				out.insert("name", Value::string(&*schema.name));
				out.insert("symbols", Value::Array(schema.symbols.iter().map(|symbol| Value::string(&**symbol)).collect()));
			}
		}
		Value::Object(out)
	}

	/// Render `shape` using registered names for nested types.
	pub fn render_shape(&self, shape: &Shape) -> String {
		shape.render(&|ty: &TypeRef| match self.lookup(ty) {
			Some(entry) => entry.schema().name().to_owned(),
			None => ty.name().to_owned(),
		})
	}

	fn lookup(&self, ty: &TypeRef) -> Option<&Registered> {
		self.entries.get(&ty.id())
	}

	fn name_of(&self, ty: &TypeRef) -> String {
		self.lookup(ty).map_or_else(|| ty.name().to_owned(), |entry| entry.schema().name().to_owned())
	}

	fn check_struct(&self, schema: &StructSchema) -> Result<()> {
		let mut keys = HashSet::new();
		for field in &schema.fields {
			if !keys.insert(&*field.key) {
				return Err(invalid(&schema.name, format!("duplicate field key {:?}", field.key)));
			}
			if let Some(ty) = field.shape.named()
				&& self.lookup(&ty).is_none()
			{
				return Err(MapError::Unregistered {
					type_name: ty.name().to_owned(),
				});
			}
			if field.attributes.is_optional() && !field.has_empty_state() {
				return Err(invalid(
					&schema.name,
					format!("field {:?} is optional but {} has no empty state", field.key, self.render_shape(&field.shape)),
				));
			}
			if field.attributes.is_optional() && !field.shape.is_optional() && field.attributes.default_value().is_some() {
				return Err(invalid(
					&schema.name,
					format!("field {:?} has a default, so its empty state would not survive a write", field.key),
				));
			}
			if field.attributes.value_or_struct() {
				let target = field.shape.named().filter(|ty| matches!(self.lookup(ty), Some(Registered::Struct(_))));
				let Some(target) = target else {
					return Err(invalid(&schema.name, format!("field {:?} is value_or_struct but holds no nested struct", field.key)));
				};
				if self.primary_key(&target).is_none() {
					return Err(invalid(
						&schema.name,
						format!("field {:?} is value_or_struct but {} has no primary field", field.key, self.name_of(&target)),
					));
				}
			}
		}

		if schema.explicit_primary
			&& let Some(primary) = &schema.primary
			&& schema.field(primary).is_none()
		{
			return Err(invalid(&schema.name, format!("primary field {primary:?} is not declared")));
		}
		Ok(())
	}

	/// Reject struct graphs where a struct reaches itself through its fields.
	fn check_cycles(&self) -> Result<()> {
		let mut done = HashSet::new();
		for id in &self.order {
			let mut stack = Vec::new();
			self.visit(*id, &mut stack, &mut done)?;
		}
		Ok(())
	}

	fn visit(&self, id: TypeId, stack: &mut Vec<TypeId>, done: &mut HashSet<TypeId>) -> Result<()> {
		if done.contains(&id) {
			return Ok(());
		}
		let Some(Registered::Struct(descriptor)) = self.entries.get(&id) else {
			return Ok(());
		};
		if let Some(start) = stack.iter().position(|seen| *seen == id) {
			let mut cycle: Vec<String> = stack[start..].iter().map(|seen| self.name_by_id(*seen)).collect();
			cycle.push(self.name_by_id(id));
			return Err(MapError::CyclicType {
				type_name: self.name_by_id(id),
				cycle,
			});
		}

		stack.push(id);
		for field in &descriptor.schema().fields {
			if let Some(ty) = field.shape.named() {
				self.visit(ty.id(), stack, done)?;
			}
		}
		stack.pop();
		done.insert(id);
		Ok(())
	}

	fn name_by_id(&self, id: TypeId) -> String {
		self.entries
			.get(&id)
			.map(|entry| entry.schema().name().to_owned())
			.unwrap_or_default()
	}
}

fn check_enum(schema: &EnumSchema) -> Result<()> {
	if schema.symbols.is_empty() {
		return Err(invalid(&schema.name, "enum declares no symbols".to_owned()));
	}
	let mut seen = HashSet::new();
	for symbol in &schema.symbols {
		if !seen.insert(&**symbol) {
			return Err(invalid(&schema.name, format!("duplicate symbol {symbol:?}")));
		}
	}
	Ok(())
}

fn invalid(type_name: &str, reason: String) -> MapError {
	MapError::InvalidSchema {
		type_name: type_name.to_owned(),
		reason,
	}
}

fn unregistered<T>() -> MapError {
	MapError::Unregistered {
		type_name: std::any::type_name::<T>().to_owned(),
	}
}
