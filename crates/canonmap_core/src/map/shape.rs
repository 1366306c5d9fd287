use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a registered native type.
#[derive(Clone, Copy)]
pub struct TypeRef {
	id: TypeId,
	name: &'static str,
}

impl TypeRef {
	/// Identity of `T`.
	pub fn of<T: 'static>() -> Self {
		Self {
			id: TypeId::of::<T>(),
			name: std::any::type_name::<T>(),
		}
	}

	/// Runtime type id.
	pub fn id(&self) -> TypeId {
		self.id
	}

	/// Rust type name, as reported by the compiler.
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl PartialEq for TypeRef {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl fmt::Debug for TypeRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name)
	}
}

/// Structural outline of a native field type.
///
/// Shapes let the field pipeline find string and enum leaves, and nested struct
/// positions, inside containers without touching the native value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
	/// `bool`.
	Bool,
	/// Any integer type.
	Int,
	/// `f32`/`f64`.
	Float,
	/// `String`.
	String,
	/// Ordered sequence of the inner shape.
	Sequence(Box<Shape>),
	/// String-keyed map of the inner shape.
	Map(Box<Shape>),
	/// Optional wrapper of the inner shape.
	Optional(Box<Shape>),
	/// Registered struct or enum.
	Named(TypeRef),
}

impl Shape {
	/// Whether the outermost layer is `Optional`.
	pub fn is_optional(&self) -> bool {
		matches!(self, Self::Optional(_))
	}

	/// Innermost shape below all container and optional layers.
	pub fn leaf(&self) -> &Shape {
		match self {
			Self::Sequence(inner) | Self::Map(inner) | Self::Optional(inner) => inner.leaf(),
			other => other,
		}
	}

	/// Registered type referenced by this shape, if any.
	pub fn named(&self) -> Option<TypeRef> {
		match self.leaf() {
			Self::Named(ty) => Some(*ty),
			_ => None,
		}
	}

	/// Render with a caller-provided name for registered types.
	pub fn render(&self, name_of: &dyn Fn(&TypeRef) -> String) -> String {
		match self {
			Self::Bool => "bool".to_owned(),
			Self::Int => "int".to_owned(),
			Self::Float => "float".to_owned(),
			Self::String => "string".to_owned(),
			Self::Sequence(inner) => format!("[{}]", inner.render(name_of)),
			Self::Map(inner) => format!("map<{}>", inner.render(name_of)),
			Self::Optional(inner) => format!("{}?", inner.render(name_of)),
			Self::Named(ty) => name_of(ty),
		}
	}
}

impl fmt::Display for Shape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let short = |ty: &TypeRef| ty.name().rsplit("::").next().unwrap_or(ty.name()).to_owned();
		f.write_str(&self.render(&short))
	}
}
