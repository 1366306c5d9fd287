use thiserror::Error;

use crate::map::{Kind, Path};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, MapError>;

/// Errors produced while registering descriptors or converting values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
	/// Canonical value variant does not match the expected kind.
	#[error("type mismatch at {}: expected {expected}, got {actual}", .path.describe())]
	TypeMismatch {
		/// Location of the offending value.
		path: Path,
		/// Kind required by the target type.
		expected: Kind,
		/// Kind actually present.
		actual: Kind,
	},
	/// Required field absent with no default and no optional attribute.
	#[error("missing field {key:?} at {}", .path.describe())]
	MissingField {
		/// Location of the object missing the key.
		path: Path,
		/// Missing key.
		key: String,
	},
	/// Strict struct saw keys that no field maps.
	#[error("unexpected fields at {}: {}", .path.describe(), .keys.join(", "))]
	UnexpectedFields {
		/// Location of the object holding the extra keys.
		path: Path,
		/// Extra keys in source order.
		keys: Vec<String>,
	},
	/// Text matches no declared enum symbol.
	#[error("invalid enum value {text:?} at {}", .path.describe())]
	InvalidEnumValue {
		/// Location of the enum value.
		path: Path,
		/// Offending text as it appeared in the source.
		text: String,
	},
	/// Native enum value has no declared symbol.
	#[error("enum value of {type_name} at {} has no declared symbol", .path.describe())]
	UnmappedVariant {
		/// Location of the enum value.
		path: Path,
		/// Registered enum name.
		type_name: String,
	},
	/// Adaptor met an external construct with no canonical representation.
	#[error("unsupported {external} at {}", .path.describe())]
	UnsupportedValue {
		/// Location inside the external value.
		path: Path,
		/// Description of the external construct.
		external: String,
	},
	/// Integer does not fit the target numeric type.
	#[error("integer {value} at {} does not fit {target}", .path.describe())]
	IntOutOfRange {
		/// Location of the integer.
		path: Path,
		/// Source integer.
		value: i64,
		/// Target native type label.
		target: &'static str,
	},
	/// Finite float exceeds the range of the target numeric type.
	#[error("float {value} at {} does not fit {target}", .path.describe())]
	FloatOutOfRange {
		/// Location of the float.
		path: Path,
		/// Source float.
		value: f64,
		/// Target native type label.
		target: &'static str,
	},
	/// Struct types reference each other in a loop.
	#[error("cyclic type {type_name} (cycle: {})", .cycle.join(" -> "))]
	CyclicType {
		/// Struct where the cycle was detected.
		type_name: String,
		/// Struct names along the cycle, first and last equal.
		cycle: Vec<String>,
	},
	/// Descriptor is malformed.
	#[error("invalid schema for {type_name}: {reason}")]
	InvalidSchema {
		/// Struct or enum name.
		type_name: String,
		/// Human-readable cause.
		reason: String,
	},
	/// Type was converted or referenced without a registered descriptor.
	#[error("type not registered: {type_name}")]
	Unregistered {
		/// Rust type name of the missing type.
		type_name: String,
	},
	/// Path expression syntax is invalid.
	#[error("invalid path: {path}")]
	InvalidPath {
		/// Original user-provided path string.
		path: String,
	},
	/// Process-wide registry was already installed.
	#[error("global registry already installed")]
	AlreadyInstalled,
}

impl MapError {
	/// Structural path carried by this error, if any.
	pub fn path(&self) -> Option<&Path> {
		match self {
			Self::TypeMismatch { path, .. }
			| Self::MissingField { path, .. }
			| Self::UnexpectedFields { path, .. }
			| Self::InvalidEnumValue { path, .. }
			| Self::UnmappedVariant { path, .. }
			| Self::UnsupportedValue { path, .. }
			| Self::IntOutOfRange { path, .. }
			| Self::FloatOutOfRange { path, .. } => Some(path),
			_ => None,
		}
	}

	/// Prefix the carried path with `base`.
	///
	/// Typed accessors on [`crate::map::Value`] fail relative to the value they were
	/// called on; the engine rebases those errors onto the traversal path.
	pub fn rebase(mut self, base: &Path) -> Self {
		match &mut self {
			Self::TypeMismatch { path, .. }
			| Self::MissingField { path, .. }
			| Self::UnexpectedFields { path, .. }
			| Self::InvalidEnumValue { path, .. }
			| Self::UnmappedVariant { path, .. }
			| Self::UnsupportedValue { path, .. }
			| Self::IntOutOfRange { path, .. }
			| Self::FloatOutOfRange { path, .. } => *path = base.join(path),
			_ => {}
		}
		self
	}
}
