mod attr;
mod convert;
mod descriptor;
mod engine;
mod error;
mod field;
mod format;
mod path;
mod registry;
mod shape;
mod value;

/// Field attributes and case rules.
pub use attr::{Attribute, Attributes, CaseRule};
/// Native type conversion trait and its traversal context.
pub use convert::{Context, Convert};
/// Struct and enum descriptors with their builders and untyped schemas.
pub use descriptor::{EnumBuilder, EnumDescriptor, EnumSchema, StructBuilder, StructDescriptor, StructSchema};
/// Error and result aliases.
pub use error::{MapError, Result};
/// Per-field schema data.
pub use field::FieldSchema;
/// Format adaptor trait and the bundled adaptors.
pub use format::{Format, Json, Toml, Yaml};
/// Structural paths used by errors and lookups.
pub use path::{Path, PathStep};
/// Descriptor registry and its lifecycle.
pub use registry::{Registry, RegistryBuilder, Schema, global};
/// Type shapes used to steer field-level rewriting.
pub use shape::{Shape, TypeRef};
/// Canonical value model.
pub use value::{Entry, Kind, Object, Value};

#[cfg(test)]
mod test_support;
