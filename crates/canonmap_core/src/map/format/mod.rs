//! Adaptors between external value trees and canonical values.

mod json;
mod toml;
mod yaml;

pub use json::Json;
pub use self::toml::Toml;
pub use yaml::Yaml;

use crate::map::{Result, Value};

/// Bidirectional mapping between one external value model and [`Value`].
///
/// Adaptors are stateless. `to_canonical` fails only on external constructs
/// the canonical model cannot hold; `from_canonical` is total.
pub trait Format {
	/// External value type.
	type External;

	/// Stable lowercase label.
	const NAME: &'static str;

	/// Adapt an external value.
	fn to_canonical(external: &Self::External) -> Result<Value>;

	/// Render a canonical value in the external model.
	fn from_canonical(value: &Value) -> Self::External;
}
