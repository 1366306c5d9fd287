use std::path::Path;

use canonmap::map::{Format, Json, Kind, Toml, Value, Yaml};

use crate::error::CliError;

/// External text format handled by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatKind {
	Json,
	Toml,
	Yaml,
}

impl FormatKind {
	/// Infer the format from a file extension.
	pub fn detect(path: &Path) -> Result<Self, CliError> {
		let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
		match extension.as_deref() {
			Some("json") => Ok(Self::Json),
			Some("toml") => Ok(Self::Toml),
			Some("yaml" | "yml") => Ok(Self::Yaml),
			_ => Err(CliError::UnknownFormat { path: path.to_owned() }),
		}
	}

	/// Explicit choice, falling back to the file extension.
	pub fn resolve(explicit: Option<Self>, path: &Path) -> Result<Self, CliError> {
		explicit.map_or_else(|| Self::detect(path), Ok)
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Json => Json::NAME,
			Self::Toml => Toml::NAME,
			Self::Yaml => Yaml::NAME,
		}
	}
}

/// Read `path` and adapt its contents to a canonical value.
pub fn read_document(path: &Path, format: FormatKind) -> Result<Value, CliError> {
	let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
		path: path.to_owned(),
		source,
	})?;
	parse_document(&text, format)
}

/// Parse `text` and adapt it to a canonical value.
pub fn parse_document(text: &str, format: FormatKind) -> Result<Value, CliError> {
	let value = match format {
		FormatKind::Json => Json::to_canonical(&serde_json::from_str(text)?)?,
		FormatKind::Toml => Toml::to_canonical(&toml::from_str::<toml::Value>(text)?)?,
		FormatKind::Yaml => Yaml::to_canonical(&serde_yaml::from_str(text)?)?,
	};
	Ok(value)
}

/// Render a canonical value as text.
pub fn render_document(value: &Value, format: FormatKind, compact: bool) -> Result<String, CliError> {
	let text = match format {
		FormatKind::Json => {
			let external = Json::from_canonical(value);
			if compact {
				serde_json::to_string(&external)?
			} else {
				serde_json::to_string_pretty(&external)?
			}
		}
		FormatKind::Toml => {
			if value.kind() != Kind::Object {
				return Err(CliError::TomlRoot { kind: value.kind() });
			}
			let external = Toml::from_canonical(value);
			if compact {
				toml::to_string(&external)?
			} else {
				toml::to_string_pretty(&external)?
			}
		}
		FormatKind::Yaml => serde_yaml::to_string(&Yaml::from_canonical(value))?,
	};
	Ok(text)
}

/// Print `text`, ending with exactly one newline.
pub fn emit_text(text: &str) {
	println!("{}", text.trim_end_matches('\n'));
}

/// Print a serializable payload as pretty JSON.
pub fn emit_json<T: serde::Serialize>(payload: &T) -> Result<(), CliError> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::Path;

	use canonmap::map::{Object, Value};

	use super::{FormatKind, parse_document, render_document};
	use crate::error::CliError;

	#[test]
	fn detects_formats_from_extensions() {
		assert_eq!(FormatKind::detect(Path::new("a.JSON")).expect("json detected"), FormatKind::Json);
		assert_eq!(FormatKind::detect(Path::new("dir/a.yml")).expect("yml detected"), FormatKind::Yaml);
		assert_eq!(FormatKind::detect(Path::new("a.toml")).expect("toml detected"), FormatKind::Toml);
		assert!(matches!(FormatKind::detect(Path::new("a.txt")), Err(CliError::UnknownFormat { .. })));
		assert_eq!(
			FormatKind::resolve(Some(FormatKind::Yaml), Path::new("a.txt")).expect("explicit format wins"),
			FormatKind::Yaml
		);
	}

	#[test]
	fn toml_output_requires_a_root_object() {
		let err = render_document(&Value::Int(1), FormatKind::Toml, false).expect_err("scalars are not tables");
		assert!(matches!(err, CliError::TomlRoot { .. }));

		let object: Object = [("a", Value::Int(1))].into_iter().collect();
		let text = render_document(&Value::Object(object), FormatKind::Toml, false).expect("tables render");
		assert_eq!(text.trim(), "a = 1");
	}

	#[test]
	fn documents_convert_between_formats() {
		let value = parse_document("a: [1, two]\nb: {c: true}\n", FormatKind::Yaml).expect("yaml parses");
		let json = render_document(&value, FormatKind::Json, true).expect("json renders");
		assert_eq!(json, r#"{"a":[1,"two"],"b":{"c":true}}"#);
		assert_eq!(parse_document(&json, FormatKind::Json).expect("json parses"), value);
	}
}
