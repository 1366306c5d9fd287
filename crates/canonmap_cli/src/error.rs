use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Input file could not be read.
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		/// File that failed.
		path: PathBuf,
		/// Underlying I/O error.
		source: std::io::Error,
	},
	/// Mapping or adaptor failure.
	#[error(transparent)]
	Map(#[from] canonmap::map::MapError),
	/// JSON text could not be parsed or rendered.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// TOML text could not be parsed.
	#[error("toml: {0}")]
	TomlParse(#[from] toml::de::Error),
	/// TOML text could not be rendered.
	#[error("toml: {0}")]
	TomlWrite(#[from] toml::ser::Error),
	/// YAML text could not be parsed or rendered.
	#[error("yaml: {0}")]
	Yaml(#[from] serde_yaml::Error),
	/// Format could not be inferred from the file name.
	#[error("cannot infer format of {}; pass --from", .path.display())]
	UnknownFormat {
		/// File whose extension was not recognized.
		path: PathBuf,
	},
	/// TOML documents must have a table at the root.
	#[error("toml output needs an object at the root, got {kind}")]
	TomlRoot {
		/// Kind of the root value.
		kind: canonmap::map::Kind,
	},
	/// `--path` selected nothing.
	#[error("path {path} not found in document")]
	PathNotFound {
		/// Path as given on the command line.
		path: String,
	},
}
