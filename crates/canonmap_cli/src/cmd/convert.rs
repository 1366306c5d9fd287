use std::path::PathBuf;

use canonmap::map::Path;
use tracing::debug;

use crate::cmd::util::{FormatKind, emit_text, read_document, render_document};
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long, value_enum)]
	pub from: Option<FormatKind>,
	#[arg(long, value_enum)]
	pub to: FormatKind,
	#[arg(long = "path", value_name = "PATH")]
	pub select: Option<String>,
	#[arg(long)]
	pub compact: bool,
}

/// Convert a document between formats through the canonical value model.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args {
		file,
		from,
		to,
		select,
		compact,
	} = args;

	let from = FormatKind::resolve(from, &file)?;
	debug!(file = %file.display(), from = from.name(), to = to.name(), "convert");
	let document = read_document(&file, from)?;

	let value = match &select {
		Some(raw) => {
			let path = Path::parse(raw)?;
			document.select(&path).ok_or_else(|| CliError::PathNotFound { path: raw.clone() })?
		}
		None => &document,
	};

	emit_text(&render_document(value, to, compact)?);
	Ok(())
}
