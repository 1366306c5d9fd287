use std::path::PathBuf;

use tracing::debug;

use crate::cmd::sample::{self, Sample};
use crate::cmd::util::{FormatKind, emit_text, read_document, render_document};
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long, value_enum)]
	pub from: Option<FormatKind>,
	#[arg(long, value_enum)]
	pub to: Option<FormatKind>,
	#[arg(long)]
	pub compact: bool,
}

/// Map a document through the bundled sample schema and print the normalized result.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args { file, from, to, compact } = args;

	let from = FormatKind::resolve(from, &file)?;
	let to = to.unwrap_or(from);
	let registry = sample::registry()?;
	let document = read_document(&file, from)?;

	let mapped: Sample = registry.convert_in(&document)?;
	debug!(i = mapped.i, inputs = mapped.inputs.len(), "mapped sample");
	let normalized = registry.convert_out(&mapped)?;

	emit_text(&render_document(&normalized, to, compact)?);
	Ok(())
}
