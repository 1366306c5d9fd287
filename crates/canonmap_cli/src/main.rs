#![allow(missing_docs)]

mod cmd;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CANONMAP_LOG";

#[derive(Parser)]
#[command(name = "canonmap", version, about = "Convert documents between JSON, TOML, and YAML and map them through declared schemas")]
struct Cli {
	/// Log at debug level regardless of CANONMAP_LOG.
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Convert a document between formats.
	Convert(cmd::convert::Args),
	/// Map a document through the bundled sample schema.
	Map(cmd::map::Args),
	/// Print the bundled sample schema.
	Schema(cmd::schema::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), error::CliError> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match cli.command {
		Command::Convert(args) => cmd::convert::run(args),
		Command::Map(args) => cmd::map::run(args),
		Command::Schema(args) => cmd::schema::run(args),
	}
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.compact()
		.init();
}
