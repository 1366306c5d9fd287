use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use canonmap_testkit::{fixture_path as shared_fixture_path, target_dir};

static CANONMAP_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture(name: &str) -> String {
	shared_fixture_path(name).display().to_string()
}

pub(crate) fn run_canonmap(args: &[&str]) -> Output {
	Command::new(canonmap_bin())
		.args(args)
		.env_remove("CANONMAP_LOG")
		.output()
		.expect("canonmap command executes")
}

pub(crate) fn run_canonmap_stdout(args: &[&str]) -> String {
	let output = run_canonmap(args);
	assert!(
		output.status.success(),
		"canonmap command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).expect("stdout should be utf-8")
}

pub(crate) fn run_canonmap_json(args: &[&str]) -> serde_json::Value {
	serde_json::from_str(&run_canonmap_stdout(args)).expect("stdout should be valid json")
}

fn canonmap_bin() -> &'static PathBuf {
	CANONMAP_BIN.get_or_init(resolve_canonmap_bin)
}

fn resolve_canonmap_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_canonmap") {
		return PathBuf::from(path);
	}

	let mut bin = target_dir().join("debug");
	bin.push(if cfg!(windows) { "canonmap.exe" } else { "canonmap" });

	let status = Command::new("cargo")
		.current_dir(env!("CARGO_MANIFEST_DIR"))
		.args(["build", "--quiet", "--bin", "canonmap"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build canonmap binary at {}", bin.display());

	bin
}
