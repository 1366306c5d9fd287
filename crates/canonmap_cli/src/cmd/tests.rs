use crate::cmd::test_support::{fixture, run_canonmap, run_canonmap_json, run_canonmap_stdout};

#[test]
fn map_normalizes_the_json_sample() {
	let json = run_canonmap_json(&["map", &fixture("sample.json")]);

	assert_eq!(json["str"], "hello");
	assert_eq!(json["io"], "output-2");
	assert_eq!(json["pri"], "PRI-FF");
	assert_eq!(json["in"][1]["version"], "single");
	assert_eq!(json["in"][1]["desc"], "default value");
	assert_eq!(json["nm"]["b"]["version"], "hello2");
}

#[test]
fn map_reads_toml_and_writes_json() {
	let json = run_canonmap_json(&["map", &fixture("sample.toml"), "--to", "json"]);
	assert_eq!(json["i"], 10);
	assert_eq!(json["vec"].as_array().map(Vec::len), Some(3));
	assert_eq!(json["io"], "output-2");
}

#[test]
fn map_errors_carry_paths() {
	let output = run_canonmap(&["map", &fixture("strict_extra.json")]);
	assert!(!output.status.success(), "strict nested element should fail");
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("in[1]"), "stderr should name the path: {stderr}");
	assert!(stderr.contains("colour"), "stderr should name the key: {stderr}");
}

#[test]
fn convert_selects_a_sub_document() {
	let text = run_canonmap_stdout(&["convert", &fixture("sample.yaml"), "--to", "json", "--path", "nm.a", "--compact"]);
	assert_eq!(text.trim(), r#"{"version":"hello"}"#);
}

#[test]
fn convert_rejects_missing_paths() {
	let output = run_canonmap(&["convert", &fixture("sample.json"), "--to", "yaml", "--path", "nm.zzz"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: path nm.zzz not found"));
}

#[test]
fn schema_json_lists_registered_types() {
	let json = run_canonmap_json(&["schema", "--json"]);
	let names: Vec<_> = json
		.as_array()
		.expect("schema list")
		.iter()
		.map(|item| item["name"].as_str().unwrap_or_default().to_owned())
		.collect();
	assert_eq!(names, vec!["mode", "nested", "sample"]);
	assert_eq!(json[1]["primary"], "version");
	assert_eq!(json[2]["fields"][4]["shape"], "[nested]");
	assert_eq!(json[2]["fields"][0]["attributes"][0], r#"default="hello""#);
}
