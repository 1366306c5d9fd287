use canonmap::map::{Attribute, FieldSchema, Format, Json, Registry, Schema};

use crate::cmd::sample;
use crate::cmd::util::emit_json;
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub json: bool,
}

/// Print the descriptors of the bundled sample schema.
pub fn run(args: Args) -> Result<(), CliError> {
	let registry = sample::registry()?;

	if args.json {
		let payload: Vec<SchemaJson> = registry.schemas().map(|schema| schema_json(&registry, schema)).collect();
		return emit_json(&payload);
	}

	for schema in registry.schemas() {
		match schema {
			Schema::Struct(item) => {
				let mut flags = Vec::new();
				if item.strict {
					flags.push("strict".to_owned());
				}
				if let Some(primary) = &item.primary {
					flags.push(format!("primary={primary}"));
				}
				println!("struct {} [{}]", item.name, flags.join(", "));
				for field in &item.fields {
					let attributes: Vec<String> = field.attributes.iter().map(attribute_label).collect();
					println!("  {}: {} [{}]", field.key, registry.render_shape(&field.shape), attributes.join(", "));
				}
			}
			Schema::Enum(item) => {
				let symbols: Vec<&str> = item.symbols.iter().map(|symbol| &**symbol).collect();
				println!("enum {}: {}", item.name, symbols.join(" | "));
			}
		}
	}
	Ok(())
}

fn attribute_label(attribute: &Attribute) -> String {
	match attribute {
		Attribute::Default(value) => format!("default={}", Json::from_canonical(value)),
		other => other.label().to_owned(),
	}
}

fn schema_json(registry: &Registry, schema: Schema<'_>) -> SchemaJson {
	match schema {
		Schema::Struct(item) => SchemaJson {
			kind: "struct",
			name: item.name.to_string(),
			strict: Some(item.strict),
			primary: item.primary.as_deref().map(str::to_owned),
			fields: item.fields.iter().map(|field| field_json(registry, field)).collect(),
			symbols: Vec::new(),
		},
		Schema::Enum(item) => SchemaJson {
			kind: "enum",
			name: item.name.to_string(),
			strict: None,
			primary: None,
			fields: Vec::new(),
			symbols: item.symbols.iter().map(|symbol| symbol.to_string()).collect(),
		},
	}
}

fn field_json(registry: &Registry, field: &FieldSchema) -> FieldJson {
	FieldJson {
		key: field.key.to_string(),
		shape: registry.render_shape(&field.shape),
		optional: field.is_optional(),
		attributes: field.attributes.iter().map(attribute_label).collect(),
	}
}

#[derive(serde::Serialize)]
struct SchemaJson {
	kind: &'static str,
	name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	strict: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	primary: Option<String>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	fields: Vec<FieldJson>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	symbols: Vec<String>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	key: String,
	shape: String,
	optional: bool,
	attributes: Vec<String>,
}
