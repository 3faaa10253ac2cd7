use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use sensewire_codec::ModalitySchema;
use sensewire_schema::SchemaRegistry;
use serde::Serialize;

use crate::cmd::ModalitiesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{kind_name, OutputFormat};

#[derive(Serialize)]
struct ModalityOutput<'a> {
    modality: &'a str,
    wire_size: usize,
    fields: Vec<FieldOutput<'a>>,
}

#[derive(Serialize)]
struct FieldOutput<'a> {
    name: &'a str,
    kind: &'static str,
    offset: usize,
    width: usize,
}

pub fn run(_args: ModalitiesArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = SchemaRegistry::new();

    match format {
        OutputFormat::Json => {
            let out: Vec<ModalityOutput> = registry
                .modalities()
                .into_iter()
                .filter_map(|name| registry.lookup(name))
                .map(modality_output)
                .collect();
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "[]".to_string())
            );
        }
        _ => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MODALITY", "WIRE SIZE", "FIELDS"]);
            for name in registry.modalities() {
                if let Some(schema) = registry.lookup(name) {
                    table.add_row(vec![
                        name.to_string(),
                        schema.wire_size().to_string(),
                        fields_summary(schema),
                    ]);
                }
            }
            println!("{table}");
        }
    }

    Ok(SUCCESS)
}

fn modality_output(schema: &ModalitySchema) -> ModalityOutput<'_> {
    ModalityOutput {
        modality: schema.name(),
        wire_size: schema.wire_size(),
        fields: schema
            .fields()
            .iter()
            .map(|field| FieldOutput {
                name: &field.name,
                kind: kind_name(field.kind),
                offset: field.offset,
                width: field.kind.width(),
            })
            .collect(),
    }
}

fn fields_summary(schema: &ModalitySchema) -> String {
    let parts: Vec<String> = schema
        .fields()
        .iter()
        .map(|field| format!("{}: {}", field.name, kind_name(field.kind)))
        .collect();
    parts.join(", ")
}
