use std::io::IsTerminal;

use chrono::{TimeZone, Utc};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use sensewire_codec::{FieldKind, Reading, Record};
use sensewire_route::Topic;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Csv,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct RecordOutput<'a> {
    topic: &'a str,
    site: &'a str,
    node: &'a str,
    modality: &'a str,
    timestamp: u32,
    time: String,
    readings: Vec<serde_json::Value>,
}

pub fn print_record(topic: &Topic, record: &Record, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = RecordOutput {
                topic: &topic.raw,
                site: &topic.site,
                node: &topic.node_id,
                modality: &topic.modality,
                timestamp: record.timestamp,
                time: render_time(record.timestamp),
                readings: record.readings.iter().map(reading_json).collect(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NODE", "MODALITY", "TIME", "READINGS"])
                .add_row(vec![
                    topic.node_id.clone(),
                    topic.modality.clone(),
                    render_time(record.timestamp),
                    joined_readings(record),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "node={} site={} modality={} time={} readings=[{}]",
                topic.node_id,
                topic.site,
                topic.modality,
                render_time(record.timestamp),
                joined_readings(record)
            );
        }
        OutputFormat::Csv => {
            println!("{}", crate::csv::format_row(topic, record));
        }
    }
}

/// Record timestamps render as UTC wall-clock time, the layout the flat-file
/// importer expects.
pub fn render_time(timestamp: u32) -> String {
    match Utc.timestamp_opt(i64::from(timestamp), 0).single() {
        Some(time) => time.format("%d-%m-%Y %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn joined_readings(record: &Record) -> String {
    let parts: Vec<String> = record.readings.iter().map(ToString::to_string).collect();
    parts.join(",")
}

pub fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::F32 => "f32",
        FieldKind::F64 => "f64",
        FieldKind::U8 => "u8",
        FieldKind::U16 => "u16",
        FieldKind::U32 => "u32",
    }
}

fn reading_json(reading: &Reading) -> serde_json::Value {
    match reading {
        Reading::Float(v) => serde_json::Value::from(f64::from(*v)),
        Reading::Double(v) => serde_json::Value::from(*v),
        Reading::Unsigned(v) => serde_json::Value::from(*v),
    }
}
