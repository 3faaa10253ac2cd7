use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sensewire_codec::Record;
use sensewire_route::{RecordSink, Topic};

use crate::output::{joined_readings, render_time};

/// Appends one `node,modality,time,readings` row per record — the flat-file
/// layout the downstream data importer consumes.
pub struct CsvSink<W: Write> {
    out: W,
}

impl CsvSink<BufWriter<File>> {
    /// Open (or create) the file in append mode.
    pub fn append(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn emit(&mut self, topic: &Topic, record: &Record) -> io::Result<()> {
        writeln!(self.out, "{}", format_row(topic, record))?;
        // Rows must survive an interrupted tail; flush per record.
        self.out.flush()
    }
}

pub fn format_row(topic: &Topic, record: &Record) -> String {
    format!(
        "{},{},{},{}",
        topic.node_id,
        topic.modality,
        render_time(record.timestamp),
        joined_readings(record)
    )
}
