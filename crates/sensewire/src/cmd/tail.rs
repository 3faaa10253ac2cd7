use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sensewire_codec::Record;
use sensewire_route::{Dispatcher, RecordSink, Router, Topic};
use sensewire_schema::{RegistryConfig, SchemaRegistry};
use tracing::{info, warn};

use crate::cmd::{resolve_config, TailArgs};
use crate::csv::CsvSink;
use crate::exit::{io_error, CliError, CliResult, SUCCESS};
use crate::hex::parse_hex;
use crate::output::{print_record, OutputFormat};

pub fn run(args: TailArgs, format: OutputFormat) -> CliResult<i32> {
    let (config, order) = resolve_config(args.byte_order, args.config.as_deref())?;
    let csv_path = args.csv.clone().or(config.csv);

    let registry = SchemaRegistry::with_config(RegistryConfig::with_byte_order(order));
    let sink = TailSink {
        print: (!args.quiet).then_some(format),
        csv: csv_path
            .map(|path| CsvSink::append(&path))
            .transpose()
            .map_err(|err| io_error("failed opening csv output", err))?,
    };
    let mut dispatcher = Dispatcher::new(Router::new(registry), sink);

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let reader = open_feed(args.feed.as_deref())?;
    for line in reader.lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }
        let line = line.map_err(|err| io_error("failed reading feed", err))?;

        let (topic, payload) = match parse_feed_line(&line) {
            None => continue,
            Some(Err(reason)) => {
                warn!(line = line.trim(), %reason, "skipping unreadable feed line");
                continue;
            }
            Some(Ok(parsed)) => parsed,
        };

        dispatcher
            .ingest(&topic, &payload)
            .map_err(|err| io_error("sink write failed", err))?;

        if let Some(count) = args.count {
            if dispatcher.emitted() >= count {
                break;
            }
        }
    }

    info!(
        emitted = dispatcher.emitted(),
        dropped = dispatcher.dropped(),
        "feed finished"
    );
    Ok(SUCCESS)
}

/// One message per line: `<topic> <hexpayload>`. Blank lines and `#`
/// comments are skipped silently; anything else unreadable is skipped with
/// a warning, never a stop.
fn parse_feed_line(line: &str) -> Option<Result<(String, Vec<u8>), String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let topic = tokens.next()?;
    let Some(hex) = tokens.next() else {
        return Some(Err("missing payload hex".to_string()));
    };
    if tokens.next().is_some() {
        return Some(Err("trailing tokens after payload".to_string()));
    }

    match parse_hex(hex) {
        Ok(payload) => Some(Ok((topic.to_string(), payload))),
        Err(reason) => Some(Err(reason)),
    }
}

fn open_feed(path: Option<&Path>) -> CliResult<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) if path == Path::new("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let file = File::open(path)
                .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

struct TailSink {
    print: Option<OutputFormat>,
    csv: Option<CsvSink<BufWriter<File>>>,
}

impl RecordSink for TailSink {
    fn emit(&mut self, topic: &Topic, record: &Record) -> io::Result<()> {
        if let Some(format) = self.print {
            print_record(topic, record, format);
        }
        if let Some(csv) = &mut self.csv {
            csv.emit(topic, record)?;
        }
        Ok(())
    }
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_line_splits_topic_and_payload() {
        let (topic, payload) = parse_feed_line("/sns/siteA/node7/BoxOpen 0a00000001")
            .unwrap()
            .unwrap();
        assert_eq!(topic, "/sns/siteA/node7/BoxOpen");
        assert_eq!(payload, vec![0x0A, 0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        assert!(parse_feed_line("").is_none());
        assert!(parse_feed_line("   ").is_none());
        assert!(parse_feed_line("# a comment").is_none());
    }

    #[test]
    fn missing_or_malformed_payload_is_reported() {
        assert!(parse_feed_line("/sns/a/b/c").unwrap().is_err());
        assert!(parse_feed_line("/sns/a/b/c nothex!").unwrap().is_err());
        assert!(parse_feed_line("/sns/a/b/c 00ff extra").unwrap().is_err());
    }
}
