use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use sensewire_codec::{encode_record, ByteOrder, Reading, Record};
use sensewire_schema::{RegistryConfig, SchemaRegistry};

use crate::cmd::GenArgs;
use crate::exit::{io_error, CliError, CliResult, INTERNAL, SUCCESS};
use crate::hex::format_hex;

const FIXED_SITE: &str = "jld_site_1";
const MOBILE_SITE: &str = "jld_mobile";

/// Waypoints of the mobile demo node's loop (latitude, longitude).
const DEMO_ROUTE: [(f64, f64); 21] = [
    (1.333023, 103.740858),
    (1.332408, 103.741279),
    (1.331854, 103.741793),
    (1.331807, 103.742877),
    (1.332551, 103.743648),
    (1.333159, 103.744079),
    (1.333721, 103.744227),
    (1.334049, 103.743972),
    (1.3346, 103.743508),
    (1.335143, 103.743274),
    (1.335683, 103.742865),
    (1.336140, 103.742588),
    (1.336713, 103.741749),
    (1.336945, 103.741279),
    (1.336885, 103.740097),
    (1.336460, 103.739516),
    (1.336155, 103.73941),
    (1.335357, 103.73909),
    (1.335501, 103.739786),
    (1.334585, 103.740571),
    (1.333849, 103.740676),
];

pub fn run(args: GenArgs) -> CliResult<i32> {
    let order = args.byte_order.map(Into::into).unwrap_or_default();
    let registry = SchemaRegistry::with_config(RegistryConfig::with_byte_order(order));

    let mut out = std::io::stdout().lock();
    for line in feed_lines(&args, &registry, order)? {
        writeln!(out, "{line}").map_err(|err| io_error("write failed", err))?;
    }
    Ok(SUCCESS)
}

/// Build the feed: alternating Light and Temperature readings, plus a
/// Location fix per reading for mobile nodes, timestamps one second apart.
fn feed_lines(args: &GenArgs, registry: &SchemaRegistry, order: ByteOrder) -> CliResult<Vec<String>> {
    let site = args.site.clone().unwrap_or_else(|| {
        let default = if args.mobile { MOBILE_SITE } else { FIXED_SITE };
        default.to_string()
    });
    let start = match args.timestamp {
        Some(timestamp) => timestamp,
        None => now_unix(),
    };

    let mut lines = Vec::new();
    for i in 0..args.count {
        let timestamp = start.wrapping_add(i as u32);
        let (modality, reading) = if i % 2 == 0 {
            ("Light", Reading::Float(30000.0 + 3000.0 * phase(i)))
        } else {
            ("Temperature", Reading::Float(25.0 + 2.0 * phase(i)))
        };
        lines.push(feed_line(
            registry,
            order,
            &site,
            args.node,
            modality,
            &Record::new(timestamp, vec![reading]),
        )?);

        // The demo assumes a location fix lands together with each reading.
        if args.mobile {
            let (lat, lon) = DEMO_ROUTE[(i % DEMO_ROUTE.len() as u64) as usize];
            lines.push(feed_line(
                registry,
                order,
                &site,
                args.node,
                "Location",
                &Record::new(timestamp, vec![Reading::Double(lat), Reading::Double(lon)]),
            )?);
        }
    }
    Ok(lines)
}

fn feed_line(
    registry: &SchemaRegistry,
    order: ByteOrder,
    site: &str,
    node: u32,
    modality: &str,
    record: &Record,
) -> CliResult<String> {
    let schema = registry.lookup(modality).ok_or_else(|| {
        CliError::new(INTERNAL, format!("modality {modality} missing from registry"))
    })?;
    let wire = encode_record(schema, order, record)
        .map_err(|err| CliError::new(INTERNAL, format!("encode failed: {err}")))?;
    Ok(format!("/sns/{site}/{node}/{modality} {}", format_hex(&wire)))
}

fn phase(i: u64) -> f32 {
    (i % 10) as f32 / 10.0
}

fn now_unix() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
