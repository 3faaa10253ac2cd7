use std::fs;

use sensewire_route::Router;
use sensewire_schema::{RegistryConfig, SchemaRegistry};

use crate::cmd::{resolve_config, DecodeArgs};
use crate::exit::{io_error, route_error, CliError, CliResult, SUCCESS, USAGE};
use crate::hex::parse_hex;
use crate::output::{print_record, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let (_config, order) = resolve_config(args.byte_order, args.config.as_deref())?;
    let payload = resolve_payload(&args)?;

    let registry = SchemaRegistry::with_config(RegistryConfig::with_byte_order(order));
    let router = Router::new(registry);

    let inbound = router
        .route(&args.topic, &payload)
        .map_err(|err| route_error("decode failed", err))?;

    print_record(&inbound.topic, &inbound.record, format);
    Ok(SUCCESS)
}

fn resolve_payload(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex(hex).map_err(|msg| CliError::new(USAGE, format!("--hex: {msg}")));
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "one of --hex or --file is required"))
}
