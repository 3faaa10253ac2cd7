use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use sensewire_codec::ByteOrder;

use crate::config::FileConfig;
use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod gen;
pub mod modalities;
pub mod tail;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a single payload against its topic.
    Decode(DecodeArgs),
    /// Follow a feed of `<topic> <hexpayload>` lines and decode each one.
    Tail(TailArgs),
    /// Generate a demo telemetry feed.
    Gen(GenArgs),
    /// List the registered modalities and their layouts.
    Modalities(ModalitiesArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Tail(args) => tail::run(args, format),
        Command::Gen(args) => gen::run(args),
        Command::Modalities(args) => modalities::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Byte order flag; config-file values use the same names.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ByteOrderArg {
    Little,
    Big,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Little => ByteOrder::Little,
            ByteOrderArg::Big => ByteOrder::Big,
        }
    }
}

/// Merge the byte-order flag with an optional config file; the flag wins.
pub(crate) fn resolve_config(
    byte_order: Option<ByteOrderArg>,
    config_path: Option<&Path>,
) -> CliResult<(FileConfig, ByteOrder)> {
    let file = match config_path {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let order = match byte_order {
        Some(arg) => arg.into(),
        None => file.byte_order()?.unwrap_or_default(),
    };
    Ok((file, order))
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Topic the payload was published on.
    #[arg(long, short = 't')]
    pub topic: String,
    /// Payload as hex digits.
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read the raw payload bytes from a file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Source byte order; overrides the config file.
    #[arg(long, value_name = "ORDER")]
    pub byte_order: Option<ByteOrderArg>,
    /// JSON config file (byte_order, csv).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TailArgs {
    /// Feed file to follow; absent or `-` reads stdin.
    pub feed: Option<PathBuf>,
    /// Append decoded rows to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
    /// Exit after emitting N records.
    #[arg(long)]
    pub count: Option<u64>,
    /// Do not print records to stdout.
    #[arg(long)]
    pub quiet: bool,
    /// Source byte order; overrides the config file.
    #[arg(long, value_name = "ORDER")]
    pub byte_order: Option<ByteOrderArg>,
    /// JSON config file (byte_order, csv).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenArgs {
    /// Number of sensor readings to emit.
    #[arg(long, default_value = "21")]
    pub count: u64,
    /// Node id to publish as.
    #[arg(long, default_value = "1")]
    pub node: u32,
    /// Generate a mobile node feed (adds Location fixes along the demo route).
    #[arg(long)]
    pub mobile: bool,
    /// Site segment of the generated topics.
    #[arg(long)]
    pub site: Option<String>,
    /// Timestamp of the first record; defaults to now.
    #[arg(long)]
    pub timestamp: Option<u32>,
    /// Byte order to encode with.
    #[arg(long, value_name = "ORDER")]
    pub byte_order: Option<ByteOrderArg>,
}

#[derive(Args, Debug, Default)]
pub struct ModalitiesArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
