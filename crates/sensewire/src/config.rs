use std::path::{Path, PathBuf};

use sensewire_codec::ByteOrder;
use serde::Deserialize;

use crate::exit::{io_error, CliError, CliResult, USAGE};

/// Optional JSON config file for the feed commands.
///
/// Keys mirror the deployment subscriber configs: `byte_order` accepts the
/// names or the legacy `0`/`1` codes; `csv` is the append target for decoded
/// rows. Command-line flags override file values.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub byte_order: Option<String>,
    #[serde(default)]
    pub csv: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> CliResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        serde_json::from_str(&raw).map_err(|err| {
            CliError::new(USAGE, format!("invalid config {}: {err}", path.display()))
        })
    }

    /// The configured byte order, if any. An unrecognized value is a usage
    /// error, not a silent default.
    pub fn byte_order(&self) -> CliResult<Option<ByteOrder>> {
        match &self.byte_order {
            None => Ok(None),
            Some(value) => match parse_byte_order(value) {
                Some(order) => Ok(Some(order)),
                None => Err(CliError::new(
                    USAGE,
                    format!("invalid byte_order value {value:?} (expected little/big or 0/1)"),
                )),
            },
        }
    }
}

/// `0` means little-endian and `1` big-endian in the legacy configs.
pub fn parse_byte_order(value: &str) -> Option<ByteOrder> {
    match value.trim().to_ascii_lowercase().as_str() {
        "little" | "le" | "0" => Some(ByteOrder::Little),
        "big" | "be" | "1" => Some(ByteOrder::Big),
        _ => None,
    }
}
