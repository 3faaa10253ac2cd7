use std::collections::HashMap;

use sensewire_codec::{ByteOrder, FieldKind, ModalitySchema};
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{Result, SchemaError};

/// Modality-keyed registry of record layouts.
///
/// Built once per deployment, read-only afterwards. Lookups are O(1) by
/// modality name; an unknown name returns `None` rather than failing, so the
/// caller can report-and-drop the message.
pub struct SchemaRegistry {
    schemas: HashMap<String, ModalitySchema>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Registry with the built-in modality table and default config.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Registry with the built-in modality table and explicit config.
    pub fn with_config(config: RegistryConfig) -> Self {
        let mut schemas = HashMap::new();
        for schema in builtin_schemas() {
            schemas.insert(schema.name().to_string(), schema);
        }
        debug!(modalities = schemas.len(), "registry initialized");
        Self { schemas, config }
    }

    /// Registry with no modalities, for fully custom deployments.
    pub fn empty_with_config(config: RegistryConfig) -> Self {
        Self {
            schemas: HashMap::new(),
            config,
        }
    }

    /// Register a deployment-specific modality. A construction-time
    /// operation; the registry is not meant to change once routing starts.
    pub fn register(&mut self, schema: ModalitySchema) -> Result<()> {
        if schema.fields().is_empty() {
            return Err(SchemaError::EmptyLayout(schema.name().to_string()));
        }
        if self.schemas.contains_key(schema.name()) {
            return Err(SchemaError::Duplicate(schema.name().to_string()));
        }
        self.schemas.insert(schema.name().to_string(), schema);
        Ok(())
    }

    /// Look up the layout for a modality name.
    pub fn lookup(&self, modality: &str) -> Option<&ModalitySchema> {
        self.schemas.get(modality)
    }

    /// Whether a modality is registered.
    pub fn has_modality(&self, modality: &str) -> bool {
        self.schemas.contains_key(modality)
    }

    /// Registered modality names, sorted.
    pub fn modalities(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The deployment's source byte order.
    pub fn byte_order(&self) -> ByteOrder {
        self.config.byte_order
    }

    /// Registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The deployed modality table.
///
/// Every record opens with the 4-byte timestamp. BoxOpen is the odd one out:
/// the packet is 5 bytes, so the value is the single byte after the
/// timestamp, even though the sensor datasheet advertises a 16-bit field —
/// the registry keeps the wire truth, not the datasheet.
fn builtin_schemas() -> Vec<ModalitySchema> {
    const SINGLE_F32: [&str; 10] = [
        "Light",
        "Temperature",
        "Humidity",
        "Noise",
        "CO",
        "CO2",
        "NO2",
        "O3",
        "H2S_NH3_H2",
        "CH4_CO",
    ];
    const SINGLE_U16: [&str; 3] = ["PM2d5", "PM10", "SO2"];

    let mut schemas = Vec::with_capacity(SINGLE_F32.len() + SINGLE_U16.len() + 2);
    for name in SINGLE_F32 {
        schemas.push(ModalitySchema::new(name, &[("value", FieldKind::F32)]));
    }
    for name in SINGLE_U16 {
        schemas.push(ModalitySchema::new(name, &[("value", FieldKind::U16)]));
    }
    schemas.push(ModalitySchema::new("BoxOpen", &[("state", FieldKind::U8)]));
    schemas.push(ModalitySchema::new(
        "Location",
        &[("latitude", FieldKind::F64), ("longitude", FieldKind::F64)],
    ));
    schemas
}
