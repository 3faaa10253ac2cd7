//! Modality schema registry: which byte layout belongs to which sensor kind.
//!
//! A modality is a sensor data kind (Temperature, Location, PM2d5...). Each
//! one maps to a fixed record layout. The registry holds that table, built
//! once at startup and read-only afterwards, together with the deployment's
//! byte order.
//!
//! Adding a modality is a data change: register one more
//! [`ModalitySchema`](sensewire_codec::ModalitySchema), no decode code.

pub mod config;
pub mod error;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{Result, SchemaError};
pub use registry::SchemaRegistry;
