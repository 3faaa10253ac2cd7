//! Topic-routed binary telemetry codec for sensor networks.
//!
//! Sensor nodes publish compact fixed-layout binary records on topics of the
//! form `/sns/<site>/<node>/<modality>`. sensewire turns a (topic, payload)
//! pair into a typed record: parse the topic, look the modality up in the
//! schema registry, validate the payload size, decode the fields.
//!
//! # Crate Structure
//!
//! - [`codec`] — record layouts, byte order, encode/decode
//! - [`schema`] — the modality → layout registry
//! - [`route`] — topic parsing, routing, and the sink boundary (behind the
//!   `route` feature, on by default)

/// Re-export codec types.
pub mod codec {
    pub use sensewire_codec::*;
}

/// Re-export schema registry types.
pub mod schema {
    pub use sensewire_schema::*;
}

/// Re-export routing types (requires `route` feature).
#[cfg(feature = "route")]
pub mod route {
    pub use sensewire_route::*;
}
