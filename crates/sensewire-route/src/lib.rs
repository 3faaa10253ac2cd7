//! Topic parsing and telemetry routing.
//!
//! This is the "just works" layer. Hand it a topic string and a payload,
//! get back a decoded record paired with routing metadata, or a structured
//! reason the message cannot be decoded. Nothing here is fatal: every error
//! is meant to be logged and the single message dropped, with delivery of
//! subsequent messages unaffected.

pub mod error;
pub mod router;
pub mod sink;
pub mod topic;

pub use error::{Result, RouteError};
pub use router::{Inbound, Router};
pub use sink::{Dispatcher, RecordSink};
pub use topic::{Topic, MIN_SEGMENTS};
