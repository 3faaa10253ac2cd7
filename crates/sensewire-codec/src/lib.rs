//! Fixed-layout binary record codec for sensor telemetry payloads.
//!
//! Every payload is a compact binary record: a 4-byte unsigned timestamp
//! (seconds since epoch) followed by one or more numeric readings at fixed
//! offsets. The layout is described by a [`ModalitySchema`]; the codec
//! validates payload size, then reads or writes the fields in schema order
//! using one configured [`ByteOrder`] for the whole record.
//!
//! The codec never guesses a layout from payload shape — the caller supplies
//! the schema (normally from the registry in `sensewire-schema`).

pub mod codec;
pub mod error;
pub mod layout;
pub mod record;

pub use codec::{decode_record, encode_record};
pub use error::{CodecError, Result};
pub use layout::{ByteOrder, Field, FieldKind, ModalitySchema, TIMESTAMP_SIZE};
pub use record::{Reading, Record};
