/// Errors that can occur while encoding or decoding records.
///
/// None of these are fatal: the delivery policy is to report the condition
/// and drop the single offending message.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The payload length disagrees with the schema's wire size.
    #[error("wrong data packet size for modality {modality}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        modality: String,
        expected: usize,
        actual: usize,
    },

    /// The record carries a different number of readings than the schema declares.
    #[error("record for {modality} carries {actual} readings, schema declares {expected}")]
    ReadingCount {
        modality: String,
        expected: usize,
        actual: usize,
    },

    /// An unsigned value overflows the declared field width (encode only).
    #[error("value {value} does not fit field {field} of {modality} ({width} bytes)")]
    FieldRange {
        modality: String,
        field: String,
        value: u32,
        width: usize,
    },

    /// A reading's numeric kind does not match the field it is written to (encode only).
    #[error("reading kind does not match field {field} of {modality}")]
    ReadingKind { modality: String, field: String },
}

pub type Result<T> = std::result::Result<T, CodecError>;
