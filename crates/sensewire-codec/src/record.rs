use std::fmt;

/// One decoded reading.
///
/// Sub-32-bit unsigned fields are zero-extended into `Unsigned`; no sign
/// extension ever applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Single-precision measurement (light, temperature, gas levels...).
    Float(f32),
    /// Double-precision measurement (latitude, longitude).
    Double(f64),
    /// Unsigned integer measurement (particulate counts, status bytes).
    Unsigned(u32),
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Float(v) => write!(f, "{v}"),
            Reading::Double(v) => write!(f, "{v}"),
            Reading::Unsigned(v) => write!(f, "{v}"),
        }
    }
}

/// A decoded telemetry record: timestamp plus readings in schema order.
///
/// Immutable once decoded; created per inbound message and handed to the
/// sink, no retained state.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Seconds since epoch, unsigned.
    pub timestamp: u32,
    /// Readings in the order the schema declares them.
    pub readings: Vec<Reading>,
}

impl Record {
    /// Create a record from a timestamp and readings.
    pub fn new(timestamp: u32, readings: Vec<Reading>) -> Self {
        Self {
            timestamp,
            readings,
        }
    }
}
