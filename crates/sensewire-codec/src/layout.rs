/// Every record starts with an unsigned 32-bit timestamp, seconds since epoch.
///
/// Unsigned keeps timestamps past 2038 correct, unlike a signed 32-bit read.
pub const TIMESTAMP_SIZE: usize = 4;

/// Byte order applied uniformly to every multi-byte field of a record.
///
/// A per-deployment constant: sensor firmware for one deployment emits all
/// records in a single order. Threaded in at construction so deployments
/// with different orders can coexist in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Numeric kind and wire width of one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// IEEE-754 single precision, 4 bytes.
    F32,
    /// IEEE-754 double precision, 8 bytes.
    F64,
    /// Unsigned 8-bit, zero-extended on decode.
    U8,
    /// Unsigned 16-bit, zero-extended on decode.
    U16,
    /// Unsigned 32-bit.
    U32,
}

impl FieldKind {
    /// Wire width in bytes.
    pub fn width(self) -> usize {
        match self {
            FieldKind::F32 | FieldKind::U32 => 4,
            FieldKind::F64 => 8,
            FieldKind::U8 => 1,
            FieldKind::U16 => 2,
        }
    }
}

/// One field of a modality's layout, at a fixed offset into the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name, e.g. `value` or `latitude`.
    pub name: String,
    /// Numeric kind and width.
    pub kind: FieldKind,
    /// Byte offset from the start of the record (past the timestamp).
    pub offset: usize,
}

/// The fixed byte layout of one modality's records.
///
/// Immutable once built. The field list is laid out contiguously after the
/// timestamp, so `wire_size` equals the offset one past the last field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalitySchema {
    name: String,
    fields: Vec<Field>,
    wire_size: usize,
}

impl ModalitySchema {
    /// Lay out a modality: the 4-byte timestamp followed by `fields` in order.
    pub fn new(name: impl Into<String>, fields: &[(&str, FieldKind)]) -> Self {
        let mut offset = TIMESTAMP_SIZE;
        let fields = fields
            .iter()
            .map(|(field_name, kind)| {
                let field = Field {
                    name: (*field_name).to_string(),
                    kind: *kind,
                    offset,
                };
                offset += kind.width();
                field
            })
            .collect();

        Self {
            name: name.into(),
            fields,
            wire_size: offset,
        }
    }

    /// Modality name this layout belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in wire order, timestamp excluded.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Expected total payload length in bytes, timestamp included.
    pub fn wire_size(&self) -> usize {
        self.wire_size
    }
}
