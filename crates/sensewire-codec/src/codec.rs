use bytes::{Buf, BufMut, BytesMut};
use tracing::trace;

use crate::error::{CodecError, Result};
use crate::layout::{ByteOrder, Field, FieldKind, ModalitySchema, TIMESTAMP_SIZE};
use crate::record::{Reading, Record};

/// Decode a payload into a typed record using its modality schema.
///
/// Validates the payload length first: a mismatch yields
/// [`CodecError::SizeMismatch`] without touching a single payload byte, so
/// the decoder never reads past a short buffer. On success the timestamp and
/// every field are read at their declared offsets in the configured byte
/// order.
pub fn decode_record(schema: &ModalitySchema, order: ByteOrder, payload: &[u8]) -> Result<Record> {
    if payload.len() != schema.wire_size() {
        return Err(CodecError::SizeMismatch {
            modality: schema.name().to_string(),
            expected: schema.wire_size(),
            actual: payload.len(),
        });
    }

    let timestamp = read_u32(&payload[..TIMESTAMP_SIZE], order);

    let mut readings = Vec::with_capacity(schema.fields().len());
    for field in schema.fields() {
        let bytes = &payload[field.offset..field.offset + field.kind.width()];
        readings.push(read_reading(bytes, field.kind, order));
    }

    trace!(modality = schema.name(), timestamp, "decoded record");
    Ok(Record::new(timestamp, readings))
}

/// Encode a record into its modality's wire form.
///
/// The inverse of [`decode_record`]: writes the timestamp, then each field
/// in schema order, in the configured byte order. The output length always
/// equals the schema's wire size. Unsigned values that overflow a declared
/// field width fail with [`CodecError::FieldRange`]; a reading of the wrong
/// numeric kind fails with [`CodecError::ReadingKind`].
pub fn encode_record(schema: &ModalitySchema, order: ByteOrder, record: &Record) -> Result<Vec<u8>> {
    if record.readings.len() != schema.fields().len() {
        return Err(CodecError::ReadingCount {
            modality: schema.name().to_string(),
            expected: schema.fields().len(),
            actual: record.readings.len(),
        });
    }

    let mut buf = BytesMut::with_capacity(schema.wire_size());
    write_u32(&mut buf, record.timestamp, order);

    for (field, reading) in schema.fields().iter().zip(&record.readings) {
        write_reading(&mut buf, schema.name(), field, *reading, order)?;
    }

    debug_assert_eq!(buf.len(), schema.wire_size());
    Ok(buf.to_vec())
}

fn read_u32(mut bytes: &[u8], order: ByteOrder) -> u32 {
    match order {
        ByteOrder::Little => bytes.get_u32_le(),
        ByteOrder::Big => bytes.get_u32(),
    }
}

fn write_u32(buf: &mut BytesMut, value: u32, order: ByteOrder) {
    match order {
        ByteOrder::Little => buf.put_u32_le(value),
        ByteOrder::Big => buf.put_u32(value),
    }
}

fn read_reading(mut bytes: &[u8], kind: FieldKind, order: ByteOrder) -> Reading {
    match (kind, order) {
        (FieldKind::F32, ByteOrder::Little) => Reading::Float(bytes.get_f32_le()),
        (FieldKind::F32, ByteOrder::Big) => Reading::Float(bytes.get_f32()),
        (FieldKind::F64, ByteOrder::Little) => Reading::Double(bytes.get_f64_le()),
        (FieldKind::F64, ByteOrder::Big) => Reading::Double(bytes.get_f64()),
        // Single bytes have no byte order; zero-extend, never sign-extend.
        (FieldKind::U8, _) => Reading::Unsigned(u32::from(bytes.get_u8())),
        (FieldKind::U16, ByteOrder::Little) => Reading::Unsigned(u32::from(bytes.get_u16_le())),
        (FieldKind::U16, ByteOrder::Big) => Reading::Unsigned(u32::from(bytes.get_u16())),
        (FieldKind::U32, ByteOrder::Little) => Reading::Unsigned(bytes.get_u32_le()),
        (FieldKind::U32, ByteOrder::Big) => Reading::Unsigned(bytes.get_u32()),
    }
}

fn write_reading(
    buf: &mut BytesMut,
    modality: &str,
    field: &Field,
    reading: Reading,
    order: ByteOrder,
) -> Result<()> {
    match (field.kind, reading) {
        (FieldKind::F32, Reading::Float(v)) => match order {
            ByteOrder::Little => buf.put_f32_le(v),
            ByteOrder::Big => buf.put_f32(v),
        },
        (FieldKind::F64, Reading::Double(v)) => match order {
            ByteOrder::Little => buf.put_f64_le(v),
            ByteOrder::Big => buf.put_f64(v),
        },
        (FieldKind::U8, Reading::Unsigned(v)) => {
            let v = unsigned_in_width(modality, field, v)?;
            buf.put_u8(v as u8);
        }
        (FieldKind::U16, Reading::Unsigned(v)) => {
            let v = unsigned_in_width(modality, field, v)?;
            match order {
                ByteOrder::Little => buf.put_u16_le(v as u16),
                ByteOrder::Big => buf.put_u16(v as u16),
            }
        }
        (FieldKind::U32, Reading::Unsigned(v)) => match order {
            ByteOrder::Little => buf.put_u32_le(v),
            ByteOrder::Big => buf.put_u32(v),
        },
        _ => {
            return Err(CodecError::ReadingKind {
                modality: modality.to_string(),
                field: field.name.clone(),
            })
        }
    }
    Ok(())
}

fn unsigned_in_width(modality: &str, field: &Field, value: u32) -> Result<u32> {
    let width = field.kind.width();
    let max = if width >= 4 { u32::MAX } else { (1u32 << (width * 8)) - 1 };
    if value > max {
        return Err(CodecError::FieldRange {
            modality: modality.to_string(),
            field: field.name.clone(),
            value,
            width,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_schema(name: &str) -> ModalitySchema {
        ModalitySchema::new(name, &[("value", FieldKind::F32)])
    }

    fn location_schema() -> ModalitySchema {
        ModalitySchema::new(
            "Location",
            &[("latitude", FieldKind::F64), ("longitude", FieldKind::F64)],
        )
    }

    #[test]
    fn decode_little_endian_temperature() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1700000000u32.to_le_bytes());
        payload.extend_from_slice(&23.5f32.to_le_bytes());

        let record = decode_record(&float_schema("Temperature"), ByteOrder::Little, &payload)
            .expect("well-formed payload should decode");

        assert_eq!(record.timestamp, 1700000000);
        assert_eq!(record.readings, vec![Reading::Float(23.5)]);
    }

    #[test]
    fn decode_big_endian_temperature() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&1700000000u32.to_be_bytes());
        payload.extend_from_slice(&23.5f32.to_be_bytes());

        let record = decode_record(&float_schema("Temperature"), ByteOrder::Big, &payload)
            .expect("well-formed payload should decode");

        assert_eq!(record.timestamp, 1700000000);
        assert_eq!(record.readings, vec![Reading::Float(23.5)]);
    }

    #[test]
    fn size_mismatch_reports_expected_and_actual() {
        let err = decode_record(&float_schema("Light"), ByteOrder::Little, &[0u8; 6]).unwrap_err();

        match err {
            CodecError::SizeMismatch {
                modality,
                expected,
                actual,
            } => {
                assert_eq!(modality, "Light");
                assert_eq!(expected, 8);
                assert_eq!(actual, 6);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn short_and_long_buffers_never_panic() {
        let schema = location_schema();
        for len in 0..64 {
            if len == schema.wire_size() {
                continue;
            }
            let payload = vec![0u8; len];
            assert!(matches!(
                decode_record(&schema, ByteOrder::Little, &payload),
                Err(CodecError::SizeMismatch { .. })
            ));
        }
    }

    #[test]
    fn timestamp_is_unsigned_past_2038() {
        // 2^31 + 1 — would read negative through a signed 32-bit lens.
        let ts: u32 = 0x8000_0001;
        let mut payload = Vec::new();
        payload.extend_from_slice(&ts.to_le_bytes());
        payload.extend_from_slice(&0.0f32.to_le_bytes());

        let record = decode_record(&float_schema("Noise"), ByteOrder::Little, &payload).unwrap();
        assert_eq!(record.timestamp, 0x8000_0001);
    }

    #[test]
    fn u16_field_is_zero_extended() {
        let schema = ModalitySchema::new("PM2d5", &[("value", FieldKind::U16)]);
        let mut payload = Vec::new();
        payload.extend_from_slice(&100u32.to_le_bytes());
        payload.extend_from_slice(&0xFFEEu16.to_le_bytes());

        let record = decode_record(&schema, ByteOrder::Little, &payload).unwrap();
        assert_eq!(record.readings, vec![Reading::Unsigned(0xFFEE)]);
    }

    #[test]
    fn u8_field_is_zero_extended() {
        let schema = ModalitySchema::new("BoxOpen", &[("state", FieldKind::U8)]);
        let payload = [10u32.to_le_bytes().as_slice(), &[0xF0]].concat();

        let record = decode_record(&schema, ByteOrder::Little, &payload).unwrap();
        assert_eq!(record.readings, vec![Reading::Unsigned(0xF0)]);
    }

    #[test]
    fn roundtrip_all_field_kinds_both_orders() {
        let cases: Vec<(ModalitySchema, Record)> = vec![
            (
                float_schema("Temperature"),
                Record::new(1700000000, vec![Reading::Float(23.5)]),
            ),
            (
                ModalitySchema::new("PM10", &[("value", FieldKind::U16)]),
                Record::new(42, vec![Reading::Unsigned(65535)]),
            ),
            (
                ModalitySchema::new("BoxOpen", &[("state", FieldKind::U8)]),
                Record::new(7, vec![Reading::Unsigned(1)]),
            ),
            (
                location_schema(),
                Record::new(
                    1400000000,
                    vec![Reading::Double(1.333023), Reading::Double(103.740858)],
                ),
            ),
            (
                ModalitySchema::new("Counter", &[("count", FieldKind::U32)]),
                Record::new(1, vec![Reading::Unsigned(u32::MAX)]),
            ),
        ];

        for (schema, record) in cases {
            for order in [ByteOrder::Little, ByteOrder::Big] {
                let wire = encode_record(&schema, order, &record).unwrap();
                assert_eq!(wire.len(), schema.wire_size());
                let decoded = decode_record(&schema, order, &wire).unwrap();
                assert_eq!(decoded, record, "roundtrip failed for {}", schema.name());
            }
        }
    }

    #[test]
    fn endianness_changes_the_wire_bytes() {
        let record = Record::new(1, vec![Reading::Float(23.5)]);
        let schema = float_schema("Light");

        let le = encode_record(&schema, ByteOrder::Little, &record).unwrap();
        let be = encode_record(&schema, ByteOrder::Big, &record).unwrap();

        assert_ne!(le, be);
        assert_eq!(le[..4], 1u32.to_le_bytes());
        assert_eq!(be[..4], 1u32.to_be_bytes());
    }

    #[test]
    fn encode_overflowing_u16_fails_with_field_range() {
        let schema = ModalitySchema::new("SO2", &[("value", FieldKind::U16)]);
        let record = Record::new(0, vec![Reading::Unsigned(70_000)]);

        let err = encode_record(&schema, ByteOrder::Little, &record).unwrap_err();
        assert!(matches!(
            err,
            CodecError::FieldRange { value: 70_000, width: 2, .. }
        ));
    }

    #[test]
    fn encode_overflowing_u8_fails_with_field_range() {
        let schema = ModalitySchema::new("BoxOpen", &[("state", FieldKind::U8)]);
        let record = Record::new(0, vec![Reading::Unsigned(256)]);

        let err = encode_record(&schema, ByteOrder::Little, &record).unwrap_err();
        assert!(matches!(err, CodecError::FieldRange { width: 1, .. }));
    }

    #[test]
    fn encode_wrong_reading_kind_fails() {
        let schema = float_schema("CO");
        let record = Record::new(0, vec![Reading::Unsigned(3)]);

        let err = encode_record(&schema, ByteOrder::Little, &record).unwrap_err();
        assert!(matches!(err, CodecError::ReadingKind { .. }));
    }

    #[test]
    fn encode_wrong_reading_count_fails() {
        let schema = location_schema();
        let record = Record::new(0, vec![Reading::Double(1.0)]);

        let err = encode_record(&schema, ByteOrder::Little, &record).unwrap_err();
        assert!(matches!(
            err,
            CodecError::ReadingCount { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn location_layout_decodes_in_declared_order() {
        let schema = location_schema();
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let record = Record::new(
                1600000000,
                vec![Reading::Double(1.336945), Reading::Double(103.741279)],
            );
            let wire = encode_record(&schema, order, &record).unwrap();
            assert_eq!(wire.len(), 20);

            let decoded = decode_record(&schema, order, &wire).unwrap();
            // Latitude first, longitude second, independent of byte order.
            assert_eq!(decoded.readings[0], Reading::Double(1.336945));
            assert_eq!(decoded.readings[1], Reading::Double(103.741279));
        }
    }
}
