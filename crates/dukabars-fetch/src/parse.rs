//! Binary record parsing from decompressed bi5 data.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use dukabars_types::{Endian, FieldKind, Record, RecordFormat};

/// Parses records from decompressed bi5 data.
///
/// The buffer is sliced into `format.size()` byte chunks and each chunk is
/// decoded field by field. Trailing bytes that do not form a complete record
/// are ignored, so a 45-byte buffer with a 20-byte layout yields two records.
/// Records come out in buffer order.
pub fn parse_records<'a>(
    data: &'a [u8],
    format: &'a RecordFormat,
) -> impl Iterator<Item = Record> + 'a {
    data.chunks_exact(format.size())
        .map(move |chunk| parse_single_record(chunk, format))
}

/// Returns the number of complete records in `data_len` bytes.
#[must_use]
pub const fn record_count(data_len: usize, format: &RecordFormat) -> usize {
    format.record_count(data_len)
}

/// Returns the number of trailing bytes that will be discarded.
#[must_use]
pub const fn trailing_bytes(data_len: usize, format: &RecordFormat) -> usize {
    data_len % format.size()
}

#[inline]
fn parse_single_record(chunk: &[u8], format: &RecordFormat) -> Record {
    match format.endian() {
        Endian::Big => decode::<BigEndian>(chunk, format),
        Endian::Little => decode::<LittleEndian>(chunk, format),
    }
}

fn decode<B: ByteOrder>(chunk: &[u8], format: &RecordFormat) -> Record {
    let [time, open, high, low, close, volume] = format
        .fields()
        .map(|spec| read_field::<B>(&chunk[spec.range()], spec.kind));

    Record::new(
        time.as_int(),
        open.as_int(),
        high.as_int(),
        low.as_int(),
        close.as_int(),
        volume.as_float(),
    )
}

#[derive(Debug, Clone, Copy)]
enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    // Float kinds are rejected for integer columns when the format is built.
    fn as_int(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::Float(v) => v as i64,
        }
    }

    fn as_float(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

fn read_field<B: ByteOrder>(bytes: &[u8], kind: FieldKind) -> Value {
    match kind {
        FieldKind::I16 => Value::Int(i64::from(B::read_i16(bytes))),
        FieldKind::U16 => Value::Int(i64::from(B::read_u16(bytes))),
        FieldKind::I32 => Value::Int(i64::from(B::read_i32(bytes))),
        FieldKind::U32 => Value::Int(i64::from(B::read_u32(bytes))),
        FieldKind::F32 => Value::Float(f64::from(B::read_f32(bytes))),
        FieldKind::F64 => Value::Float(B::read_f64(bytes)),
    }
}
