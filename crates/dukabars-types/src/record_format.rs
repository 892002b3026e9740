//! Fixed-width binary record layout descriptors.
//!
//! A [`RecordFormat`] tells the parser how one candle is packed: the byte
//! order and the kind of each of the six fields, in the order
//! time offset, open, high, low, close, volume. Descriptors can be built
//! directly or parsed from a struct-style layout string such as `">IIIIIf"`,
//! `">5i1f"` or `"!6i"`.
//!
//! Supported codes (standard sizes, no alignment):
//!
//! | code | kind  | bytes |
//! |------|-------|-------|
//! | `h`  | i16   | 2     |
//! | `H`  | u16   | 2     |
//! | `i`, `l` | i32 | 4   |
//! | `I`, `L` | u32 | 4   |
//! | `f`  | f32   | 4     |
//! | `d`  | f64   | 8     |
//! | `x`  | pad   | 1     |
//!
//! A leading `>` or `!` selects big-endian, `<` little-endian, and `=`, `@`
//! or no prefix the host byte order. Sizes are always the standard ones in
//! the table above and fields are never aligned, even with `@` or no prefix.
//! This differs from Python's `struct` native mode, where e.g. `l` is 8 bytes
//! on 64-bit Linux and fields are padded to their natural alignment.

use std::str::FromStr;
use thiserror::Error;

/// Number of fields every record carries.
const FIELD_COUNT: usize = 6;

/// Byte order of a record's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    /// Most significant byte first (network order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

impl Endian {
    /// Returns the byte order of the host.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    const fn prefix(self) -> char {
        match self {
            Self::Big => '>',
            Self::Little => '<',
        }
    }
}

/// Kind of a single packed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed 16-bit integer.
    I16,
    /// Unsigned 16-bit integer.
    U16,
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// 32-bit IEEE float.
    F32,
    /// 64-bit IEEE float.
    F64,
}

impl FieldKind {
    /// Returns the packed width in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Returns true for integer kinds.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        !matches!(self, Self::F32 | Self::F64)
    }

    /// Returns the layout code for this kind.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::I16 => 'h',
            Self::U16 => 'H',
            Self::I32 => 'i',
            Self::U32 => 'I',
            Self::F32 => 'f',
            Self::F64 => 'd',
        }
    }

    const fn from_code(code: char) -> Option<Self> {
        match code {
            'h' => Some(Self::I16),
            'H' => Some(Self::U16),
            'i' | 'l' => Some(Self::I32),
            'I' | 'L' => Some(Self::U32),
            'f' => Some(Self::F32),
            'd' => Some(Self::F64),
            _ => None,
        }
    }
}

/// A field's kind together with its byte offset inside the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    /// Field kind.
    pub kind: FieldKind,
    /// Byte offset from the start of the record.
    pub offset: usize,
}

impl FieldSpec {
    /// Returns the byte range this field occupies within a record.
    #[must_use]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.kind.width()
    }
}

/// Errors produced while building a record format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordFormatError {
    /// Unknown layout code.
    #[error("Unknown layout code '{0}'")]
    UnknownCode(char),

    /// A repeat count was not followed by a code.
    #[error("Repeat count at end of layout '{0}'")]
    DanglingCount(String),

    /// Wrong number of fields.
    #[error("Record layout must have exactly 6 fields, got {0}")]
    FieldCount(usize),

    /// Time or price field declared with a floating-point kind.
    #[error("Field '{name}' must be an integer kind, got '{code}'")]
    NonIntegerField {
        /// Name of the offending field.
        name: &'static str,
        /// Layout code that was supplied.
        code: char,
    },

    /// A repeat count or the total record size does not fit in `usize`.
    #[error("Record layout '{0}' is too large")]
    TooLarge(String),
}

/// Fixed-size packed binary layout of one candle record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordFormat {
    endian: Endian,
    fields: [FieldSpec; FIELD_COUNT],
    size: usize,
}

impl RecordFormat {
    /// Column names, in field order.
    pub const FIELD_NAMES: [&'static str; FIELD_COUNT] =
        ["time", "open", "high", "low", "close", "volume"];

    /// Creates a packed format from six field kinds.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the first five fields is not an integer kind.
    pub fn new(endian: Endian, kinds: [FieldKind; FIELD_COUNT]) -> Result<Self, RecordFormatError> {
        let mut offset = 0;
        let fields = kinds.map(|kind| {
            let spec = FieldSpec { kind, offset };
            offset += kind.width();
            spec
        });
        Self::from_fields(endian, fields.to_vec(), offset)
    }

    /// Big-endian `>IIIIIf` layout used by the minute-candle `bi5` files.
    #[must_use]
    pub fn candles() -> Self {
        let kinds = [
            FieldKind::U32,
            FieldKind::U32,
            FieldKind::U32,
            FieldKind::U32,
            FieldKind::U32,
            FieldKind::F32,
        ];
        let mut offset = 0;
        let fields = kinds.map(|kind| {
            let spec = FieldSpec { kind, offset };
            offset += kind.width();
            spec
        });
        Self {
            endian: Endian::Big,
            fields,
            size: offset,
        }
    }

    fn from_fields(
        endian: Endian,
        fields: Vec<FieldSpec>,
        size: usize,
    ) -> Result<Self, RecordFormatError> {
        let fields: [FieldSpec; FIELD_COUNT] = fields
            .try_into()
            .map_err(|f: Vec<FieldSpec>| RecordFormatError::FieldCount(f.len()))?;

        for (name, spec) in Self::FIELD_NAMES.iter().zip(&fields).take(FIELD_COUNT - 1) {
            if !spec.kind.is_integer() {
                return Err(RecordFormatError::NonIntegerField {
                    name,
                    code: spec.kind.code(),
                });
            }
        }

        Ok(Self {
            endian,
            fields,
            size,
        })
    }

    /// Returns the byte order.
    #[must_use]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Returns the six field specs in order.
    #[must_use]
    pub const fn fields(&self) -> &[FieldSpec; FIELD_COUNT] {
        &self.fields
    }

    /// Returns the size of one record in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns how many complete records fit in `len` bytes.
    #[must_use]
    pub const fn record_count(&self, len: usize) -> usize {
        len / self.size
    }
}

impl Default for RecordFormat {
    fn default() -> Self {
        Self::candles()
    }
}

impl FromStr for RecordFormat {
    type Err = RecordFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (endian, body) = match s.chars().next() {
            Some('>' | '!') => (Endian::Big, &s[1..]),
            Some('<') => (Endian::Little, &s[1..]),
            Some('=' | '@') => (Endian::native(), &s[1..]),
            _ => (Endian::native(), s),
        };

        let mut fields = Vec::with_capacity(FIELD_COUNT);
        let mut offset = 0usize;
        let mut count: Option<usize> = None;

        let too_large = || RecordFormatError::TooLarge(s.to_string());

        for c in body.chars() {
            if let Some(digit) = c.to_digit(10) {
                let next = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit as usize))
                    .ok_or_else(too_large)?;
                count = Some(next);
                continue;
            }
            if c.is_whitespace() {
                continue;
            }

            let repeat = count.take().unwrap_or(1);
            if c == 'x' {
                offset = offset.checked_add(repeat).ok_or_else(too_large)?;
                continue;
            }

            let kind = FieldKind::from_code(c).ok_or(RecordFormatError::UnknownCode(c))?;
            let total = fields.len().saturating_add(repeat);
            if total > FIELD_COUNT {
                return Err(RecordFormatError::FieldCount(total));
            }
            for _ in 0..repeat {
                fields.push(FieldSpec { kind, offset });
                offset = offset.checked_add(kind.width()).ok_or_else(too_large)?;
            }
        }

        if count.is_some() {
            return Err(RecordFormatError::DanglingCount(s.to_string()));
        }

        Self::from_fields(endian, fields, offset)
    }
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.endian.prefix())?;
        let mut cursor = 0;
        for spec in &self.fields {
            if spec.offset > cursor {
                write!(f, "{}x", spec.offset - cursor)?;
            }
            write!(f, "{}", spec.kind.code())?;
            cursor = spec.offset + spec.kind.width();
        }
        if self.size > cursor {
            write!(f, "{}x", self.size - cursor)?;
        }
        Ok(())
    }
}
