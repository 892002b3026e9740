//! Synthetic bi5 fixtures for the dukabars benchmarks.

use std::io::Cursor;

/// Minutes in a trading day of one-minute candles.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Builds a raw (uncompressed) day of `>IIIIIf` candles, one per minute.
#[must_use]
pub fn raw_day(minutes: u32) -> Vec<u8> {
    let mut raw = Vec::with_capacity(minutes as usize * 24);
    for minute in 0..minutes {
        let base = 108_000 + (minute % 97);
        raw.extend_from_slice(&(minute * 60).to_be_bytes());
        for price in [base, base + 12, base - 9, base + 3] {
            raw.extend_from_slice(&price.to_be_bytes());
        }
        raw.extend_from_slice(&(minute as f32 * 0.5).to_be_bytes());
    }
    raw
}

/// Builds an LZMA-compressed day, as served by the datafeed.
///
/// # Panics
///
/// Panics if compression into memory fails, which only happens on allocation
/// failure.
#[must_use]
pub fn compressed_day(minutes: u32) -> Vec<u8> {
    let mut compressed = Vec::new();
    lzma_rs::lzma_compress(&mut Cursor::new(raw_day(minutes)), &mut compressed)
        .expect("in-memory compression");
    compressed
}

#[cfg(test)]
mod tests {
    use super::*;
    use dukabars_types::RecordFormat;

    #[test]
    fn test_raw_day_size() {
        let format = RecordFormat::candles();
        assert_eq!(raw_day(MINUTES_PER_DAY).len(), MINUTES_PER_DAY as usize * format.size());
    }
}
