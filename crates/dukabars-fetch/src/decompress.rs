//! LZMA decompression for bi5 files.

use lzma_rs::{lzma_decompress, xz_decompress};
use std::io::{BufReader, Cursor};
use thiserror::Error;

/// Magic bytes opening every `.xz` stream.
pub const XZ_MAGIC: [u8; 6] = [0xFD, b'7', b'z', b'X', b'Z', 0x00];

/// Errors that can occur during decompression.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// LZMA decompression failed (corrupt or truncated stream).
    #[error("LZMA decompression failed: {0}")]
    Lzma(String),
}

/// LZMA container flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// `.xz` container.
    Xz,
    /// Legacy `.lzma` ("alone") stream, which is what bi5 files use.
    Lzma,
}

impl Container {
    /// Detects the container from the leading bytes.
    #[must_use]
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(&XZ_MAGIC) {
            Self::Xz
        } else {
            Self::Lzma
        }
    }
}

/// Decompresses LZMA-compressed bi5 data.
///
/// The container is detected from the input. Empty input yields an empty
/// buffer without attempting decompression; the provider serves zero-length
/// files for days without candles.
///
/// # Errors
///
/// Returns an error if the stream is corrupt or truncated.
pub fn decompress_bi5(compressed: &[u8]) -> Result<Vec<u8>, DecompressError> {
    if compressed.is_empty() {
        return Ok(Vec::new());
    }

    let mut decompressed = Vec::new();
    let mut reader = BufReader::new(Cursor::new(compressed));

    match Container::detect(compressed) {
        Container::Xz => xz_decompress(&mut reader, &mut decompressed),
        Container::Lzma => lzma_decompress(&mut reader, &mut decompressed),
    }
    .map_err(|e| DecompressError::Lzma(e.to_string()))?;

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> Vec<u8> {
        (0..480u32).flat_map(|i| i.to_be_bytes()).collect()
    }

    fn lzma(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        lzma_rs::lzma_compress(&mut Cursor::new(data), &mut out).unwrap();
        out
    }

    #[test]
    fn test_empty_input() {
        assert!(decompress_bi5(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_lzma() {
        let result = decompress_bi5(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecompressError::Lzma(_))));
    }

    #[test]
    fn test_lzma_stream() {
        let compressed = lzma(&payload());
        assert_eq!(Container::detect(&compressed), Container::Lzma);
        assert_eq!(decompress_bi5(&compressed).unwrap(), payload());
    }

    #[test]
    fn test_xz_stream() {
        let mut compressed = Vec::new();
        lzma_rs::xz_compress(&mut Cursor::new(payload()), &mut compressed).unwrap();

        assert_eq!(Container::detect(&compressed), Container::Xz);
        assert_eq!(decompress_bi5(&compressed).unwrap(), payload());
    }

    #[test]
    fn test_truncated_stream() {
        let compressed = lzma(&payload());
        let result = decompress_bi5(&compressed[..20]);
        assert!(matches!(result, Err(DecompressError::Lzma(_))));
    }
}
