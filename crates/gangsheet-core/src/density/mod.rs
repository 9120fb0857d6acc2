//! Pixel-density (DPI) metadata extraction.
//!
//! This module reads the density declaration straight out of the container
//! bytes of the three formats the uploader accepts - JPEG (JFIF APP0 segment),
//! PNG (pHYs chunk), and TIFF (XResolution tag) - without decoding any pixel
//! data.
//!
//! Absence of density metadata is an everyday outcome rather than a fault, so
//! the whole module is panic-free and error-free by construction: malformed,
//! truncated, or unrecognized input simply yields an unknown density.

mod jpeg;
mod png;
mod tiff;

use serde::{Deserialize, Serialize};

/// Container format detected from a buffer's magic signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Tiff,
    /// The signature matched none of the supported containers.
    Unsupported,
}

/// Density metadata for an uploaded image.
///
/// Produced once per upload and never mutated. `dpi: None` means the
/// container carried no usable density declaration, which is common.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionInfo {
    /// Declared density in dots per inch, when the container carries one.
    pub dpi: Option<u32>,
    /// Which container signature the buffer matched.
    pub format: SourceFormat,
}

/// Read the declared pixel density out of raw image bytes.
///
/// Dispatches on the magic signature (JPEG, then PNG, then TIFF) and walks
/// the matching container's metadata structures. Never fails: a buffer this
/// function cannot make sense of comes back with `dpi: None`.
pub fn decode_resolution(bytes: &[u8]) -> ResolutionInfo {
    if jpeg::matches(bytes) {
        ResolutionInfo {
            dpi: jpeg::parse_dpi(bytes),
            format: SourceFormat::Jpeg,
        }
    } else if png::matches(bytes) {
        ResolutionInfo {
            dpi: png::parse_dpi(bytes),
            format: SourceFormat::Png,
        }
    } else if tiff::matches(bytes) {
        ResolutionInfo {
            dpi: tiff::parse_dpi(bytes),
            format: SourceFormat::Tiff,
        }
    } else {
        ResolutionInfo {
            dpi: None,
            format: SourceFormat::Unsupported,
        }
    }
}

// Bounds-checked big-endian reads shared by the container walkers. A read
// past the end of the buffer is an ordinary "no metadata" outcome here, so
// these return None instead of erroring.

fn read_u8(bytes: &[u8], offset: usize) -> Option<u8> {
    bytes.get(offset).copied()
}

fn read_u16_be(bytes: &[u8], offset: usize) -> Option<u16> {
    let raw: [u8; 2] = bytes.get(offset..offset.checked_add(2)?)?.try_into().ok()?;
    Some(u16::from_be_bytes(raw))
}

fn read_u32_be(bytes: &[u8], offset: usize) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
    Some(u32::from_be_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_is_unsupported() {
        let info = decode_resolution(&[]);
        assert_eq!(info.format, SourceFormat::Unsupported);
        assert_eq!(info.dpi, None);
    }

    #[test]
    fn test_unrecognized_signature_is_unsupported() {
        // GIF signature matches none of the supported containers
        let info = decode_resolution(b"GIF89a\x00\x00");
        assert_eq!(info.format, SourceFormat::Unsupported);
        assert_eq!(info.dpi, None);
    }

    #[test]
    fn test_bare_jpeg_signature_classifies_without_density() {
        let info = decode_resolution(&[0xFF, 0xD8]);
        assert_eq!(info.format, SourceFormat::Jpeg);
        assert_eq!(info.dpi, None);
    }

    #[test]
    fn test_bare_png_signature_classifies_without_density() {
        let info = decode_resolution(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        assert_eq!(info.format, SourceFormat::Png);
        assert_eq!(info.dpi, None);
    }

    #[test]
    fn test_bare_tiff_signature_classifies_without_density() {
        let info = decode_resolution(&[0x49, 0x49, 0x2A, 0x00]);
        assert_eq!(info.format, SourceFormat::Tiff);
        assert_eq!(info.dpi, None);
    }

    #[test]
    fn test_jpeg_signature_takes_priority() {
        // 0xFF 0xD8 wins even though 0x49 bytes follow
        let info = decode_resolution(&[0xFF, 0xD8, 0x49, 0x49]);
        assert_eq!(info.format, SourceFormat::Jpeg);
    }

    #[test]
    fn test_read_helpers_bounds() {
        let bytes = [0x12, 0x34, 0x56];
        assert_eq!(read_u8(&bytes, 2), Some(0x56));
        assert_eq!(read_u8(&bytes, 3), None);
        assert_eq!(read_u16_be(&bytes, 1), Some(0x3456));
        assert_eq!(read_u16_be(&bytes, 2), None);
        assert_eq!(read_u32_be(&bytes, 0), None);
        assert_eq!(read_u32_be(&bytes, usize::MAX), None);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Any byte soup decodes to a value, never a panic.
        #[test]
        fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..=512)) {
            let _ = decode_resolution(&bytes);
        }

        /// Property: A JPEG signature always classifies as JPEG, whatever follows.
        #[test]
        fn prop_jpeg_signature_classified(tail in prop::collection::vec(any::<u8>(), 0..=128)) {
            let mut bytes = vec![0xFF, 0xD8];
            bytes.extend(tail);
            prop_assert_eq!(decode_resolution(&bytes).format, SourceFormat::Jpeg);
        }

        /// Property: Buffers that match no signature never report a density.
        #[test]
        fn prop_unknown_signature_yields_unknown(tail in prop::collection::vec(any::<u8>(), 0..=128)) {
            // A leading zero byte rules out all three magic signatures
            let mut bytes = vec![0x00];
            bytes.extend(tail);
            let info = decode_resolution(&bytes);
            prop_assert_eq!(info.format, SourceFormat::Unsupported);
            prop_assert_eq!(info.dpi, None);
        }
    }
}
