//! Image encoding pipeline for Gangsheet.
//!
//! This module provides functionality for:
//! - Encoding rasters to PNG (lossless, alpha preserved)
//! - Encoding rasters to JPEG with configurable quality
//!
//! # Architecture
//!
//! The encoding pipeline is designed to be used from Web Workers via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use gangsheet_core::decode::Raster;
//! use gangsheet_core::encode::{encode_raster, OutputFormat};
//!
//! let raster = Raster::new(100, 100, vec![128u8; 100 * 100 * 4]);
//! let jpeg_bytes = encode_raster(&raster, OutputFormat::Jpeg { quality: 90 }).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::Raster;

/// Errors that can occur during image encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output container format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless PNG. Transparent output pixels stay transparent.
    Png,
    /// JPEG with the given quality (1-100). Alpha is flattened over black.
    Jpeg { quality: u8 },
}

/// Encode a raster to the requested container format.
///
/// # Arguments
///
/// * `raster` - RGBA raster to encode
/// * `format` - Target container format
///
/// # Returns
///
/// Encoded file bytes on success, or an error if the raster is malformed or
/// encoding fails.
///
/// # Quality Guidelines (JPEG)
///
/// * 90-100: High quality, suitable for print-ready exports
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for web previews
/// * Below 60: Low quality, visible artifacts
pub fn encode_raster(raster: &Raster, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    // Validate dimensions
    if raster.width == 0 || raster.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: raster.width,
            height: raster.height,
        });
    }

    // Validate pixel data length
    let expected_len = (raster.width as usize) * (raster.height as usize) * 4;
    if raster.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: raster.pixels.len(),
        });
    }

    match format {
        OutputFormat::Png => png::encode(raster),
        OutputFormat::Jpeg { quality } => jpeg::encode(raster, quality),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_raster(width: u32, height: u32, rgba: [u8; 4]) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgba);
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_encode_png_magic_bytes() {
        let raster = solid_raster(4, 4, [10, 20, 30, 255]);
        let bytes = encode_raster(&raster, OutputFormat::Png).unwrap();
        assert_eq!(&bytes[0..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_encode_jpeg_magic_bytes() {
        let raster = solid_raster(4, 4, [10, 20, 30, 255]);
        let bytes = encode_raster(&raster, OutputFormat::Jpeg { quality: 90 }).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_zero_width() {
        let raster = Raster {
            width: 0,
            height: 10,
            pixels: vec![],
        };
        let result = encode_raster(&raster, OutputFormat::Png);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_zero_height() {
        let raster = Raster {
            width: 10,
            height: 0,
            pixels: vec![],
        };
        let result = encode_raster(&raster, OutputFormat::Jpeg { quality: 90 });
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_pixel_length_mismatch() {
        // Bypass Raster::new so the buffer really is one row short
        let raster = Raster {
            width: 10,
            height: 10,
            pixels: vec![0u8; 9 * 10 * 4],
        };
        let result = encode_raster(&raster, OutputFormat::Png);
        match result {
            Err(EncodeError::InvalidPixelData { expected, actual }) => {
                assert_eq!(expected, 400);
                assert_eq!(actual, 360);
            }
            other => panic!("Expected InvalidPixelData, got: {:?}", other),
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
