//! JPEG encoding for export.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG carries no alpha channel, so RGBA input is flattened over black
//! before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::decode::Raster;

/// Encode an RGBA raster to JPEG bytes.
///
/// Quality is clamped to 1-100. The caller has already validated dimensions
/// and pixel buffer length.
pub(super) fn encode(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    // JPEG has no alpha channel; composite over black before encoding
    let rgb = flatten_alpha(&raster.pixels);

    // Create output buffer
    let mut buffer = Cursor::new(Vec::new());

    // Create JPEG encoder with specified quality
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    // Encode the image
    encoder
        .write_image(&rgb, raster.width, raster.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Flatten RGBA pixels onto a black background, dropping the alpha channel.
fn flatten_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let a = u16::from(px[3]);
        rgb.push((u16::from(px[0]) * a / 255) as u8);
        rgb.push((u16::from(px[1]) * a / 255) as u8);
        rgb.push((u16::from(px[2]) * a / 255) as u8);
    }
    rgb
}
