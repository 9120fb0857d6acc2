//! PNG encoding for export.
//!
//! PNG is the lossless path: RGBA pixels are written as-is, so regions a
//! rotated crop leaves uncovered stay transparent in the exported file.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::decode::Raster;

/// Encode an RGBA raster to PNG bytes.
///
/// The caller has already validated dimensions and pixel buffer length.
pub(super) fn encode(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());

    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(
            &raster.pixels,
            raster.width,
            raster.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
