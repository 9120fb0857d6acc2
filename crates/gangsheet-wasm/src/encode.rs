//! Image encoding WASM bindings.
//!
//! This module exposes the gangsheet-core encoders to JavaScript for the
//! export workflow: PNG when transparency has to survive, JPEG when a smaller
//! opaque file is wanted.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode a raster to PNG bytes (lossless, keeps alpha)
//! - [`encode_jpeg`] - Encode a raster to JPEG bytes (lossy, flattens alpha)
//!
//! # Example
//!
//! ```typescript
//! import { composite, encode_png } from '@gangsheet/wasm';
//!
//! const raster = composite(bytes, region, transform, true);
//! const png = encode_png(raster);
//!
//! const writable = await fileHandle.createWritable();
//! await writable.write(new Blob([png], { type: 'image/png' }));
//! await writable.close();
//! ```

use crate::types::JsRaster;
use gangsheet_core::encode::{encode_raster, OutputFormat};
use wasm_bindgen::prelude::*;

/// Encode a raster to PNG bytes.
///
/// PNG is lossless and preserves the alpha channel, so the transparent
/// pixels a rotated composite leaves around its content stay transparent in
/// the exported file.
///
/// # Arguments
///
/// * `image` - The raster to encode
///
/// # Returns
///
/// A `Uint8Array` containing the PNG-encoded bytes, or an error if encoding
/// fails.
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster();
    encode_raster(&raster, OutputFormat::Png).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a raster to JPEG bytes.
///
/// JPEG has no alpha channel: transparent and semi-transparent pixels are
/// flattened onto black before encoding.
///
/// # Arguments
///
/// * `image` - The raster to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality,
///   recommended: 90); values outside the range are clamped
///
/// # Returns
///
/// A `Uint8Array` containing the JPEG-encoded bytes, or an error if encoding
/// fails.
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for print-ready sheets
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for previews
/// * Below 60: Low quality, visible artifacts
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster();
    encode_raster(&raster, OutputFormat::Jpeg { quality })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
