//! Image decoding WASM bindings.
//!
//! This module exposes the gangsheet-core decoding functions to JavaScript,
//! turning uploaded container bytes into upright RGBA rasters the canvas can
//! display directly.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG, PNG, or TIFF bytes into an RGBA raster
//! - [`detect_orientation`] - Read the EXIF orientation code without decoding
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@gangsheet/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const raster = decode_image(bytes);
//! const imageData = new ImageData(
//!   new Uint8ClampedArray(raster.pixels()),
//!   raster.width,
//!   raster.height,
//! );
//! ```

use crate::types::JsRaster;
use gangsheet_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image from container bytes.
///
/// The container is sniffed from the bytes themselves - the file extension is
/// never consulted - and EXIF orientation correction is applied automatically
/// so the raster comes back upright.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array` (JPEG, PNG, or TIFF)
///
/// # Returns
///
/// A `JsRaster` containing RGBA pixel data, or an error if decoding fails.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes match none of the supported container signatures
/// - The container is recognized but corrupted or truncated
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const raster = decode_image(bytes);
/// console.log(`Decoded ${raster.width}x${raster.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation code from image bytes.
///
/// Performs a metadata-only read, no pixel decoding. Useful when the UI wants
/// to know ahead of a full decode whether an upload arrives sideways.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes to inspect
///
/// # Returns
///
/// The EXIF orientation code (1-8), where 1 means upright. Files without
/// EXIF data, and files that are not images at all, report 1.
///
/// # Example
///
/// ```typescript
/// const code = detect_orientation(bytes);
/// if (code !== 1) {
///   console.log('decode_image will auto-correct this upload');
/// }
/// ```
#[wasm_bindgen]
pub fn detect_orientation(bytes: &[u8]) -> u8 {
    decode::detect_orientation(bytes) as u8
}
