//! Pixel-density WASM bindings.
//!
//! The uploader calls [`decode_resolution`] once per file to translate pixel
//! dimensions into a physical print size. Density metadata is missing from
//! uploads all the time, so the binding keeps the core contract: it never
//! throws, and unknown density is an ordinary value.
//!
//! # Example
//!
//! ```typescript
//! import { decode_resolution } from '@gangsheet/wasm';
//!
//! const info = decode_resolution(bytes);
//! // info: { dpi?: number, format: 'Jpeg' | 'Png' | 'Tiff' | 'Unsupported' }
//! const dpi = info.dpi ?? 300; // fall back to the shop default
//! console.log(`${width / dpi}in x ${height / dpi}in`);
//! ```

use wasm_bindgen::prelude::*;

/// Read the declared pixel density (DPI) out of raw image bytes.
///
/// Dispatches on the container signature (JPEG JFIF segment, PNG pHYs chunk,
/// TIFF resolution tags) without decoding any pixel data, so it is cheap
/// enough to run on every upload.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
///
/// # Returns
///
/// An object with a `format` string and an optional `dpi` number. Never
/// throws: malformed, truncated, or unrecognized buffers come back with
/// `dpi` unset and `format: 'Unsupported'` where applicable.
#[wasm_bindgen]
pub fn decode_resolution(bytes: &[u8]) -> JsValue {
    let info = gangsheet_core::decode_resolution(bytes);
    serde_wasm_bindgen::to_value(&info).unwrap_or(JsValue::NULL)
}
