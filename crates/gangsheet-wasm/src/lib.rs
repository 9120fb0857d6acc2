//! Gangsheet WASM - WebAssembly bindings for Gangsheet
//!
//! This crate provides WASM bindings to expose the gangsheet-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for raster data
//! - `decode` - Image decoding bindings (JPEG, PNG, TIFF + EXIF orientation)
//! - `density` - Pixel-density (DPI) metadata bindings
//! - `transform` - Crop resolution and compositing bindings
//! - `encode` - Image encoding bindings (PNG and JPEG export)
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, decode_resolution } from '@gangsheet/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! // Decode an uploaded file and read its declared density
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const raster = decode_image(bytes);
//! const info = decode_resolution(bytes);
//! console.log(`${raster.width}x${raster.height} at ${info.dpi ?? 'unknown'} DPI`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod density;
mod encode;
mod transform;
mod types;

// Re-export public types
pub use decode::{decode_image, detect_orientation};
pub use density::decode_resolution;
pub use encode::{encode_jpeg, encode_png};
pub use transform::{composite, composite_image, resolve_source_rect};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Simple function to verify WASM is working
#[wasm_bindgen]
pub fn greet(name: &str) -> String {
    format!("Hello, {}! Gangsheet WASM is ready.", name)
}
