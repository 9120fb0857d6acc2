//! Image decoding pipeline for Gangsheet.
//!
//! This module provides functionality for:
//! - Sniffing the container format (JPEG, PNG, TIFF) from raw bytes
//! - Decoding to RGBA pixel data
//! - Applying EXIF orientation so downstream geometry sees an upright image
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from Web Workers via WASM bindings.
//! All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use gangsheet_core::decode::{decode_image, Raster};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_image, detect_orientation};
pub use types::{DecodeError, Orientation, Raster};
