//! WASM bindings for crop resolution and compositing.
//!
//! This module provides JavaScript bindings for the two halves of the crop
//! workflow: mapping the crop rectangle the user drags in display space back
//! to source pixels, and compositing the confirmed crop with the object's
//! transform re-applied.
//!
//! Structured inputs (rectangles, transforms, points) cross the boundary as
//! plain JSON objects via serde_wasm_bindgen, matching the shapes the editor
//! already keeps in its store.

use crate::types::JsRaster;
use gangsheet_core::transform::{
    composite as core_composite, composite_raster as core_composite_raster,
    resolve_source_rect as core_resolve, InterpolationFilter,
};
use gangsheet_core::{DisplayRect, Point, Size, SourceRect, TransformState};
use wasm_bindgen::prelude::*;

/// Map a crop rectangle drawn in display space back into source pixels.
///
/// The returned rectangle is axis-aligned in the source image's own
/// untransformed pixel space, normalized so width and height are
/// non-negative whatever direction the user dragged in.
///
/// # Arguments
///
/// * `display_rect` - `{ x, y, width, height }` in display coordinates
/// * `transform` - `{ rotation_degrees, scale_x, scale_y }` of the object
/// * `center` - `{ x, y }`, the object's center in display coordinates
/// * `size` - `{ width, height }`, the object's untransformed pixel extent
///
/// # Returns
///
/// `{ x, y, width, height }` in source pixel coordinates, or an error if an
/// input fails to deserialize or the transform has a zero scale component.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const region = resolve_source_rect(
///   { x: 60, y: 70, width: 80, height: 60 },
///   { rotation_degrees: 90, scale_x: 1, scale_y: 1 },
///   { x: 100, y: 100 },
///   { width: 80, height: 60 },
/// );
/// ```
#[wasm_bindgen]
pub fn resolve_source_rect(
    display_rect: JsValue,
    transform: JsValue,
    center: JsValue,
    size: JsValue,
) -> Result<JsValue, JsValue> {
    let display_rect: DisplayRect =
        serde_wasm_bindgen::from_value(display_rect).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let transform: TransformState =
        serde_wasm_bindgen::from_value(transform).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let center: Point =
        serde_wasm_bindgen::from_value(center).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let size: Size =
        serde_wasm_bindgen::from_value(size).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let region = core_resolve(display_rect, &transform, center, size)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&region).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop and composite an image supplied as raw container bytes.
///
/// Decodes the bytes (JPEG, PNG, or TIFF), extracts `region`, and renders it
/// with `transform` re-applied. Pixels the rotated crop does not cover stay
/// fully transparent.
///
/// # Arguments
///
/// * `bytes` - The raw file bytes as a `Uint8Array`
/// * `region` - `{ x, y, width, height }` in source pixels, typically the
///   value returned by [`resolve_source_rect`]
/// * `transform` - `{ rotation_degrees, scale_x, scale_y }` of the object
/// * `use_lanczos` - Use high-quality Lanczos3 filter (slower), otherwise
///   bilinear
///
/// # Returns
///
/// A new `JsRaster` with the composited content, or an error if decoding
/// fails or the region misses the image.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Preview composite (fast, bilinear)
/// const preview = composite(bytes, region, transform, false);
///
/// // Export composite (high quality, lanczos)
/// const exported = composite(bytes, region, transform, true);
/// ```
#[wasm_bindgen]
pub fn composite(
    bytes: &[u8],
    region: JsValue,
    transform: JsValue,
    use_lanczos: bool,
) -> Result<JsRaster, JsValue> {
    let region: SourceRect =
        serde_wasm_bindgen::from_value(region).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let transform: TransformState =
        serde_wasm_bindgen::from_value(transform).map_err(|e| JsValue::from_str(&e.to_string()))?;

    core_composite(bytes, &region, &transform, pick_filter(use_lanczos))
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Crop and composite an already-decoded raster.
///
/// Same pipeline as [`composite`] minus the decode step. Use this when the
/// editor already holds the decoded raster and re-runs the composite as the
/// user adjusts the crop.
///
/// # Arguments
///
/// * `image` - The decoded source raster
/// * `region` - `{ x, y, width, height }` in source pixels
/// * `transform` - `{ rotation_degrees, scale_x, scale_y }` of the object
/// * `use_lanczos` - Use high-quality Lanczos3 filter (slower), otherwise
///   bilinear
#[wasm_bindgen]
pub fn composite_image(
    image: &JsRaster,
    region: JsValue,
    transform: JsValue,
    use_lanczos: bool,
) -> Result<JsRaster, JsValue> {
    let region: SourceRect =
        serde_wasm_bindgen::from_value(region).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let transform: TransformState =
        serde_wasm_bindgen::from_value(transform).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let source = image.to_raster();
    core_composite_raster(&source, &region, &transform, pick_filter(use_lanczos))
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn pick_filter(use_lanczos: bool) -> InterpolationFilter {
    if use_lanczos {
        InterpolationFilter::Lanczos3
    } else {
        InterpolationFilter::Bilinear
    }
}


/// WASM-specific tests that require JsValue and serde_wasm_bindgen.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn opaque_raster(width: u32, height: u32) -> JsRaster {
        JsRaster::new(width, height, vec![128u8; (width * height * 4) as usize])
    }

    #[wasm_bindgen_test]
    fn test_resolve_source_rect_identity() {
        let display =
            serde_wasm_bindgen::to_value(&DisplayRect::new(60.0, 70.0, 80.0, 60.0)).unwrap();
        let transform = serde_wasm_bindgen::to_value(&TransformState::identity()).unwrap();
        let center = serde_wasm_bindgen::to_value(&Point::new(100.0, 100.0)).unwrap();
        let size = serde_wasm_bindgen::to_value(&Size::new(80.0, 60.0)).unwrap();

        let result = resolve_source_rect(display, transform, center, size).unwrap();
        let region: SourceRect = serde_wasm_bindgen::from_value(result).unwrap();

        assert!((region.x - 0.0).abs() < 1e-9);
        assert!((region.y - 0.0).abs() < 1e-9);
        assert!((region.width - 80.0).abs() < 1e-9);
        assert!((region.height - 60.0).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn test_resolve_source_rect_zero_scale_errors() {
        let display =
            serde_wasm_bindgen::to_value(&DisplayRect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let transform =
            serde_wasm_bindgen::to_value(&TransformState::new(0.0, 0.0, 1.0)).unwrap();
        let center = serde_wasm_bindgen::to_value(&Point::new(5.0, 5.0)).unwrap();
        let size = serde_wasm_bindgen::to_value(&Size::new(10.0, 10.0)).unwrap();

        let result = resolve_source_rect(display, transform, center, size);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_resolve_rejects_partial_transform() {
        // Build a transform object missing its scale fields
        let partial = js_sys::Object::new();
        js_sys::Reflect::set(
            &partial,
            &"rotation_degrees".into(),
            &JsValue::from(45.0),
        )
        .unwrap();

        let display =
            serde_wasm_bindgen::to_value(&DisplayRect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let center = serde_wasm_bindgen::to_value(&Point::new(5.0, 5.0)).unwrap();
        let size = serde_wasm_bindgen::to_value(&Size::new(10.0, 10.0)).unwrap();

        let result = resolve_source_rect(display, partial.into(), center, size);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_composite_image_identity() {
        let img = opaque_raster(8, 8);
        let region = serde_wasm_bindgen::to_value(&SourceRect::new(0.0, 0.0, 8.0, 8.0)).unwrap();
        let transform = serde_wasm_bindgen::to_value(&TransformState::identity()).unwrap();

        let out = composite_image(&img, region, transform, false).unwrap();
        assert_eq!(out.width(), 8);
        assert_eq!(out.height(), 8);
        assert_eq!(out.pixels(), img.pixels());
    }

    #[wasm_bindgen_test]
    fn test_composite_image_rotation_changes_dimensions() {
        let img = opaque_raster(8, 4);
        let region = serde_wasm_bindgen::to_value(&SourceRect::new(0.0, 0.0, 8.0, 4.0)).unwrap();
        let transform =
            serde_wasm_bindgen::to_value(&TransformState::new(90.0, 1.0, 1.0)).unwrap();

        let out = composite_image(&img, region, transform, false).unwrap();
        assert!(out.width() < out.height());
    }

    #[wasm_bindgen_test]
    fn test_composite_image_out_of_bounds_region_errors() {
        let img = opaque_raster(4, 4);
        let region =
            serde_wasm_bindgen::to_value(&SourceRect::new(-2.0, 0.0, 4.0, 4.0)).unwrap();
        let transform = serde_wasm_bindgen::to_value(&TransformState::identity()).unwrap();

        let result = composite_image(&img, region, transform, false);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_composite_undecodable_bytes_errors() {
        let region = serde_wasm_bindgen::to_value(&SourceRect::new(0.0, 0.0, 2.0, 2.0)).unwrap();
        let transform = serde_wasm_bindgen::to_value(&TransformState::identity()).unwrap();

        let result = composite(&[0, 1, 2, 3], region, transform, false);
        assert!(result.is_err());
    }
}
