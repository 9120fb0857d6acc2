//! Compositing a cropped source region under rotation, scale, and flip.
//!
//! The compositor extracts an axis-aligned region of the decoded source,
//! then renders it into a fresh output raster sized to the rotated, scaled
//! bounding box. Rendering uses inverse mapping: for each output pixel we
//! compute which source point lands there and interpolate.
//!
//! For rotation θ and signed scale (sx, sy) about the centers, the inverse is:
//! ```text
//! wx =  vx·cosθ + vy·sinθ          v = output point relative to output center
//! wy = -vx·sinθ + vy·cosθ
//! src_x = wx / sx + crop_w/2       sign of sx/sy implements the flip
//! src_y = wy / sy + crop_h/2
//! ```
//!
//! Output pixels whose source point falls outside the crop stay fully
//! transparent; PNG export keeps them transparent, JPEG export flattens them.

use thiserror::Error;

use crate::decode::{decode_image, DecodeError, Raster};
use crate::{SourceRect, TransformState};

/// Interpolation filter for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation - good for preview rendering.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation - good for export.
    Lanczos3,
}

/// Errors that can occur while compositing a crop.
#[derive(Debug, Error)]
pub enum CompositeError {
    /// The rasterized crop region does not lie within the source image
    #[error(
        "Crop region ({x}, {y}) {width}x{height} is outside the {image_width}x{image_height} source"
    )]
    CropOutOfBounds {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        image_width: u32,
        image_height: u32,
    },

    /// The crop region rounds to zero pixels
    #[error("Crop region rounds to zero pixels")]
    EmptyRegion,

    /// The source bytes could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Crop and transform an image supplied as raw container bytes.
///
/// Decodes `bytes`, extracts `region`, and re-applies `transform` the way
/// the canvas displayed it. See [`composite_raster`] for the raster-level
/// pipeline.
///
/// # Errors
///
/// `CompositeError::Decode` if the bytes cannot be decoded; otherwise the
/// same errors as [`composite_raster`].
pub fn composite(
    bytes: &[u8],
    region: &SourceRect,
    transform: &TransformState,
    filter: InterpolationFilter,
) -> Result<Raster, CompositeError> {
    let source = decode_image(bytes)?;
    composite_raster(&source, region, transform, filter)
}

/// Crop and transform an already-decoded raster.
///
/// Steps, in order:
/// 1. Round `region` to whole pixels and extract it. A region outside the
///    source is `CropOutOfBounds` (never clamped); one that rounds to zero
///    pixels is `EmptyRegion`.
/// 2. If `transform` is the identity, return the extracted crop unchanged -
///    this path is bit-exact, no resampling.
/// 3. Otherwise render the crop into an output raster sized by
///    [`rotated_bounds`], sampling with `filter`.
pub fn composite_raster(
    source: &Raster,
    region: &SourceRect,
    transform: &TransformState,
    filter: InterpolationFilter,
) -> Result<Raster, CompositeError> {
    let intermediate = extract_region(source, region)?;

    // Fast path: hand the crop back untouched
    if transform.is_identity() {
        return Ok(intermediate);
    }

    Ok(render_transformed(&intermediate, transform, filter))
}

/// Compute the output raster dimensions for a transformed crop.
///
/// The rotated bounding box of a `width`x`height` rectangle is scaled by the
/// transform's scale magnitudes and rounded up to whole pixels. Flip signs
/// never affect the result. There is no special casing of right angles, so
/// an exact 90 degree rotation may come out one pixel larger than the
/// swapped dimensions - `ceil` sees the float residue of `cos(pi/2)`.
///
/// # Example
///
/// ```
/// use gangsheet_core::transform::rotated_bounds;
/// use gangsheet_core::TransformState;
///
/// // Scaling alone is exact
/// let (w, h) = rotated_bounds(100, 50, &TransformState::new(0.0, 2.0, 3.0));
/// assert_eq!((w, h), (200, 150));
///
/// // A 45 degree rotation grows a square by sqrt(2)
/// let (w, h) = rotated_bounds(100, 100, &TransformState::new(45.0, 1.0, 1.0));
/// assert_eq!((w, h), (142, 142));
/// ```
pub fn rotated_bounds(width: u32, height: u32, transform: &TransformState) -> (u32, u32) {
    let theta = transform.rotation_radians();
    let cos = theta.cos().abs();
    let sin = theta.sin().abs();

    let w = width as f64;
    let h = height as f64;

    // Unsigned bounding box of the rotated extents:
    // rot_w = |w*cos| + |h*sin|
    // rot_h = |w*sin| + |h*cos|
    let rot_w = w * cos + h * sin;
    let rot_h = w * sin + h * cos;

    let out_w = (rot_w * transform.scale_x.abs()).ceil() as u32;
    let out_h = (rot_h * transform.scale_y.abs()).ceil() as u32;

    (out_w.max(1), out_h.max(1))
}

/// Extract the rounded `region` sub-rectangle into a fresh raster.
fn extract_region(source: &Raster, region: &SourceRect) -> Result<Raster, CompositeError> {
    // Non-finite rects cannot round to pixels; treat as empty
    if !region.x.is_finite()
        || !region.y.is_finite()
        || !region.width.is_finite()
        || !region.height.is_finite()
    {
        return Err(CompositeError::EmptyRegion);
    }

    let left = region.x.round() as i64;
    let top = region.y.round() as i64;
    let width = region.width.round() as i64;
    let height = region.height.round() as i64;

    if width < 1 || height < 1 {
        return Err(CompositeError::EmptyRegion);
    }

    let right = left.saturating_add(width);
    let bottom = top.saturating_add(height);
    if left < 0 || top < 0 || right > i64::from(source.width) || bottom > i64::from(source.height)
    {
        return Err(CompositeError::CropOutOfBounds {
            x: left,
            y: top,
            width,
            height,
            image_width: source.width,
            image_height: source.height,
        });
    }

    let out_w = width as u32;
    let out_h = height as u32;
    let src_stride = source.width as usize * 4;
    let row_bytes = out_w as usize * 4;

    // Copy row by row
    let mut pixels = vec![0u8; out_h as usize * row_bytes];
    for row in 0..out_h as usize {
        let src_start = (top as usize + row) * src_stride + left as usize * 4;
        let dst_start = row * row_bytes;
        pixels[dst_start..dst_start + row_bytes]
            .copy_from_slice(&source.pixels[src_start..src_start + row_bytes]);
    }

    Ok(Raster::new(out_w, out_h, pixels))
}

/// Render the crop into its rotated/scaled bounding box by inverse mapping.
fn render_transformed(
    source: &Raster,
    transform: &TransformState,
    filter: InterpolationFilter,
) -> Raster {
    let (dst_w, dst_h) = rotated_bounds(source.width, source.height, transform);

    let theta = transform.rotation_radians();
    let cos = theta.cos();
    let sin = theta.sin();

    let src_cx = source.width as f64 / 2.0;
    let src_cy = source.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; (dst_w * dst_h * 4) as usize];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            // Translate destination point to origin at center
            let vx = dst_x as f64 - dst_cx;
            let vy = dst_y as f64 - dst_cy;

            // Undo the rotation, then the signed scale (sign = flip)
            let wx = vx * cos + vy * sin;
            let wy = -vx * sin + vy * cos;
            let src_x = wx / transform.scale_x + src_cx;
            let src_y = wy / transform.scale_y + src_cy;

            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(source, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(source, src_x, src_y),
            };

            let dst_idx = ((dst_y * dst_w + dst_x) * 4) as usize;
            output[dst_idx..dst_idx + 4].copy_from_slice(&pixel);
        }
    }

    Raster::new(dst_w, dst_h, output)
}

/// Get a pixel as [f64; 4] from a raster at the given coordinates.
#[inline]
fn get_pixel_f64(image: &Raster, px: usize, py: usize) -> [f64; 4] {
    let idx = (py * image.width as usize + px) * 4;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
        image.pixels[idx + 3] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &Raster, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as i64, image.height as i64);

    // Check bounds - out-of-range samples are fully transparent
    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return [0, 0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    // Bilinear interpolation formula
    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Lanczos3 considers a 6x6 neighborhood of pixels, providing
/// higher quality results especially for sharp edges.
fn sample_lanczos3(image: &Raster, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as i64, image.height as i64);

    // Check bounds with kernel radius - fall back to bilinear near edges
    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    // Sample 6x6 neighborhood
    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            if px >= 0 && px < w && py >= 0 && py < h {
                let dx = x - px as f64;
                let dy = y - py as f64;
                let weight = lanczos_weight(dx, 3.0) * lanczos_weight(dy, 3.0);

                let pixel = get_pixel_f64(image, px as usize, py as usize);
                sum[0] += pixel[0] * weight;
                sum[1] += pixel[1] * weight;
                sum[2] += pixel[2] * weight;
                sum[3] += pixel[3] * weight;
                weight_sum += weight;
            }
        }
    }

    let mut result = [0u8; 4];
    if weight_sum > 0.0 {
        for i in 0..4 {
            result[i] = (sum[i] / weight_sum).clamp(0.0, 255.0).round() as u8;
        }
    }

    result
}

/// Lanczos kernel weight function.
///
/// The Lanczos kernel is defined as:
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
///
/// where sinc(x) = sin(πx) / (πx)
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    // L(x) = sinc(x) * sinc(x/a)
    // = [sin(πx)/(πx)] * [sin(πx/a)/(πx/a)]
    // = a * sin(πx) * sin(πx/a) / (π²x²)
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating raster dimensions (keep small for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=16, 1u32..=16)
    }

    /// Strategy for either interpolation filter.
    fn filter_strategy() -> impl Strategy<Value = InterpolationFilter> {
        prop_oneof![
            Just(InterpolationFilter::Bilinear),
            Just(InterpolationFilter::Lanczos3),
        ]
    }

    /// Strategy for nonzero scale factors.
    fn nonzero_scale_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![0.25f64..3.0, -3.0f64..-0.25]
    }

    fn opaque_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 31 + y * 7) % 256) as u8);
                pixels.push(((x * 13 + y * 17) % 256) as u8);
                pixels.push(((x + y * 29) % 256) as u8);
                pixels.push(255);
            }
        }
        Raster::new(width, height, pixels)
    }

    proptest! {
        /// Property: Compositing never panics and any Ok raster is well-formed.
        #[test]
        fn prop_composite_never_panics(
            (width, height) in dimensions_strategy(),
            rx in -20.0f64..40.0,
            ry in -20.0f64..40.0,
            rw in -5.0f64..40.0,
            rh in -5.0f64..40.0,
            rotation in -400.0f64..400.0,
            scale_x in nonzero_scale_strategy(),
            scale_y in nonzero_scale_strategy(),
            filter in filter_strategy(),
        ) {
            let src = opaque_raster(width, height);
            let result = composite_raster(
                &src,
                &SourceRect::new(rx, ry, rw, rh),
                &TransformState::new(rotation, scale_x, scale_y),
                filter,
            );

            if let Ok(out) = result {
                prop_assert!(out.width >= 1 && out.height >= 1);
                prop_assert_eq!(
                    out.pixels.len(),
                    (out.width as usize) * (out.height as usize) * 4
                );
            }
        }

        /// Property: An in-bounds integer region under the identity transform
        /// reproduces the source window exactly.
        #[test]
        fn prop_identity_crop_matches_source_window(
            (width, height) in (4u32..=12, 4u32..=12),
            seed in 0u32..1000,
        ) {
            let src = opaque_raster(width, height);

            let left = seed % width;
            let top = (seed / 7) % height;
            let w = 1 + seed % (width - left).max(1);
            let h = 1 + (seed / 3) % (height - top).max(1);
            prop_assume!(left + w <= width && top + h <= height);

            let out = composite_raster(
                &src,
                &SourceRect::new(f64::from(left), f64::from(top), f64::from(w), f64::from(h)),
                &TransformState::identity(),
                InterpolationFilter::Bilinear,
            )
            .unwrap();

            prop_assert_eq!((out.width, out.height), (w, h));

            // Spot-check the window corners
            let src_idx = ((top * width + left) * 4) as usize;
            prop_assert_eq!(&out.pixels[0..4], &src.pixels[src_idx..src_idx + 4]);
        }

        /// Property: A region with any part outside the source errors, and a
        /// fully inside region succeeds, under the identity transform.
        #[test]
        fn prop_bounds_check_is_exact(
            left in -5i64..=15,
            top in -5i64..=15,
            w in 1i64..=10,
            h in 1i64..=10,
        ) {
            let src = opaque_raster(10, 10);
            let result = composite_raster(
                &src,
                &SourceRect::new(left as f64, top as f64, w as f64, h as f64),
                &TransformState::identity(),
                InterpolationFilter::Bilinear,
            );

            let outside = left < 0 || top < 0 || left + w > 10 || top + h > 10;
            if outside {
                // Explicit message: prop_assert!'s default message stringifies
                // the condition into a format string, and `{ .. }` is invalid
                // there.
                prop_assert!(
                    matches!(result, Err(CompositeError::CropOutOfBounds { .. })),
                    "assertion failed: matches!(result, Err(CompositeError::CropOutOfBounds {{ .. }}))"
                );
            } else {
                prop_assert!(result.is_ok());
            }
        }

        /// Property: Transforming a fully opaque source yields only fully
        /// opaque or fully transparent pixels, never partial alpha.
        #[test]
        fn prop_opaque_source_gives_binary_alpha(
            (width, height) in (4u32..=10, 4u32..=10),
            rotation in -180.0f64..180.0,
            scale_x in nonzero_scale_strategy(),
            scale_y in nonzero_scale_strategy(),
            filter in filter_strategy(),
        ) {
            let src = opaque_raster(width, height);
            let out = composite_raster(
                &src,
                &SourceRect::new(0.0, 0.0, f64::from(width), f64::from(height)),
                &TransformState::new(rotation, scale_x, scale_y),
                filter,
            )
            .unwrap();

            for px in out.pixels.chunks_exact(4) {
                prop_assert!(px[3] == 0 || px[3] == 255, "alpha {}", px[3]);
            }
        }
    }
}
