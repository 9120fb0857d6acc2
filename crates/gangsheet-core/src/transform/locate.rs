//! Mapping display-space crop rectangles back to source pixel space.
//!
//! The canvas renders an image object by translating to the object's center,
//! rotating, then scaling, all about the object's own midpoint. A crop
//! rectangle the user draws lives in that display space; the editor needs the
//! equivalent region of the untransformed source image. This module applies
//! the exact inverse: negate the rotation, divide by each signed scale
//! component, then shift by the half-extents so results land in
//! `[0, size]` pixel coordinates.
//!
//! Only the rectangle's top-left and bottom-right corners are mapped; the
//! result is the normalized bounding box of those two points. For rotations
//! that are not multiples of 90 degrees this under-covers the true rotated
//! region - a known limitation of the two-corner mapping that callers rely
//! on, so it is preserved here rather than replaced with a four-corner hull.

use thiserror::Error;

use crate::{DisplayRect, Point, Size, SourceRect, TransformState};

/// Errors from display-to-source mapping.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A zero scale component cannot be inverted
    #[error("Degenerate transform: scale ({scale_x}, {scale_y}) has a zero component")]
    DegenerateScale { scale_x: f64, scale_y: f64 },
}

/// Map a display-space crop rectangle into the source image's pixel space.
///
/// # Arguments
///
/// * `display` - Crop rectangle in display (stage) coordinates
/// * `transform` - The object's current rotation/scale/flip
/// * `center` - The object's center position on the stage
/// * `size` - The object's untransformed pixel dimensions
///
/// # Returns
///
/// The normalized bounding box, in source pixels, of the display rectangle's
/// two opposite corners mapped through the inverse transform.
///
/// # Errors
///
/// Returns `TransformError::DegenerateScale` if either scale component is
/// zero; the inverse divides by scale and must not propagate NaN.
pub fn resolve_source_rect(
    display: DisplayRect,
    transform: &TransformState,
    center: Point,
    size: Size,
) -> Result<SourceRect, TransformError> {
    if transform.scale_x == 0.0 || transform.scale_y == 0.0 {
        return Err(TransformError::DegenerateScale {
            scale_x: transform.scale_x,
            scale_y: transform.scale_y,
        });
    }

    let a = map_display_point(display.top_left(), transform, center, size);
    let b = map_display_point(display.bottom_right(), transform, center, size);

    Ok(SourceRect::from_corners(a, b))
}

/// Apply the inverse object transform to a single display-space point.
fn map_display_point(p: Point, transform: &TransformState, center: Point, size: Size) -> Point {
    // Whole turns are equivalent; negate to undo the on-screen rotation
    let theta = -(transform.rotation_degrees % 360.0).to_radians();
    let cos = theta.cos();
    let sin = theta.sin();

    let dx = p.x - center.x;
    let dy = p.y - center.y;

    Point::new(
        (dx * cos - dy * sin) / transform.scale_x + size.width / 2.0,
        (dx * sin + dy * cos) / transform.scale_y + size.height / 2.0,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================
