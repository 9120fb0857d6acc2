//! Gangsheet Core - Image processing library
//!
//! This crate provides the processing core for Gangsheet: reading embedded
//! pixel-density (DPI) metadata out of uploaded image containers, mapping a
//! crop rectangle drawn over a rotated/flipped/scaled canvas object back into
//! the source image's own pixel space, and compositing the cropped,
//! transformed result into an export-ready raster.
//!
//! Everything here is a pure function over in-memory buffers: no I/O, no
//! shared state, no retained scene graph. The UI supplies the values it
//! already tracks (crop rectangle, object transform, object center and size)
//! and receives plain values back.

pub mod decode;
pub mod density;
pub mod encode;
pub mod transform;

pub use decode::{decode_image, detect_orientation, DecodeError, Orientation, Raster};
pub use density::{decode_resolution, ResolutionInfo, SourceFormat};
pub use encode::{encode_raster, EncodeError, OutputFormat};
pub use transform::{
    composite, composite_raster, resolve_source_rect, rotated_bounds, CompositeError,
    InterpolationFilter, TransformError,
};

/// A point in display or source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height extent of an image object, in its own pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The affine transform currently applied to an on-canvas image object,
/// anchored at the object's own center.
///
/// The sign of `scale_x`/`scale_y` encodes a horizontal/vertical flip and the
/// magnitude a per-axis zoom factor. `rotation_degrees` may be any real
/// angle; it is reduced modulo 360 wherever whole turns are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformState {
    /// Rotation in degrees, clockwise positive
    pub rotation_degrees: f64,
    /// Horizontal scale; negative values mirror the horizontal axis
    pub scale_x: f64,
    /// Vertical scale; negative values mirror the vertical axis
    pub scale_y: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformState {
    pub fn new(rotation_degrees: f64, scale_x: f64, scale_y: f64) -> Self {
        Self {
            rotation_degrees,
            scale_x,
            scale_y,
        }
    }

    /// The do-nothing transform: no rotation, unit scale, no flips
    pub fn identity() -> Self {
        Self {
            rotation_degrees: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Check if applying this transform would change nothing: whole turns of
    /// rotation and exactly unit, unflipped scale. The compositor's lossless
    /// fast path keys on this.
    pub fn is_identity(&self) -> bool {
        self.rotation_degrees % 360.0 == 0.0 && self.scale_x == 1.0 && self.scale_y == 1.0
    }

    /// Rotation in radians
    pub fn rotation_radians(&self) -> f64 {
        self.rotation_degrees.to_radians()
    }

    /// Check if the horizontal axis is mirrored
    pub fn flips_horizontal(&self) -> bool {
        self.scale_x < 0.0
    }

    /// Check if the vertical axis is mirrored
    pub fn flips_vertical(&self) -> bool {
        self.scale_y < 0.0
    }
}

/// A crop rectangle in display (stage) coordinates - the space the user drew
/// in, with the stage's own pan/zoom already removed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner of the rectangle
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner of the rectangle
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

/// An axis-aligned rectangle in the source image's untransformed pixel space.
///
/// Always normalized: `width` and `height` are non-negative regardless of the
/// direction the user dragged in, because construction goes through
/// [`SourceRect::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the normalized bounding rectangle of two corner points, given in
    /// any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }
}
