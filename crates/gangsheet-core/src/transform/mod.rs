//! Crop geometry and compositing under canvas transforms.
//!
//! This module provides functionality for:
//! - Mapping a crop rectangle drawn in display space back into the source
//!   image's own pixel space ([`resolve_source_rect`])
//! - Rendering the cropped region with the object's rotation, scale, and
//!   flips re-applied ([`composite`], [`composite_raster`])
//! - Predicting the output raster size for a transformed crop
//!   ([`rotated_bounds`])
//!
//! # Coordinate System
//!
//! All angles are degrees, positive = clockwise on screen (y-down canvas
//! convention). Transforms are anchored at the object's center: display
//! space and source space share that fixed point. Negative scale components
//! are flips about the matching axis.
//!
//! # Pipeline
//!
//! The editor calls [`resolve_source_rect`] while the user drags, then hands
//! the resolved rectangle to [`composite`] on confirm:
//!
//! ```ignore
//! let region = resolve_source_rect(display_rect, &transform, center, size)?;
//! let raster = composite(&bytes, &region, &transform, InterpolationFilter::Lanczos3)?;
//! ```

mod composite;
mod locate;

pub use composite::{
    composite, composite_raster, rotated_bounds, CompositeError, InterpolationFilter,
};
pub use locate::{resolve_source_rect, TransformError};
