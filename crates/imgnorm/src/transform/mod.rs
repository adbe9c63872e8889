//! Geometry transforms: cropping, orientation fixing and ordered edits.
//!
//! All operations borrow the source buffer and return a newly allocated
//! one; nothing is modified in place.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the stored pixels
//! - Pixel rectangles use `u32` offsets and sizes
//! - Normalized rectangles are fractions (0.0 to 1.0) of the image size
//!
//! # Transform Order
//!
//! [`normalize`] applies, in order:
//! 1. Orientation fix (so later coordinates are upright)
//! 2. Crop
//!
//! [`manipulate`] also starts with the orientation fix, then runs its
//! actions in the order given.

mod crop;
mod manipulate;
mod orientation;
mod pipeline;

pub use crop::{crop, crop_normalized, crop_with, CropBounds, NormalizedRect, Rect};
pub use manipulate::{manipulate, Action, Flip, Resize, ResizeFilter};
pub use orientation::{fix_orientation, Mirror, OrientationFix, Rotation};
pub use pipeline::normalize;
