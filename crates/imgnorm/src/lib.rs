//! imgnorm - Image geometry normalization
//!
//! This crate crops image buffers and rewrites their pixels so that a
//! pending EXIF-style orientation becomes upright. Ordered rotate, flip,
//! crop and resize edits are available through [`manipulate`].
//!
//! Every operation is a pure function over an owned [`ImageBuffer`];
//! decoding and encoding of image files are left to the caller.

pub mod buffer;
pub mod transform;

pub use buffer::{read_exif_orientation, GeometryError, ImageBuffer, Orientation, PixelFormat};
pub use transform::{
    crop, crop_normalized, crop_with, fix_orientation, manipulate, normalize, Action, CropBounds,
    Flip, NormalizedRect, Rect, Resize, ResizeFilter,
};

/// Settings for [`normalize`].
///
/// Missing fields take their defaults when deserialized, so a host can
/// embed this in its own configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// How crop rectangles reaching past the image edge are handled.
    pub crop_bounds: CropBounds,
    /// Bring the image upright before cropping.
    pub fix_orientation: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            crop_bounds: CropBounds::Reject,
            fix_orientation: true,
        }
    }
}
