//! Core types for image buffers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Orientation;
use crate::transform::Rect;

/// Error types for geometry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The crop rectangle does not fit inside the source image.
    #[error("Rectangle {rect} is outside the {width}x{height} image")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },

    /// A width or height of zero, or a size too large to address.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The operation cannot handle this pixel layout.
    #[error("Unsupported pixel format: {0:?}")]
    UnsupportedPixelFormat(PixelFormat),

    /// Rotation by an angle that is not a multiple of 90 degrees.
    #[error("Unsupported rotation: {0} degrees is not a multiple of 90")]
    UnsupportedRotation(i32),

    /// Pixel payload length does not match width * height * bytes per pixel.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Memory layout of a single pixel. All formats use 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelFormat {
    /// Grayscale.
    L8,
    /// Grayscale with alpha.
    La8,
    /// Red, green, blue.
    Rgb8,
    /// Red, green, blue, alpha.
    #[default]
    Rgba8,
    /// Blue, green, red, alpha. Native layout of most platform bitmaps.
    Bgra8,
}

impl PixelFormat {
    /// Number of bytes occupied by one pixel.
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::L8 => 1,
            PixelFormat::La8 => 2,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => 4,
        }
    }
}

/// An owned, tightly packed pixel buffer with orientation metadata.
///
/// Rows are stored top to bottom in stored-pixel order with no padding.
/// The payload length always equals `width * height * bytes_per_pixel`;
/// the checked constructor is the only way to build one from raw parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    orientation: Orientation,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a buffer tagged [`Orientation::Up`].
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDimensions` if either dimension is zero
    /// or the payload size would not fit in `usize`, and
    /// `GeometryError::BufferSizeMismatch` if `pixels` has the wrong length.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidDimensions { width, height });
        }
        let expected = byte_len(width, height, format)
            .ok_or(GeometryError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(GeometryError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            orientation: Orientation::Up,
            pixels,
        })
    }

    /// Build a buffer from parts already known to be consistent.
    pub(crate) fn from_parts_unchecked(
        width: u32,
        height: u32,
        format: PixelFormat,
        orientation: Orientation,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            Some(pixels.len()),
            byte_len(width, height, format),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            format,
            orientation,
            pixels,
        }
    }

    /// Return the same pixels with a different orientation tag.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Raw pixel bytes in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its pixel bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Width and height as seen after orientation correction.
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    /// Bytes of the pixel at stored coordinates `(x, y)`, or `None` if outside.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.pixels.get(start..start + bpp)
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }
}

/// Payload size for the given shape, or `None` if it overflows `usize`.
pub(crate) fn byte_len(width: u32, height: u32, format: PixelFormat) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(format.bytes_per_pixel())
}
