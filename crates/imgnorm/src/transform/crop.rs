//! Image cropping operations.
//!
//! Rectangles are given in stored-pixel coordinates: `(0, 0)` is the first
//! pixel of the payload, regardless of the orientation tag. Fix the
//! orientation first (or use [`normalize`](super::normalize)) to crop in
//! upright coordinates.
//!
//! # Bounds policy
//!
//! - [`crop`] is strict: any rectangle reaching past the image edge fails
//!   with `OutOfBounds`
//! - [`crop_with`] with [`CropBounds::Clamp`] crops to the intersection
//! - [`crop_normalized`] takes fractions of the image size and always clamps

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::buffer::{GeometryError, ImageBuffer, Orientation};

/// Pixel rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the rectangle lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        matches!((right, bottom), (Some(r), Some(b)) if r <= width && b <= height)
    }

    /// Intersection with a `width` x `height` image, or `None` if they don't overlap.
    pub fn intersect(&self, width: u32, height: u32) -> Option<Rect> {
        if self.x >= width || self.y >= height || self.is_empty() {
            return None;
        }
        Some(Rect {
            x: self.x,
            y: self.y,
            width: self.width.min(width - self.x),
            height: self.height.min(height - self.y),
        })
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Crop region as fractions (0.0 to 1.0) of the image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Convert to pixels for a `width` x `height` image.
    ///
    /// Fractions are clamped to 0.0..=1.0 and rounded. The result always
    /// lies inside the image and is at least 1x1.
    pub fn to_pixels(&self, width: u32, height: u32) -> Rect {
        let src_w = width as f64;
        let src_h = height as f64;

        let px_left = (self.left.clamp(0.0, 1.0) * src_w).round() as u32;
        let px_top = (self.top.clamp(0.0, 1.0) * src_h).round() as u32;
        let px_width = (self.width.clamp(0.0, 1.0) * src_w).round() as u32;
        let px_height = (self.height.clamp(0.0, 1.0) * src_h).round() as u32;

        let px_left = px_left.min(width.saturating_sub(1));
        let px_top = px_top.min(height.saturating_sub(1));
        let px_right = px_left.saturating_add(px_width).min(width);
        let px_bottom = px_top.saturating_add(px_height).min(height);

        Rect {
            x: px_left,
            y: px_top,
            width: px_right.saturating_sub(px_left).max(1),
            height: px_bottom.saturating_sub(px_top).max(1),
        }
    }
}

/// What to do with a rectangle that reaches past the image edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CropBounds {
    /// Fail with `GeometryError::OutOfBounds`.
    #[default]
    Reject,
    /// Crop to the part of the rectangle that overlaps the image.
    Clamp,
}

/// Crop an image to `rect`, rejecting rectangles that leave the image.
///
/// The result has size `rect.width` x `rect.height`, the source pixel
/// format, and orientation [`Orientation::Up`].
///
/// # Errors
///
/// - `GeometryError::InvalidDimensions` if the rectangle has zero width or height
/// - `GeometryError::OutOfBounds` if it does not fit inside the image
pub fn crop(image: &ImageBuffer, rect: Rect) -> Result<ImageBuffer, GeometryError> {
    crop_with(image, rect, CropBounds::Reject)
}

/// Crop an image to `rect` using the given bounds policy.
///
/// With [`CropBounds::Clamp`] a rectangle that overlaps the image only
/// partly is cut down to the overlap; one that misses it entirely still
/// fails with `OutOfBounds`.
pub fn crop_with(
    image: &ImageBuffer,
    rect: Rect,
    bounds: CropBounds,
) -> Result<ImageBuffer, GeometryError> {
    if rect.is_empty() {
        return Err(GeometryError::InvalidDimensions {
            width: rect.width,
            height: rect.height,
        });
    }

    let (width, height) = (image.width(), image.height());
    let out_of_bounds = GeometryError::OutOfBounds {
        rect,
        width,
        height,
    };

    let region = match bounds {
        CropBounds::Reject if rect.fits_within(width, height) => rect,
        CropBounds::Reject => return Err(out_of_bounds),
        CropBounds::Clamp => rect.intersect(width, height).ok_or(out_of_bounds)?,
    };

    if region != rect {
        log::debug!("crop: clamped {} to {} for {}x{} image", rect, region, width, height);
    }

    Ok(copy_region(image, region))
}

/// Crop an image using normalized coordinates.
///
/// # Behavior
///
/// - Coordinates are clamped to the image bounds
/// - Minimum output dimension is 1x1 pixels
/// - Full crop (0, 0, 1, 1) returns a copy of the original pixels
///
/// # Errors
///
/// Returns `GeometryError::InvalidDimensions` with a 0x0 size if any
/// coordinate is NaN or infinite.
pub fn crop_normalized(
    image: &ImageBuffer,
    rect: NormalizedRect,
) -> Result<ImageBuffer, GeometryError> {
    if !rect.is_finite() {
        return Err(GeometryError::InvalidDimensions {
            width: 0,
            height: 0,
        });
    }
    let px = rect.to_pixels(image.width(), image.height());
    crop_with(image, px, CropBounds::Clamp)
}

/// Copy a region already known to lie inside the image.
fn copy_region(image: &ImageBuffer, region: Rect) -> ImageBuffer {
    // Fast path: full crop only drops the orientation tag
    if region == Rect::full(image.width(), image.height()) {
        log::trace!("crop: full-frame region, cloning");
        return image.clone().with_orientation(Orientation::Up);
    }

    let bpp = image.format().bytes_per_pixel();
    let src_stride = image.row_stride();
    let dst_stride = region.width as usize * bpp;
    let src = image.pixels();

    let mut output = Vec::with_capacity(dst_stride * region.height as usize);

    // Copy pixel data row by row
    for y in region.y..region.y + region.height {
        let row_start = y as usize * src_stride + region.x as usize * bpp;
        output.extend_from_slice(&src[row_start..row_start + dst_stride]);
    }

    ImageBuffer::from_parts_unchecked(
        region.width,
        region.height,
        image.format(),
        Orientation::Up,
        output,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::PixelFormat;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=64, 1u32..=64)
    }

    /// Strategy for an image size plus a rectangle fully inside it.
    fn image_and_rect_strategy() -> impl Strategy<Value = ((u32, u32), Rect)> {
        dimensions_strategy().prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(x, y)| {
                (1..=w - x, 1..=h - y)
                    .prop_map(move |(rw, rh)| ((w, h), Rect::new(x, y, rw, rh)))
            })
        })
    }

    /// Create a grayscale test image with unique-ish pixel values.
    fn create_test_image(width: u32, height: u32) -> ImageBuffer {
        let pixels = (0..width * height).map(|i| (i % 251) as u8).collect();
        ImageBuffer::new(width, height, PixelFormat::L8, pixels).unwrap()
    }

    proptest! {
        /// Property: Output size equals the requested rectangle.
        #[test]
        fn prop_output_matches_rect(((w, h), rect) in image_and_rect_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();

            prop_assert_eq!(result.width(), rect.width);
            prop_assert_eq!(result.height(), rect.height);
            prop_assert_eq!(result.pixels().len(), (rect.width * rect.height) as usize);
        }

        /// Property: Every output pixel comes from the offset source position.
        #[test]
        fn prop_pixels_from_offset(((w, h), rect) in image_and_rect_strategy()) {
            let img = create_test_image(w, h);
            let result = crop(&img, rect).unwrap();

            for y in 0..rect.height {
                for x in 0..rect.width {
                    prop_assert_eq!(result.pixel(x, y), img.pixel(rect.x + x, rect.y + y));
                }
            }
        }

        /// Property: Clamping agrees with strict cropping for in-bounds rectangles.
        #[test]
        fn prop_clamp_matches_reject_in_bounds(((w, h), rect) in image_and_rect_strategy()) {
            let img = create_test_image(w, h);
            let strict = crop(&img, rect).unwrap();
            let clamped = crop_with(&img, rect, CropBounds::Clamp).unwrap();
            prop_assert_eq!(strict, clamped);
        }

        /// Property: Clamped output never exceeds the input.
        #[test]
        fn prop_clamped_bounded_by_input(
            (w, h) in dimensions_strategy(),
            (x, y, rw, rh) in (0u32..64, 0u32..64, 1u32..200, 1u32..200),
        ) {
            let img = create_test_image(w, h);
            match crop_with(&img, Rect::new(x, y, rw, rh), CropBounds::Clamp) {
                Ok(result) => {
                    prop_assert!(result.width() <= w - x);
                    prop_assert!(result.height() <= h - y);
                }
                Err(err) => {
                    prop_assert!(x >= w || y >= h);
                    let is_out_of_bounds = matches!(err, GeometryError::OutOfBounds { .. });
                    prop_assert!(is_out_of_bounds);
                }
            }
        }

        /// Property: Normalized crops always produce a valid in-bounds buffer.
        #[test]
        fn prop_normalized_output_valid(
            (w, h) in dimensions_strategy(),
            (left, top, cw, ch) in (-0.5f64..=1.5, -0.5f64..=1.5, 0.0f64..=1.5, 0.0f64..=1.5),
        ) {
            let img = create_test_image(w, h);
            let result = crop_normalized(&img, NormalizedRect::new(left, top, cw, ch)).unwrap();

            prop_assert!(result.width() >= 1 && result.width() <= w);
            prop_assert!(result.height() >= 1 && result.height() <= h);
        }
    }
}
