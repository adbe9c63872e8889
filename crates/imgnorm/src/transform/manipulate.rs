//! Ordered geometry edits: rotate, flip, crop and resize.
//!
//! [`manipulate`] brings the source upright and then applies each
//! [`Action`] in turn to the result of the previous one. Every action
//! works in upright coordinates and the output is always tagged `Up`.
//!
//! Actions deserialize from an externally tagged form:
//!
//! ```text
//! [{"rotate": 90}, {"flip": {"horizontal": true}},
//!  {"crop": {"x": 0, "y": 0, "width": 100, "height": 50}},
//!  {"resize": {"width": 64}}]
//! ```

use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::{crop, fix_orientation, Mirror, Rect, Rotation};
use crate::buffer::{byte_len, GeometryError, ImageBuffer, Orientation};

/// Interpolation filter for resize actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl ResizeFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Mirror along one or both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flip {
    /// Swap left and right.
    pub horizontal: bool,
    /// Swap top and bottom.
    pub vertical: bool,
}

/// Scale to a new size.
///
/// When only one side is given the other follows the source aspect ratio.
/// With neither side the action does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resize {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub filter: ResizeFilter,
}

impl Resize {
    /// Output size for a `width` x `height` source.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidDimensions` if a requested side is zero.
    pub fn target_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32), GeometryError> {
        if self.width == Some(0) || self.height == Some(0) {
            return Err(GeometryError::InvalidDimensions {
                width: self.width.unwrap_or(width),
                height: self.height.unwrap_or(height),
            });
        }

        let dims = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, scale_side(height, w, width)),
            (None, Some(h)) => (scale_side(width, h, height), h),
            (None, None) => (width, height),
        };
        Ok(dims)
    }
}

/// `side * numerator / denominator`, rounded, at least 1.
fn scale_side(side: u32, numerator: u32, denominator: u32) -> u32 {
    let scaled = (side as f64 * numerator as f64 / denominator as f64).round() as u32;
    scaled.max(1)
}

/// One step of a [`manipulate`] pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Rotate by a multiple of 90 degrees, positive = clockwise.
    Rotate(i32),
    Flip(Flip),
    /// Strict crop, see [`crop`].
    Crop(Rect),
    Resize(Resize),
}

/// Apply `actions` in order to the upright version of `image`.
///
/// An empty action list returns the upright image.
///
/// # Errors
///
/// - `GeometryError::UnsupportedRotation` for angles that aren't quarter turns
/// - `GeometryError::OutOfBounds` / `InvalidDimensions` from crop and resize
/// - `GeometryError::UnsupportedPixelFormat` for `Bgra8` whenever pixels
///   have to be rotated, flipped or resampled
///
/// No partial result is returned; the first failing action aborts the run.
pub fn manipulate(image: &ImageBuffer, actions: &[Action]) -> Result<ImageBuffer, GeometryError> {
    let mut current = fix_orientation(image)?;
    for (index, action) in actions.iter().enumerate() {
        log::debug!(
            "manipulate: step {} {:?} on {}x{}",
            index,
            action,
            current.width(),
            current.height()
        );
        current = apply_action(current, action)?;
    }
    Ok(current)
}

fn apply_action(image: ImageBuffer, action: &Action) -> Result<ImageBuffer, GeometryError> {
    match *action {
        Action::Rotate(degrees) => match Rotation::from_degrees(degrees)? {
            Some(rotation) => map_pixels(image, |img| rotation.apply(img)),
            None => Ok(image),
        },
        Action::Flip(flip) => {
            if !flip.horizontal && !flip.vertical {
                return Ok(image);
            }
            map_pixels(image, |img| {
                let img = if flip.horizontal {
                    Mirror::Horizontal.apply(img)
                } else {
                    img
                };
                if flip.vertical {
                    Mirror::Vertical.apply(img)
                } else {
                    img
                }
            })
        }
        Action::Crop(rect) => crop(&image, rect),
        Action::Resize(resize) => {
            let (width, height) = resize.target_dimensions(image.width(), image.height())?;

            // Fast path: if dimensions match, keep the buffer
            if (width, height) == (image.width(), image.height()) {
                return Ok(image);
            }
            if byte_len(width, height, image.format()).is_none() {
                return Err(GeometryError::InvalidDimensions { width, height });
            }

            let filter = resize.filter.to_image_filter();
            map_pixels(image, |img| img.resize_exact(width, height, filter))
        }
    }
}

/// Run an `image` crate transform over the buffer's pixels.
fn map_pixels(
    image: ImageBuffer,
    f: impl FnOnce(DynamicImage) -> DynamicImage,
) -> Result<ImageBuffer, GeometryError> {
    let img = image.into_dynamic()?;
    ImageBuffer::from_dynamic(f(img), Orientation::Up)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::buffer::PixelFormat;
    use proptest::prelude::*;

    /// Strategy for a random upright RGB image.
    fn image_strategy() -> impl Strategy<Value = ImageBuffer> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h * 3) as usize)
                .prop_map(move |pixels| ImageBuffer::new(w, h, PixelFormat::Rgb8, pixels).unwrap())
        })
    }

    proptest! {
        /// Property: Four quarter turns restore the image.
        #[test]
        fn prop_full_turn_is_identity(img in image_strategy()) {
            let actions = [Action::Rotate(90); 4];
            prop_assert_eq!(manipulate(&img, &actions).unwrap(), img);
        }

        /// Property: A rotation is undone by its opposite.
        #[test]
        fn prop_rotation_inverse(img in image_strategy(), turns in -4i32..=4) {
            let actions = [Action::Rotate(90 * turns), Action::Rotate(-90 * turns)];
            prop_assert_eq!(manipulate(&img, &actions).unwrap(), img);
        }

        /// Property: Flipping twice is a no-op.
        #[test]
        fn prop_double_flip_is_identity(
            img in image_strategy(),
            horizontal in any::<bool>(),
            vertical in any::<bool>(),
        ) {
            let flip = Action::Flip(Flip { horizontal, vertical });
            prop_assert_eq!(manipulate(&img, &[flip, flip]).unwrap(), img);
        }

        /// Property: Angles that aren't quarter turns are always rejected.
        #[test]
        fn prop_non_quarter_turn_rejected(img in image_strategy(), degrees in any::<i32>()) {
            prop_assume!(degrees.rem_euclid(90) != 0);
            let err = manipulate(&img, &[Action::Rotate(degrees)]).unwrap_err();
            prop_assert_eq!(err, GeometryError::UnsupportedRotation(degrees));
        }

        /// Property: Width-only resize follows the source aspect ratio.
        #[test]
        fn prop_resize_width_keeps_aspect(img in image_strategy(), target in 1u32..=24) {
            let resize = Resize { width: Some(target), ..Default::default() };
            let result = manipulate(&img, &[Action::Resize(resize)]).unwrap();

            let expected_h = (img.height() as f64 * target as f64 / img.width() as f64).round().max(1.0);
            prop_assert_eq!(result.width(), target);
            prop_assert_eq!(result.height(), expected_h as u32);
            prop_assert_eq!(result.format(), PixelFormat::Rgb8);
        }
    }
}
