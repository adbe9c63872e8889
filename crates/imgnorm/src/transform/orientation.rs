//! Physical orientation correction.
//!
//! Each orientation tag maps to at most one clockwise rotation followed by
//! at most one mirror. Applying that pair to the stored pixels yields the
//! upright picture, after which the tag is reset to [`Orientation::Up`].

use image::DynamicImage;

use crate::buffer::{GeometryError, ImageBuffer, Orientation};

/// Clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    /// Quarter-turn rotation for an angle in degrees, positive = clockwise.
    ///
    /// Returns `Ok(None)` for whole turns.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnsupportedRotation` unless `degrees` is a
    /// multiple of 90.
    pub fn from_degrees(degrees: i32) -> Result<Option<Self>, GeometryError> {
        match degrees.rem_euclid(360) {
            0 => Ok(None),
            90 => Ok(Some(Rotation::Cw90)),
            180 => Ok(Some(Rotation::Cw180)),
            270 => Ok(Some(Rotation::Cw270)),
            _ => Err(GeometryError::UnsupportedRotation(degrees)),
        }
    }

    pub(crate) fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Rotation::Cw90 => img.rotate90(),
            Rotation::Cw180 => img.rotate180(),
            Rotation::Cw270 => img.rotate270(),
        }
    }
}

/// Axis mirror, applied after rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// Swap left and right.
    Horizontal,
    /// Swap top and bottom.
    Vertical,
}

impl Mirror {
    pub(crate) fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Mirror::Horizontal => img.fliph(),
            Mirror::Vertical => img.flipv(),
        }
    }
}

/// The rotation and mirror that bring a tagged buffer upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationFix {
    pub rotation: Option<Rotation>,
    pub mirror: Option<Mirror>,
}

impl OrientationFix {
    /// Lookup table covering all eight tags.
    pub const fn for_orientation(orientation: Orientation) -> Self {
        let (rotation, mirror) = match orientation {
            Orientation::Up => (None, None),
            Orientation::UpMirrored => (None, Some(Mirror::Horizontal)),
            Orientation::Down => (Some(Rotation::Cw180), None),
            Orientation::DownMirrored => (None, Some(Mirror::Vertical)),
            Orientation::LeftMirrored => (Some(Rotation::Cw90), Some(Mirror::Horizontal)),
            Orientation::Right => (Some(Rotation::Cw90), None),
            Orientation::RightMirrored => (Some(Rotation::Cw270), Some(Mirror::Horizontal)),
            Orientation::Left => (Some(Rotation::Cw270), None),
        };
        Self { rotation, mirror }
    }

    pub fn is_identity(&self) -> bool {
        self.rotation.is_none() && self.mirror.is_none()
    }

    fn apply(&self, img: DynamicImage) -> DynamicImage {
        let img = match self.rotation {
            Some(rotation) => rotation.apply(img),
            None => img,
        };
        match self.mirror {
            Some(mirror) => mirror.apply(img),
            None => img,
        }
    }
}

/// Rewrite the pixels of an image so that its orientation tag becomes `Up`.
///
/// A buffer already tagged `Up` is returned as an equal copy for every
/// pixel format. Otherwise width and height swap for the four transposing
/// tags.
///
/// # Errors
///
/// Returns `GeometryError::UnsupportedPixelFormat` for `Bgra8` buffers that
/// need reorienting; swizzle platform bitmaps to `Rgba8` first.
pub fn fix_orientation(image: &ImageBuffer) -> Result<ImageBuffer, GeometryError> {
    let orientation = image.orientation();
    let fix = OrientationFix::for_orientation(orientation);

    if fix.is_identity() {
        log::trace!("fix_orientation: already upright");
        return Ok(image.clone());
    }

    log::debug!(
        "fix_orientation: {:?} on {}x{} {:?} image: rotate {:?}, mirror {:?}",
        orientation,
        image.width(),
        image.height(),
        image.format(),
        fix.rotation,
        fix.mirror
    );

    let upright = fix.apply(image.to_dynamic()?);
    ImageBuffer::from_dynamic(upright, Orientation::Up)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
