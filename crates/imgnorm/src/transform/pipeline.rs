//! Combined orientation fix and crop.

use std::borrow::Cow;

use super::{crop_with, fix_orientation, Rect};
use crate::buffer::{GeometryError, ImageBuffer};
use crate::GeometryConfig;

/// Bring an image upright and optionally crop it, as configured.
///
/// With `config.fix_orientation` set, `rect` is interpreted in upright
/// coordinates; otherwise it addresses the stored pixels. Cropping uses
/// `config.crop_bounds`. With no crop requested the (possibly reoriented)
/// image is returned as is.
pub fn normalize(
    image: &ImageBuffer,
    rect: Option<Rect>,
    config: &GeometryConfig,
) -> Result<ImageBuffer, GeometryError> {
    let oriented = if config.fix_orientation {
        Cow::Owned(fix_orientation(image)?)
    } else {
        Cow::Borrowed(image)
    };

    match rect {
        Some(rect) => crop_with(&oriented, rect, config.crop_bounds),
        None => Ok(oriented.into_owned()),
    }
}
