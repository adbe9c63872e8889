//! Conversions between [`ImageBuffer`] and the `image` crate.

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use super::{byte_len, GeometryError, ImageBuffer, Orientation, PixelFormat};

impl ImageBuffer {
    /// Wrap a decoded `image` crate picture, tagging it with `orientation`.
    ///
    /// 8-bit luma, luma-alpha, RGB and RGBA pictures keep their layout;
    /// anything else (16-bit, float) is converted to `Rgba8`.
    pub fn from_dynamic(
        img: DynamicImage,
        orientation: Orientation,
    ) -> Result<Self, GeometryError> {
        let (format, width, height, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => {
                (PixelFormat::L8, buf.width(), buf.height(), buf.into_raw())
            }
            DynamicImage::ImageLumaA8(buf) => {
                (PixelFormat::La8, buf.width(), buf.height(), buf.into_raw())
            }
            DynamicImage::ImageRgb8(buf) => {
                (PixelFormat::Rgb8, buf.width(), buf.height(), buf.into_raw())
            }
            DynamicImage::ImageRgba8(buf) => {
                (PixelFormat::Rgba8, buf.width(), buf.height(), buf.into_raw())
            }
            other => {
                log::debug!("from_dynamic: converting {:?} to Rgba8", other.color());
                let buf = other.into_rgba8();
                (PixelFormat::Rgba8, buf.width(), buf.height(), buf.into_raw())
            }
        };

        Ok(ImageBuffer::new(width, height, format, pixels)?.with_orientation(orientation))
    }

    /// Copy the pixels into an `image` crate picture.
    ///
    /// The orientation tag is not carried over.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnsupportedPixelFormat` for `Bgra8`, which
    /// the `image` crate has no layout for.
    pub fn to_dynamic(&self) -> Result<DynamicImage, GeometryError> {
        if self.format() == PixelFormat::Bgra8 {
            return Err(GeometryError::UnsupportedPixelFormat(PixelFormat::Bgra8));
        }
        self.clone().into_dynamic()
    }

    /// Move the pixels into an `image` crate picture without copying.
    ///
    /// Same rules as [`ImageBuffer::to_dynamic`].
    pub fn into_dynamic(self) -> Result<DynamicImage, GeometryError> {
        let (w, h, format) = (self.width(), self.height(), self.format());
        let actual = self.pixels().len();
        let raw = self.into_pixels();
        let img = match format {
            PixelFormat::L8 => GrayImage::from_raw(w, h, raw).map(DynamicImage::ImageLuma8),
            PixelFormat::La8 => {
                GrayAlphaImage::from_raw(w, h, raw).map(DynamicImage::ImageLumaA8)
            }
            PixelFormat::Rgb8 => RgbImage::from_raw(w, h, raw).map(DynamicImage::ImageRgb8),
            PixelFormat::Rgba8 => RgbaImage::from_raw(w, h, raw).map(DynamicImage::ImageRgba8),
            PixelFormat::Bgra8 => {
                return Err(GeometryError::UnsupportedPixelFormat(PixelFormat::Bgra8))
            }
        };

        img.ok_or_else(|| match byte_len(w, h, format) {
            Some(expected) => GeometryError::BufferSizeMismatch { expected, actual },
            None => GeometryError::InvalidDimensions {
                width: w,
                height: h,
            },
        })
    }
}
