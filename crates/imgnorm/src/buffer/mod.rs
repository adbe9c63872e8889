//! Image buffer value type and its metadata.
//!
//! This module provides:
//! - [`ImageBuffer`], an owned pixel payload with width, height, pixel
//!   format and orientation tag
//! - [`Orientation`], the eight EXIF-style orientation tags
//! - Reading the orientation tag from an encoded file's EXIF block
//! - Conversions to and from the `image` crate's `DynamicImage`
//!
//! Decoding and encoding of pixel data are left to the caller; an
//! `ImageBuffer` is what comes out of a decoder and goes into an encoder.

mod interop;
mod orientation;
mod types;

pub use orientation::{read_exif_orientation, Orientation};
pub use types::{GeometryError, ImageBuffer, PixelFormat};

pub(crate) use types::byte_len;
