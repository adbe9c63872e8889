//! Orientation tags and EXIF orientation lookup.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use serde::{Deserialize, Serialize};

/// Pending rotation/mirror needed to present a buffer upright.
///
/// Variant names describe where the top of the picture ended up in the
/// stored pixels; the EXIF value of each is given alongside.
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Orientation {
    /// Already upright (EXIF 1).
    #[default]
    Up = 1,
    /// Mirrored left-to-right (EXIF 2).
    UpMirrored = 2,
    /// Rotated 180 degrees (EXIF 3).
    Down = 3,
    /// Mirrored top-to-bottom (EXIF 4).
    DownMirrored = 4,
    /// Transposed across the main diagonal (EXIF 5).
    LeftMirrored = 5,
    /// Needs 90 degrees clockwise to be upright (EXIF 6).
    Right = 6,
    /// Transposed across the anti-diagonal (EXIF 7).
    RightMirrored = 7,
    /// Needs 270 degrees clockwise to be upright (EXIF 8).
    Left = 8,
}

impl Orientation {
    /// All eight tags in EXIF order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    /// Map an EXIF orientation value (1-8) to a tag.
    pub fn from_exif(value: u32) -> Option<Self> {
        match value {
            1 => Some(Orientation::Up),
            2 => Some(Orientation::UpMirrored),
            3 => Some(Orientation::Down),
            4 => Some(Orientation::DownMirrored),
            5 => Some(Orientation::LeftMirrored),
            6 => Some(Orientation::Right),
            7 => Some(Orientation::RightMirrored),
            8 => Some(Orientation::Left),
            _ => None,
        }
    }

    #[inline]
    pub fn exif_value(self) -> u32 {
        self as u32
    }

    /// Returns true if correcting this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::LeftMirrored
                | Orientation::Right
                | Orientation::RightMirrored
                | Orientation::Left
        )
    }

    #[inline]
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Orientation::UpMirrored
                | Orientation::DownMirrored
                | Orientation::LeftMirrored
                | Orientation::RightMirrored
        )
    }
}

/// Read the EXIF orientation tag from encoded image bytes.
///
/// Only the metadata container is parsed; pixel data is never decoded.
/// Returns `None` if there is no EXIF block, no orientation tag, or the
/// value is outside 1-8.
pub fn read_exif_orientation(bytes: &[u8]) -> Option<Orientation> {
    let mut cursor = Cursor::new(bytes);
    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(e) => {
            log::trace!("read_exif_orientation: no EXIF data: {}", e);
            return None;
        }
    };

    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    let value = field.value.get_uint(0)?;
    let orientation = Orientation::from_exif(value);
    if orientation.is_none() {
        log::debug!("read_exif_orientation: ignoring invalid value {}", value);
    }
    orientation
}
