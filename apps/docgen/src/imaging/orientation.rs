//! EXIF orientation: read the tag, then undo it on the decoded raster.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

/// The EXIF orientation value (1..=8) of an encoded image, if it carries one.
pub fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    exif.get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)
        .filter(|o| (1..=8).contains(o))
}

/// Orientations 5 to 8 store the image transposed.
pub fn swaps_axes(orientation: u32) -> bool {
    (5..=8).contains(&orientation)
}

/// Rotates (clockwise) and then mirrors so the raster displays upright.
pub fn apply(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.rotate180().fliph(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}
