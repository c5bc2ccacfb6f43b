use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tracing::debug;

use super::density::{self, Density};
use super::orientation;
use super::{px_to_emu, ImagePrepError, PixelBox, PreparedImage};

/// Decodes `bytes`, rotates them upright, shrinks them into `bounds` (never
/// enlarging, aspect ratio kept) and re-encodes as RGBA PNG.
///
/// The returned EMU size uses the source density, so a 300 dpi scan keeps its
/// printed size rather than being blown up to 96 dpi.
pub fn prepare_inline_png(bytes: &[u8], bounds: PixelBox) -> Result<PreparedImage, ImagePrepError> {
    if bytes.is_empty() {
        return Err(ImagePrepError::EmptyPayload);
    }
    let decoded = image::load_from_memory(bytes).map_err(ImagePrepError::Decode)?;

    let orientation = orientation::read_orientation(bytes).unwrap_or(1);
    let upright = orientation::apply(decoded, orientation);

    let mut dpi = density::detect(bytes);
    if orientation::swaps_axes(orientation) {
        dpi = dpi.transposed();
    }

    let (width_px, height_px) = scaled_size(upright.width(), upright.height(), bounds);
    let resized = if (width_px, height_px) == (upright.width(), upright.height()) {
        upright
    } else {
        upright.resize_exact(width_px, height_px, FilterType::CatmullRom)
    };

    let png = encode_png(DynamicImage::ImageRgba8(resized.to_rgba8()))?;
    let Density { x: dpi_x, y: dpi_y } = dpi;

    debug!(
        "Prepared photo: {}x{} px at {}x{} dpi (orientation {})",
        width_px, height_px, dpi_x, dpi_y, orientation
    );

    Ok(PreparedImage {
        png,
        width_px,
        height_px,
        dpi_x,
        dpi_y,
        width_emu: px_to_emu(width_px, dpi_x),
        height_emu: px_to_emu(height_px, dpi_y),
    })
}

/// Uniform scale `min(1, max_w / w, max_h / h)`, each edge at least one pixel.
pub fn scaled_size(width: u32, height: u32, bounds: PixelBox) -> (u32, u32) {
    let ratio_for = |max: u32, actual: u32| {
        if max > 0 && actual > 0 {
            f64::from(max) / f64::from(actual)
        } else {
            1.0
        }
    };
    let ratio = ratio_for(bounds.max_width, width)
        .min(ratio_for(bounds.max_height, height))
        .min(1.0);

    let edge = |v: u32| ((f64::from(v) * ratio).round() as u32).max(1);
    (edge(width), edge(height))
}

fn encode_png(image: DynamicImage) -> Result<Vec<u8>, ImagePrepError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(ImagePrepError::Encode)?;
    Ok(out.into_inner())
}
