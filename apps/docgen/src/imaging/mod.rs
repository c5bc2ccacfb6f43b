//! Photo preparation for embedding: decode, auto-orient, scale into a pixel box,
//! re-encode as PNG, and size in EMU.

pub mod density;
pub mod orientation;
pub mod pipeline;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use pipeline::prepare_inline_png;

/// Assumed when an image carries no usable density.
pub const DEFAULT_DPI: u32 = 96;

/// English Metric Units per inch, the document's native length unit.
pub const EMU_PER_INCH: f64 = 914_400.0;

#[derive(Debug, Error)]
pub enum ImagePrepError {
    #[error("photo payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("photo payload is empty")]
    EmptyPayload,

    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),
}

/// Largest allowed pixel size. A zero edge leaves that axis unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    pub max_width: u32,
    pub max_height: u32,
}

impl PixelBox {
    pub const fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub dpi_x: u32,
    pub dpi_y: u32,
    pub width_emu: i64,
    pub height_emu: i64,
}

/// Decodes a base64 photo payload. A `data:<mime>;base64,` prefix and any
/// whitespace are ignored.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, ImagePrepError> {
    let payload = payload.trim();
    let payload = match payload.strip_prefix("data:") {
        Some(uri) => uri.split_once(',').map(|(_, data)| data).unwrap_or(""),
        None => payload,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ImagePrepError::EmptyPayload);
    }
    Ok(STANDARD.decode(compact)?)
}

/// `round(px / dpi * 914400)`; a zero density counts as 1.
pub fn px_to_emu(px: u32, dpi: u32) -> i64 {
    (f64::from(px) / f64::from(dpi.max(1)) * EMU_PER_INCH).round() as i64
}
