//! Pixel density (dots per inch) of an encoded image.
//!
//! Sources, first hit wins: JFIF APP0 header, PNG `pHYs` chunk, EXIF
//! X/YResolution. Anything missing or non-positive reads as [`DEFAULT_DPI`].

use std::io::Cursor;

use exif::{In, Reader, Tag, Value};

use super::DEFAULT_DPI;

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const CM_PER_INCH: f64 = 2.54;
const METRES_PER_INCH: f64 = 0.0254;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Density {
    pub x: u32,
    pub y: u32,
}

impl Density {
    pub const DEFAULT: Density = Density {
        x: DEFAULT_DPI,
        y: DEFAULT_DPI,
    };

    fn from_measured(x: f64, y: f64) -> Self {
        let axis = |v: f64| {
            let dpi = v.round();
            if dpi >= 1.0 && dpi <= f64::from(u32::MAX) {
                dpi as u32
            } else {
                DEFAULT_DPI
            }
        };
        Self { x: axis(x), y: axis(y) }
    }

    pub fn transposed(self) -> Self {
        Self { x: self.y, y: self.x }
    }
}

pub fn detect(bytes: &[u8]) -> Density {
    from_jfif(bytes)
        .or_else(|| from_png(bytes))
        .or_else(|| from_exif(bytes))
        .unwrap_or(Density::DEFAULT)
}

fn from_jfif(bytes: &[u8]) -> Option<Density> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }
    let mut at = 2;
    while at + 4 <= bytes.len() && bytes[at] == 0xFF {
        let marker = bytes[at + 1];
        let len = usize::from(u16::from_be_bytes([bytes[at + 2], bytes[at + 3]]));
        // SOS: entropy-coded data follows, no more headers.
        if marker == 0xDA || len < 2 {
            return None;
        }
        let segment = bytes.get(at + 4..at + 2 + len)?;
        if marker == 0xE0 && segment.starts_with(b"JFIF\0") && segment.len() >= 12 {
            let x = f64::from(u16::from_be_bytes([segment[8], segment[9]]));
            let y = f64::from(u16::from_be_bytes([segment[10], segment[11]]));
            return match segment[7] {
                1 => Some(Density::from_measured(x, y)),
                2 => Some(Density::from_measured(x * CM_PER_INCH, y * CM_PER_INCH)),
                // Unit 0 is an aspect ratio only.
                _ => None,
            };
        }
        at += 2 + len;
    }
    None
}

fn from_png(bytes: &[u8]) -> Option<Density> {
    let mut rest = bytes.strip_prefix(PNG_SIGNATURE)?;
    while rest.len() >= 12 {
        let len = u32::from_be_bytes(rest[0..4].try_into().ok()?) as usize;
        let kind = &rest[4..8];
        let data = rest.get(8..8 + len)?;
        match kind {
            b"pHYs" if data.len() >= 9 => {
                // Unit 1 is pixels per metre; 0 is an aspect ratio only.
                if data[8] != 1 {
                    return None;
                }
                let x = u32::from_be_bytes(data[0..4].try_into().ok()?);
                let y = u32::from_be_bytes(data[4..8].try_into().ok()?);
                return Some(Density::from_measured(
                    f64::from(x) * METRES_PER_INCH,
                    f64::from(y) * METRES_PER_INCH,
                ));
            }
            b"IDAT" | b"IEND" => return None,
            _ => {}
        }
        rest = rest.get(12 + len..)?;
    }
    None
}

fn from_exif(bytes: &[u8]) -> Option<Density> {
    let exif = Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    let rational = |tag: Tag| match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(v) => v.first().map(|r| r.to_f64()),
        _ => None,
    };
    let x = rational(Tag::XResolution)?;
    let y = rational(Tag::YResolution).unwrap_or(x);
    let per_cm = exif
        .get_field(Tag::ResolutionUnit, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        == Some(3);
    Some(if per_cm {
        Density::from_measured(x * CM_PER_INCH, y * CM_PER_INCH)
    } else {
        Density::from_measured(x, y)
    })
}
