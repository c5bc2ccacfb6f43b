//! Profile photo placement.
//!
//! Templates mark the photo slot one of two ways. A designer may have placed a
//! stand-in picture whose name or alt text contains `|photo|`; the new photo
//! then replaces that picture's bytes and inherits its frame, crop and effects.
//! Otherwise a paragraph containing `|photo|` gets its runs swapped for a new
//! inline picture.

use serde::Serialize;
use tracing::{info, warn};

use crate::docx::drawing::{inline_picture_run, NS_R, NS_WP};
use crate::docx::xml::parse_fragment;
use crate::docx::Document;
use crate::errors::GenerationError;
use crate::imaging::{decode_payload, prepare_inline_png, PixelBox};
use crate::placeholders::{token, PHOTO};

const INSERTED_PICTURE_NAME: &str = "Image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoOutcome {
    /// An existing marked picture got new pixels.
    Replaced {
        part: String,
        /// The payload could not be prepared and was written as decoded.
        verbatim_fallback: bool,
    },
    /// A new inline picture was added at the marker paragraph.
    Inserted {
        part: String,
        relationship_id: String,
    },
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoPayload,
    NoMarker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoBoxes {
    pub replace: PixelBox,
    pub insert: PixelBox,
}

/// Places `payload` (base64) into the document.
///
/// Errors only when a target exists and the photo cannot be used for it: an
/// undecodable base64 payload, or an image that fails to prepare on the insert
/// path. A replace-path preparation failure falls back to the decoded bytes.
pub fn resolve_photo(
    document: &mut Document,
    payload: Option<&str>,
    boxes: PhotoBoxes,
) -> Result<PhotoOutcome, GenerationError> {
    let Some(payload) = payload.filter(|p| !p.trim().is_empty()) else {
        return Ok(PhotoOutcome::Skipped(SkipReason::NoPayload));
    };
    let marker = token(PHOTO);

    if let Some(part) = marked_picture_part(document, &marker) {
        let bytes = decode_payload(payload)?;
        let (data, verbatim_fallback) = match prepare_inline_png(&bytes, boxes.replace) {
            Ok(prepared) => (prepared.png, false),
            Err(e) => {
                warn!(
                    "Could not prepare photo for {}, writing payload bytes as-is: {}",
                    part, e
                );
                (bytes, true)
            }
        };
        document.replace_part(&part, data);
        info!("Replaced marked picture {} (verbatim_fallback={})", part, verbatim_fallback);
        return Ok(PhotoOutcome::Replaced {
            part,
            verbatim_fallback,
        });
    }

    if document.find_paragraph_mut(&marker).is_none() {
        warn!("Photo supplied but the template has no {} picture or paragraph", marker);
        return Ok(PhotoOutcome::Skipped(SkipReason::NoMarker));
    }

    let bytes = decode_payload(payload)?;
    let prepared = prepare_inline_png(&bytes, boxes.insert)?;
    let (width_emu, height_emu) = (prepared.width_emu, prepared.height_emu);

    let (part, relationship_id) = document.add_png_part(prepared.png)?;
    let doc_pr_id = document.next_doc_pr_id();
    document.ensure_root_namespace("wp", NS_WP)?;
    document.ensure_root_namespace("r", NS_R)?;

    let run = parse_fragment(&inline_picture_run(
        &relationship_id,
        doc_pr_id,
        width_emu,
        height_emu,
        INSERTED_PICTURE_NAME,
    ))?;
    let Some(mut paragraph) = document.find_paragraph_mut(&marker) else {
        return Err(GenerationError::Internal(anyhow::anyhow!(
            "photo paragraph vanished while inserting"
        )));
    };
    paragraph.remove_runs();
    paragraph.append(run);

    info!(
        "Inserted photo {} ({}x{} px) as {}",
        part, prepared.width_px, prepared.height_px, relationship_id
    );
    Ok(PhotoOutcome::Inserted {
        part,
        relationship_id,
    })
}

/// Binary part of the first marked picture whose image can be resolved.
fn marked_picture_part(document: &Document, marker: &str) -> Option<String> {
    document
        .graphic_objects()
        .into_iter()
        .filter(|graphic| graphic.matches_marker(marker))
        .find_map(|graphic| document.binary_part_for(graphic.embed.as_deref()?))
}
