//! Graphic objects (`w:drawing`): metadata lookup for marker matching, and the
//! markup for a freshly inserted inline picture.

use serde::Serialize;

use super::xml::XmlElement;

pub const W_DRAWING: &str = "w:drawing";
const PIC_PIC: &str = "pic:pic";
const A_BLIP: &str = "a:blip";
const WP_EXTENT: &str = "wp:extent";
const A_XFRM: &str = "a:xfrm";

pub const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// Where descriptive text for a picture may live. Authoring tools disagree on
/// which one they fill in, so both are queried the same way, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetadataSource {
    /// `pic:nvPicPr/pic:cNvPr` on the picture itself.
    PictureProperties,
    /// `wp:docPr` on the enclosing inline/anchor.
    DrawingProperties,
}

impl MetadataSource {
    pub const ORDERED: [MetadataSource; 2] = [
        MetadataSource::PictureProperties,
        MetadataSource::DrawingProperties,
    ];

    fn locate<'a>(self, drawing: &'a XmlElement, picture: &'a XmlElement) -> Option<&'a XmlElement> {
        match self {
            MetadataSource::PictureProperties => picture.child("pic:nvPicPr")?.child("pic:cNvPr"),
            MetadataSource::DrawingProperties => drawing.find("wp:docPr"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub source: MetadataSource,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub cx: i64,
    pub cy: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// Read-only view of one picture-bearing `w:drawing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphicObject {
    pub descriptors: Vec<Descriptor>,
    /// Relationship id of the picture's binary part (`a:blip r:embed`).
    pub embed: Option<String>,
    pub extent: Option<Extent>,
    pub transform: Option<Transform>,
}

impl GraphicObject {
    /// `None` for drawings that carry no picture (charts, shapes, ...).
    pub fn from_element(drawing: &XmlElement) -> Option<Self> {
        let picture = drawing.find(PIC_PIC)?;

        let descriptors = MetadataSource::ORDERED
            .iter()
            .filter_map(|&source| {
                let props = source.locate(drawing, picture)?;
                Some(Descriptor {
                    source,
                    name: props.attr("name"),
                    description: props.attr("descr"),
                })
            })
            .collect();

        let embed = picture
            .child("pic:blipFill")
            .and_then(|fill| fill.child(A_BLIP))
            .and_then(|blip| blip.attr("r:embed"));

        let extent = drawing.find(WP_EXTENT).and_then(|e| {
            Some(Extent {
                cx: e.attr("cx")?.parse().ok()?,
                cy: e.attr("cy")?.parse().ok()?,
            })
        });

        let transform = picture.find(A_XFRM).and_then(|xfrm| {
            let off = xfrm.child("a:off");
            let ext = xfrm.child("a:ext")?;
            Some(Transform {
                x: off.and_then(|o| o.attr("x")?.parse().ok()).unwrap_or(0),
                y: off.and_then(|o| o.attr("y")?.parse().ok()).unwrap_or(0),
                cx: ext.attr("cx")?.parse().ok()?,
                cy: ext.attr("cy")?.parse().ok()?,
            })
        });

        Some(Self {
            descriptors,
            embed,
            extent,
            transform,
        })
    }

    /// True when any name/description field contains `marker`, ignoring ASCII case.
    pub fn matches_marker(&self, marker: &str) -> bool {
        let marker = marker.to_ascii_lowercase();
        self.descriptors.iter().any(|d| {
            [d.name.as_deref(), d.description.as_deref()]
                .into_iter()
                .flatten()
                .any(|field| !field.is_empty() && field.to_ascii_lowercase().contains(&marker))
        })
    }
}

/// Markup for a run holding one inline picture sized `cx`×`cy` EMU.
///
/// `wp:` and `r:` must be declared on the document root; `a:` and `pic:` are
/// declared locally the way Word writes them.
pub fn inline_picture_run(rel_id: &str, doc_pr_id: u32, cx: i64, cy: i64, name: &str) -> String {
    let name = escape_attr(name);
    format!(
        concat!(
            r#"<w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
            r#"<wp:extent cx="{cx}" cy="{cy}"/>"#,
            r#"<wp:docPr id="{id}" name="{name}"/>"#,
            r#"<a:graphic xmlns:a="{ns_a}"><a:graphicData uri="{ns_pic}">"#,
            r#"<pic:pic xmlns:pic="{ns_pic}">"#,
            r#"<pic:nvPicPr><pic:cNvPr id="0" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
            r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            r#"</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r>"#
        ),
        cx = cx,
        cy = cy,
        id = doc_pr_id,
        name = name,
        rel = rel_id,
        ns_a = NS_A,
        ns_pic = NS_PIC,
    )
}

fn escape_attr(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}
