//! Relationship parts (`*.rels`) and `[Content_Types].xml`.

use super::xml::{XmlElement, XmlNode, XmlTree};
use super::DocxError;

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
    pub external: bool,
}

/// One `.rels` part. Kept as an XML tree so unknown attributes survive a save.
#[derive(Debug, Clone)]
pub struct Relationships {
    tree: XmlTree,
}

impl Relationships {
    pub fn parse(bytes: &[u8]) -> Result<Self, DocxError> {
        Ok(Self {
            tree: XmlTree::parse(bytes)?,
        })
    }

    pub fn empty() -> Result<Self, DocxError> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{RELATIONSHIPS_NS}"></Relationships>"#
        );
        Self::parse(xml.as_bytes())
    }

    pub fn iter(&self) -> impl Iterator<Item = Relationship> + '_ {
        self.tree
            .root()
            .into_iter()
            .flat_map(|root| root.elements())
            .filter(|e| e.is("Relationship"))
            .filter_map(|e| {
                Some(Relationship {
                    id: e.attr("Id")?,
                    rel_type: e.attr("Type").unwrap_or_default(),
                    target: e.attr("Target")?,
                    external: e
                        .attr("TargetMode")
                        .is_some_and(|m| m.eq_ignore_ascii_case("External")),
                })
            })
    }

    pub fn get(&self, id: &str) -> Option<Relationship> {
        self.iter().find(|r| r.id == id)
    }

    pub fn first_of_type(&self, rel_type: &str) -> Option<Relationship> {
        self.iter().find(|r| r.rel_type == rel_type)
    }

    /// Appends a relationship with a fresh `rIdN` id and returns the id.
    pub fn add(&mut self, rel_type: &str, target: &str) -> Result<String, DocxError> {
        let next = self
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId")?.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let id = format!("rId{next}");

        let root = self
            .tree
            .root_mut()
            .ok_or_else(|| DocxError::Malformed("relationships part has no root".into()))?;
        root.push(XmlNode::Element(
            XmlElement::new("Relationship")
                .with_attr("Id", &id)
                .with_attr("Type", rel_type)
                .with_attr("Target", target),
        ));
        Ok(id)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        self.tree.to_bytes()
    }
}

/// `[Content_Types].xml`.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    tree: XmlTree,
}

impl ContentTypes {
    pub const PART: &'static str = "[Content_Types].xml";

    pub fn parse(bytes: &[u8]) -> Result<Self, DocxError> {
        Ok(Self {
            tree: XmlTree::parse(bytes)?,
        })
    }

    pub fn has_default(&self, extension: &str) -> bool {
        self.tree.root().is_some_and(|root| {
            root.elements().any(|e| {
                e.is("Default")
                    && e.attr("Extension")
                        .is_some_and(|x| x.eq_ignore_ascii_case(extension))
            })
        })
    }

    /// Registers a `Default` content type for an extension unless one exists.
    pub fn ensure_default(&mut self, extension: &str, content_type: &str) -> Result<(), DocxError> {
        if self.has_default(extension) {
            return Ok(());
        }
        let root = self
            .tree
            .root_mut()
            .ok_or_else(|| DocxError::Malformed("content types part has no root".into()))?;
        // Defaults conventionally precede Overrides.
        let at = root
            .children
            .iter()
            .position(|n| matches!(n, XmlNode::Element(e) if e.is("Override")))
            .unwrap_or(root.children.len());
        root.children.insert(
            at,
            XmlNode::Element(
                XmlElement::new("Default")
                    .with_attr("Extension", extension)
                    .with_attr("ContentType", content_type),
            ),
        );
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        self.tree.to_bytes()
    }
}
