//! Word (WordprocessingML) packages held fully in memory.
//!
//! A template is opened into a [`Document`], mutated in place and serialised
//! into a fresh package. The source bytes are never written to.

pub mod document;
pub mod drawing;
pub mod package;
pub mod relationships;
pub mod xml;

#[cfg(test)]
pub(crate) mod fixtures;

use thiserror::Error;

pub use document::{extract_text, Document, Paragraph};
pub use drawing::{GraphicObject, MetadataSource};

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("package has no part named {0}")]
    MissingPart(String),

    #[error("malformed document: {0}")]
    Malformed(String),
}
