//! Template-preserving CV document generation.
//!
//! Fills a designer-authored Word template with structured résumé data while
//! keeping its styling, layout and embedded graphics intact.

pub mod config;
pub mod docx;
pub mod errors;
pub mod generation;
pub mod imaging;
pub mod locale;
pub mod models;
pub mod placeholders;
pub mod telemetry;

pub use config::Config;
pub use errors::GenerationError;
pub use generation::{CvDocumentGenerator, GeneratedDocument, PhotoOutcome};
pub use models::ResumeData;
