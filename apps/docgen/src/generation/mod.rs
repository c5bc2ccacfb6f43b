// CV document generation.
// Implements: template selection, placeholder diagnostics, run-merging substitution,
// photo placement, and the generate entry point.
// Generation is CPU-bound; async hosts go through generate_async (spawn_blocking).

pub mod diagnostics;
pub mod generator;
pub mod photo;
pub mod substitution;
pub mod templates;

// Re-export the public API consumed by hosts.
pub use generator::{CvDocumentGenerator, GeneratedDocument};
pub use photo::{PhotoOutcome, SkipReason};
pub use templates::{FsTemplateSelector, TemplateHandle, TemplateSource};
