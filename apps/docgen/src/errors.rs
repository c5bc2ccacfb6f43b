use thiserror::Error;

use crate::docx::DocxError;
use crate::imaging::ImagePrepError;

/// Failure of one document generation call. No partial document is ever
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Template not found (locale={locale}) nor default (locale={default_locale})")]
    TemplateNotFound {
        locale: String,
        default_locale: String,
    },

    #[error("Malformed template: {0}")]
    MalformedTemplate(String),

    #[error("Image decode failure: {0}")]
    ImageDecode(#[from] ImagePrepError),

    #[error("Package error: {0}")]
    Package(DocxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<DocxError> for GenerationError {
    /// Structural problems in the template are reported as such; everything
    /// else from the package layer stays a package error.
    fn from(err: DocxError) -> Self {
        match err {
            DocxError::MissingPart(_) | DocxError::Malformed(_) => {
                GenerationError::MalformedTemplate(err.to_string())
            }
            other => GenerationError::Package(other),
        }
    }
}
