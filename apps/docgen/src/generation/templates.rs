//! Template selection: locale code in, template file out.
//!
//! Two templates exist, English and Swedish. `en` picks the English one and
//! every other locale the Swedish one. When the picked file is missing the
//! default locale's template is used instead.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::GenerationError;
use crate::locale;

/// A template file chosen for one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateHandle {
    /// Language of the template itself (`en` or `sv`).
    pub locale: String,
    pub path: PathBuf,
}

impl TemplateHandle {
    /// Reads a private copy of the template. The file is never written.
    pub fn read(&self) -> Result<Vec<u8>, GenerationError> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// Resolves a locale to a template. Implement this to serve templates from
/// somewhere other than the local filesystem.
pub trait TemplateSource: Send + Sync {
    fn select(&self, locale: &str) -> Result<TemplateHandle, GenerationError>;
}

/// Templates on disk under a content root.
#[derive(Debug, Clone)]
pub struct FsTemplateSelector {
    content_root: PathBuf,
    path_sv: PathBuf,
    path_en: PathBuf,
    default_locale: String,
}

impl FsTemplateSelector {
    pub fn from_config(config: &Config) -> Self {
        Self {
            content_root: config.content_root.clone(),
            path_sv: config.template_path_sv.clone(),
            path_en: config.template_path_en.clone(),
            default_locale: locale::normalize(&config.default_locale)
                .unwrap_or_else(|| "sv".to_string()),
        }
    }

    fn candidate(&self, locale: &str) -> TemplateHandle {
        let (language, relative) = match locale {
            "en" => ("en", &self.path_en),
            _ => ("sv", &self.path_sv),
        };
        TemplateHandle {
            locale: language.to_string(),
            path: self.content_root.join(relative),
        }
    }
}

impl TemplateSource for FsTemplateSelector {
    fn select(&self, requested: &str) -> Result<TemplateHandle, GenerationError> {
        let requested = locale::normalize(requested).unwrap_or_else(|| self.default_locale.clone());

        let handle = self.candidate(&requested);
        if is_file(&handle.path) {
            info!(
                "Using CV template at {} (locale={})",
                handle.path.display(),
                requested
            );
            return Ok(handle);
        }

        let fallback = self.candidate(&self.default_locale);
        if is_file(&fallback.path) {
            warn!(
                "No template at {} (locale={}), falling back to {} (locale={})",
                handle.path.display(),
                requested,
                fallback.path.display(),
                self.default_locale
            );
            return Ok(fallback);
        }

        Err(GenerationError::TemplateNotFound {
            locale: requested,
            default_locale: self.default_locale.clone(),
        })
    }
}

fn is_file(path: &Path) -> bool {
    path.is_file()
}
