//! CV document generation: the single entry point that turns résumé data into
//! a filled-in Word document.
//!
//! Flow: select template → open a private copy → build replacement map →
//! report missing placeholders → substitute text → place photo → serialise.
//!
//! Every call owns its document from open to serialise; nothing is shared
//! between calls, so concurrent generation needs no locking.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::docx::Document;
use crate::errors::GenerationError;
use crate::generation::diagnostics::find_missing_placeholders;
use crate::generation::photo::{resolve_photo, PhotoBoxes, PhotoOutcome};
use crate::generation::substitution::{apply_replacements, SubstitutionOptions};
use crate::generation::templates::{FsTemplateSelector, TemplateSource};
use crate::locale;
use crate::models::ResumeData;
use crate::placeholders::{build_replacement_map, labels};

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

/// A generated document plus what happened while producing it.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Language of the template that was filled in.
    pub locale: String,
    pub template: PathBuf,
    #[serde(skip)]
    pub bytes: Bytes,
    /// Map keys the template never mentions. Advisory only.
    pub missing_placeholders: Vec<String>,
    pub photo: PhotoOutcome,
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

pub struct CvDocumentGenerator {
    config: Config,
    templates: Arc<dyn TemplateSource>,
}

impl CvDocumentGenerator {
    /// Generator reading templates from disk as configured.
    pub fn new(config: Config) -> Result<Self, GenerationError> {
        let templates = Arc::new(FsTemplateSelector::from_config(&config));
        Self::with_template_source(config, templates)
    }

    pub fn with_template_source(
        config: Config,
        templates: Arc<dyn TemplateSource>,
    ) -> Result<Self, GenerationError> {
        if locale::normalize(&config.default_locale).is_none() {
            return Err(GenerationError::Config(
                "default locale must not be blank".to_string(),
            ));
        }
        Ok(Self { config, templates })
    }

    /// Fills the template for `locale` with `resume`.
    ///
    /// `locale` falls back to the résumé's own locale, then the configured
    /// default. Any failure aborts the call; no partial document is returned.
    pub fn generate(
        &self,
        resume: &ResumeData,
        locale: Option<&str>,
    ) -> Result<GeneratedDocument, GenerationError> {
        let id = Uuid::new_v4();
        let span = info_span!("generate_cv", generation_id = %id);
        let _entered = span.enter();

        let result = self.run(id, resume, locale);
        if let Err(e) = &result {
            error!("CV generation failed: {e}");
        }
        result
    }

    /// [`generate`](Self::generate) on the blocking pool, for async hosts.
    pub async fn generate_async(
        self: Arc<Self>,
        resume: ResumeData,
        locale: Option<String>,
    ) -> Result<GeneratedDocument, GenerationError> {
        tokio::task::spawn_blocking(move || self.generate(&resume, locale.as_deref()))
            .await
            .map_err(|e| {
                GenerationError::Internal(anyhow::anyhow!("spawn_blocking failed in generation: {e}"))
            })?
    }

    fn run(
        &self,
        id: Uuid,
        resume: &ResumeData,
        requested: Option<&str>,
    ) -> Result<GeneratedDocument, GenerationError> {
        let locale = locale::effective(
            requested,
            resume.locale.as_deref(),
            &self.config.default_locale,
        );
        let template = self.templates.select(&locale)?;
        let mut document = Document::open(&template.read()?)?;

        info!(
            "CV input: name='{}', title='{}', summary={}, educations={}, work={}, employers={}, competencies={}, certificates={}, languages={}",
            resume.name().unwrap_or_default(),
            resume.title().unwrap_or_default(),
            if resume.summary.as_deref().is_some_and(|s| !s.trim().is_empty()) { "yes" } else { "no" },
            count(&resume.educations),
            count(&resume.work_experiences),
            count(&resume.employers),
            count(&resume.competencies),
            count(&resume.certificates),
            count(&resume.languages),
        );

        let map = build_replacement_map(resume, labels::for_locale(&template.locale));

        let missing_placeholders = find_missing_placeholders(&document.text(), map.keys());
        if !missing_placeholders.is_empty() {
            warn!(
                "Placeholders missing from template: {}",
                missing_placeholders.join(", ")
            );
        }

        let stats = apply_replacements(
            &mut document,
            &map,
            SubstitutionOptions {
                render_line_breaks: self.config.render_line_breaks,
            },
        );
        debug!(
            "Substituted {} tokens in {} paragraphs ({} contained a delimiter)",
            stats.replacements, stats.paragraphs_rewritten, stats.paragraphs_with_delimiter
        );

        let photo = resolve_photo(
            &mut document,
            resume.photo_base64(),
            PhotoBoxes {
                replace: self.config.photo_replace_box,
                insert: self.config.photo_insert_box,
            },
        )?;
        info!("Photo: {:?}", photo);

        let generated_at = Utc::now();
        document.set_modified(generated_at)?;
        let bytes = Bytes::from(document.to_bytes()?);
        info!("Generated CV document {} ({} bytes)", id, bytes.len());

        Ok(GeneratedDocument {
            id,
            generated_at,
            locale: template.locale,
            template: template.path,
            bytes,
            missing_placeholders,
            photo,
        })
    }
}

fn count<T>(items: &Option<Vec<T>>) -> usize {
    items.as_ref().map_or(0, Vec::len)
}
