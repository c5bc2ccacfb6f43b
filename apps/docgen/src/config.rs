use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::imaging::PixelBox;

/// Generator configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory template paths are resolved against.
    pub content_root: PathBuf,
    pub template_path_sv: PathBuf,
    pub template_path_en: PathBuf,
    pub default_locale: String,
    /// Box for a photo written into an existing marked picture.
    pub photo_replace_box: PixelBox,
    /// Box for a photo inserted at a `|photo|` paragraph.
    pub photo_insert_box: PixelBox,
    /// Write `\n` in substituted text as real line breaks.
    pub render_line_breaks: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            content_root: PathBuf::from(env_or("CV_CONTENT_ROOT", ".")),
            template_path_sv: PathBuf::from(require_env("CV_TEMPLATE_PATH_SV")?),
            template_path_en: PathBuf::from(require_env("CV_TEMPLATE_PATH_EN")?),
            default_locale: env_or("CV_DEFAULT_LOCALE", "sv"),
            photo_replace_box: PixelBox::new(
                parse_env("CV_PHOTO_REPLACE_MAX_WIDTH", 600)?,
                parse_env("CV_PHOTO_REPLACE_MAX_HEIGHT", 600)?,
            ),
            photo_insert_box: PixelBox::new(
                parse_env("CV_PHOTO_INSERT_MAX_WIDTH", 180)?,
                parse_env("CV_PHOTO_INSERT_MAX_HEIGHT", 20)?,
            ),
            render_line_breaks: parse_env("CV_RENDER_LINE_BREAKS", true)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Defaults for everything but the two template paths.
    pub fn with_templates(
        content_root: impl Into<PathBuf>,
        template_path_sv: impl Into<PathBuf>,
        template_path_en: impl Into<PathBuf>,
    ) -> Self {
        Config {
            content_root: content_root.into(),
            template_path_sv: template_path_sv.into(),
            template_path_en: template_path_en.into(),
            default_locale: "sv".to_string(),
            photo_replace_box: PixelBox::new(600, 600),
            photo_insert_box: PixelBox::new(180, 20),
            render_line_breaks: true,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
