//! Placeholder tokens and the data rendered into them.
//!
//! Templates mark insertion points with pipe-delimited keys such as `|name|`.
//! Keys are ASCII and matched ignoring case; the delimiters are part of every
//! token, which keeps keys from matching inside one another.

pub mod labels;
pub mod map;
pub mod sections;

pub use labels::SectionLabels;
pub use map::{build_replacement_map, ReplacementMap};

pub const DELIMITER: char = '|';

pub const NAME: &str = "name";
pub const TITLE: &str = "title";
pub const SUMMARY: &str = "summary";
pub const EDUCATIONS: &str = "educations";
pub const WORK_EXPERIENCES: &str = "workexperiences";
pub const EMPLOYERS: &str = "employers";
pub const COMPETENCIES: &str = "competencies";
pub const CERTIFICATES: &str = "certificates";
pub const LANGUAGES: &str = "languages";
pub const OTHER: &str = "other";

/// Marks the photo slot, in picture metadata or in a paragraph's text.
pub const PHOTO: &str = "photo";

/// Text keys in substitution order.
pub const TEXT_KEYS: [&str; 10] = [
    NAME,
    TITLE,
    SUMMARY,
    EDUCATIONS,
    WORK_EXPERIENCES,
    EMPLOYERS,
    COMPETENCIES,
    CERTIFICATES,
    LANGUAGES,
    OTHER,
];

/// `key` wrapped in delimiters: `name` → `|name|`.
pub fn token(key: &str) -> String {
    format!("{DELIMITER}{key}{DELIMITER}")
}
