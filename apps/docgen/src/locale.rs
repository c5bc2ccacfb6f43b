//! Locale codes as they arrive from callers: `"en"`, `"EN-gb"`, `" sv_SE "`.

/// Lowercased primary subtag, or `None` for a blank code.
pub fn normalize(raw: &str) -> Option<String> {
    let primary = raw
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .trim();
    (!primary.is_empty()).then(|| primary.to_ascii_lowercase())
}

/// First non-blank of the explicit locale, the résumé's own locale and the default.
pub fn effective(explicit: Option<&str>, resume: Option<&str>, default: &str) -> String {
    explicit
        .and_then(normalize)
        .or_else(|| resume.and_then(normalize))
        .or_else(|| normalize(default))
        .unwrap_or_default()
}
