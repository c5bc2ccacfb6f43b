//! Run-merging text substitution.
//!
//! Word splits text into runs wherever formatting changed at some point, so a
//! token like `|name|` may be stored as `|na` + `me|`. Matching therefore works
//! on each paragraph's concatenated text; the result goes back into the first
//! fragment and the others are emptied (not removed), which keeps the first
//! run's style and every bookmark, field and drawing between the runs.

use serde::Serialize;

use crate::docx::Document;
use crate::placeholders::{ReplacementMap, DELIMITER};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionOptions {
    pub render_line_breaks: bool,
}

impl Default for SubstitutionOptions {
    fn default() -> Self {
        Self {
            render_line_breaks: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubstitutionStats {
    pub paragraphs_with_delimiter: usize,
    pub paragraphs_rewritten: usize,
    pub replacements: usize,
}

/// Substitutes every map entry into every body paragraph.
///
/// Paragraphs without a delimiter, or whose text comes out unchanged, are not
/// touched at all and serialise byte for byte as before.
pub fn apply_replacements(
    document: &mut Document,
    map: &ReplacementMap,
    options: SubstitutionOptions,
) -> SubstitutionStats {
    let mut stats = SubstitutionStats::default();

    document.for_each_paragraph_mut(|paragraph| {
        let original = paragraph.text();
        if !original.contains(DELIMITER) {
            return;
        }
        stats.paragraphs_with_delimiter += 1;

        let mut text = original.clone();
        let mut count = 0;
        for (key, value) in map.iter() {
            let (next, n) = replace_ignore_ascii_case(&text, key, value);
            if n > 0 {
                text = next;
                count += n;
            }
        }

        if count == 0 || text == original {
            return;
        }
        if paragraph.rewrite_fragments(&text, options.render_line_breaks) {
            stats.paragraphs_rewritten += 1;
            stats.replacements += count;
        }
    });

    stats
}

/// Replaces every occurrence of `search` in `input`, ignoring ASCII case.
/// Returns the new string and the number of replacements.
pub fn replace_ignore_ascii_case(input: &str, search: &str, replacement: &str) -> (String, usize) {
    if search.is_empty() || input.len() < search.len() {
        return (input.to_string(), 0);
    }

    let haystack = input.as_bytes();
    let needle = search.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut count = 0;
    let mut copied = 0;
    let mut i = 0;

    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            out.push_str(&input[copied..i]);
            out.push_str(replacement);
            i += needle.len();
            copied = i;
            count += 1;
        } else {
            i += 1;
        }
    }
    out.push_str(&input[copied..]);
    (out, count)
}
