/// Keys that never occur in `template_text`, ignoring ASCII case, in key order.
///
/// Run this on the template before substitution: afterwards the tokens are gone
/// and every key would look missing.
pub fn find_missing_placeholders<'a>(
    template_text: &str,
    keys: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let haystack = template_text.to_ascii_lowercase();
    let mut seen: Vec<String> = Vec::new();
    let mut missing = Vec::new();

    for key in keys {
        let needle = key.to_ascii_lowercase();
        if key.trim().is_empty() || seen.contains(&needle) {
            continue;
        }
        if !haystack.contains(&needle) {
            missing.push(key.to_string());
        }
        seen.push(needle);
    }
    missing
}
