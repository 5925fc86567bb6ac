/// Lower-case and collapse whitespace so free-text keys compare reliably.
pub fn normalize_key(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// Normalize a tag list, dropping blanks and keeping the first occurrence of duplicates.
pub fn normalize_tags<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags: Vec<String> = Vec::new();
    for value in values {
        let tag = normalize_key(value.as_ref());
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Split a comma-joined export cell such as `teaching,coding` into normalized tags.
pub fn split_tags(value: &str) -> Vec<String> {
    normalize_tags(value.split(','))
}
