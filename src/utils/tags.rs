//! Tag codec for the `tags_csv` column.
//!
//! Tags are stored as a single separator-delimited string with the separator
//! on both ends (`,rust,web,`), or as the empty string when there are none.
//! Wrapping a tag in separators therefore gives an exact membership fragment:
//! `,web,` is contained in `,rust,web,` while `,we,` is not.

pub const TAG_SEPARATOR: char = ',';

fn sanitize_tags<S: AsRef<str>>(tags: &[S]) -> Vec<&str> {
    tags.iter()
        .map(|tag| tag.as_ref().trim())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Encodes tags into the stored form.
///
/// Each tag is trimmed and empty results are dropped. Order and duplicates
/// are kept as given.
pub fn encode_tags<S: AsRef<str>>(tags: &[S]) -> String {
    let cleaned = sanitize_tags(tags);
    if cleaned.is_empty() {
        return String::new();
    }
    let separator = TAG_SEPARATOR.to_string();
    format!(
        "{TAG_SEPARATOR}{}{TAG_SEPARATOR}",
        cleaned.join(&separator)
    )
}

/// Decodes the stored form back into a list of tags.
pub fn decode_tags(tags_csv: &str) -> Vec<String> {
    tags_csv
        .split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Surrounds a trimmed tag with separators for containment matching.
///
/// A tag that itself contains the separator produces a fragment that can
/// never match a single stored tag.
pub fn wrap_tag(tag: &str) -> String {
    format!("{TAG_SEPARATOR}{}{TAG_SEPARATOR}", tag.trim())
}
