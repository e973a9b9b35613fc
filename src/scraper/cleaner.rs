// cleaner.rs

/// Boilerplate labels listing sites put in front of the actual description.
pub const DESCRIPTION_PREFIXES: [&str; 6] = [
    "Property Description:",
    "Description:",
    "About this property:",
    "Property Details:",
    "Listed by:",
    "Listing provided by:",
];

pub const MAX_DESCRIPTION_CHARS: usize = 2000;
pub const TRUNCATION_MARKER: &str = "...";

/// Normalizes scraped description text.
///
/// - every whitespace run becomes a single space, ends are trimmed
/// - known label prefixes are stripped (repeatedly, so stacked labels go too)
/// - text longer than [`MAX_DESCRIPTION_CHARS`] is cut and marked with [`TRUNCATION_MARKER`]
///
/// Cleaning is idempotent: re-cutting truncated text keeps the same first
/// `MAX_DESCRIPTION_CHARS` characters and appends the same marker.
pub fn clean_description(raw: &str) -> String {
    let mut text = collapse_whitespace(raw);

    while let Some(rest) = DESCRIPTION_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
    {
        text = rest.trim().to_string();
    }

    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let mut truncated: String = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
        truncated.push_str(TRUNCATION_MARKER);
        text = truncated;
    }

    text
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
