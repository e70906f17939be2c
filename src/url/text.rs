use crate::url::resolve::clean_href;

/// Collapses every run of whitespace in anchor text into one space
///
/// The input is DOM text (markup removed and entities decoded by the HTML
/// parser), so a `<` or `&` in it is literal text.
///
/// # Examples
///
/// ```
/// use compliance_crawler::url::sanitize_text;
///
/// assert_eq!(sanitize_text("  Daten\n   schutz\u{a0}"), "Daten schutz");
/// assert_eq!(sanitize_text("<< Datenschutz"), "<< Datenschutz");
/// ```
pub fn sanitize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reports whether an anchor is worth evaluating at all
///
/// Pure fragments (`#...`), `javascript:` pseudo-links and anchors without
/// visible text (an image-only logo link, for instance) are not followed.
pub fn is_followable_text(href: &str, text: &str) -> bool {
    let href = clean_href(href);
    if href.starts_with('#') || href.to_lowercase().starts_with("javascript:") {
        return false;
    }

    !sanitize_text(text).is_empty()
}
