//! HTML parser for extracting anchors
//!
//! The coordinator needs the raw href and the visible text of every
//! `<a href>` on an index page; filtering and resolution happen later.

use scraper::{Html, Selector};

/// An anchor found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Visible text content, unsanitized
    pub text: String,

    /// The `href` attribute exactly as written
    pub href: String,
}

/// Returns true when a Content-Type denotes a page worth parsing
///
/// A missing header is given the benefit of the doubt.
pub fn is_html(content_type: Option<&str>) -> bool {
    content_type.map_or(true, |value| {
        let value = value.to_ascii_lowercase();
        value.contains("text/html") || value.contains("application/xhtml")
    })
}

/// Extracts every `<a href>` of an HTML document, in document order
///
/// # Example
///
/// ```
/// use compliance_crawler::crawler::extract_anchors;
///
/// let anchors = extract_anchors(r#"<footer><a href="/impressum">Impressum</a></footer>"#);
/// assert_eq!(anchors[0].href, "/impressum");
/// assert_eq!(anchors[0].text, "Impressum");
/// ```
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            element.value().attr("href").map(|href| Anchor {
                text: element.text().collect(),
                href: href.to_string(),
            })
        })
        .collect()
}
