//! Link classification
//!
//! Maps an anchor's text (and optionally its href) to a [`PageType`] using a
//! single ordered keyword table.

mod page_type;

pub use page_type::PageType;

/// Keyword table, checked in order; the first contained keyword wins
///
/// Keywords are lowercase. Category order is privacy, imprint, terms, contact.
pub const KEYWORDS: &[(&str, PageType)] = &[
    ("privacy", PageType::Privacy),
    ("datenschutz", PageType::Privacy),
    ("imprint", PageType::Imprint),
    ("impressum", PageType::Imprint),
    ("agb", PageType::Terms),
    ("terms", PageType::Terms),
    ("contact", PageType::Contact),
    ("kontakt", PageType::Contact),
];

/// Classifies a link by its text only
///
/// `link_text` must already be sanitized (see
/// [`crate::url::sanitize_text`]). `link_href` is accepted for parity with
/// [`Classifier::classify`] but not inspected.
///
/// # Examples
///
/// ```
/// use compliance_crawler::classify::{classify, PageType};
///
/// assert_eq!(classify("Datenschutzerklärung", "/ds"), PageType::Privacy);
/// assert_eq!(classify("Über uns", "/about"), PageType::Unknown);
/// ```
pub fn classify(link_text: &str, link_href: &str) -> PageType {
    let _ = link_href;
    match_keywords(link_text)
}

fn match_keywords(haystack: &str) -> PageType {
    let haystack = haystack.to_lowercase();
    if haystack.trim().is_empty() {
        return PageType::Unknown;
    }

    KEYWORDS
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, page_type)| *page_type)
        .unwrap_or(PageType::Unknown)
}

/// Configurable link classifier
///
/// With `match_href` disabled this is exactly [`classify`]. With it enabled,
/// a link whose text matches nothing is tested again on its href path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    match_href: bool,
}

impl Classifier {
    pub fn new(match_href: bool) -> Self {
        Self { match_href }
    }

    pub fn classify(&self, link_text: &str, link_href: &str) -> PageType {
        let by_text = classify(link_text, link_href);
        if by_text != PageType::Unknown || !self.match_href {
            return by_text;
        }

        match_keywords(href_path(link_href))
    }
}

/// Strips scheme, host, query and fragment from an href, leaving the path
fn href_path(href: &str) -> &str {
    let without_fragment = href.split('#').next().unwrap_or_default();
    let without_query = without_fragment.split('?').next().unwrap_or_default();

    match without_query.find("://") {
        Some(scheme_end) => {
            let rest = &without_query[scheme_end + 3..];
            rest.find('/').map(|path| &rest[path..]).unwrap_or_default()
        }
        None => without_query,
    }
}
