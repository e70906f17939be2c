use crate::url::domain::extract_domain;
use crate::{UrlError, UrlResult};
use serde::Deserialize;
use url::{ParseError, Url};

/// How a relative href that is neither root-relative nor a fragment is resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeLinkStrategy {
    /// Treat `privacy` like `/privacy`
    ///
    /// Many sites write document-relative links where they mean root-relative
    /// ones; resolving them literally produces far more 404s than this
    /// rewrite loses.
    #[default]
    Root,

    /// Standard RFC 3986 reference resolution
    Literal,
}

/// A parsed href: either already absolute or relative to the page
enum Href {
    Absolute(Url),
    Relative(String),
}

/// Removes the whitespace and control characters broken markup embeds in hrefs
pub(crate) fn clean_href(raw_href: &str) -> String {
    raw_href
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect::<String>()
        .trim_matches(|c: char| c.is_whitespace() || c.is_control())
        .to_string()
}

fn parse_href(raw_href: &str) -> UrlResult<Href> {
    let href = clean_href(raw_href);
    match Url::parse(&href) {
        Ok(url) => Ok(Href::Absolute(url)),
        Err(ParseError::RelativeUrlWithoutBase) => Ok(Href::Relative(href)),
        Err(e) => Err(UrlError::Parse(format!("{}: {}", href, e))),
    }
}

/// Resolves a possibly malformed href found on `base_url` to an absolute URL
///
/// # Steps
///
/// 1. Strip `\r`, `\n`, `\t` and surrounding whitespace from the href
/// 2. Parse it; a parse failure is an error, there is no fallback
/// 3. Absolute hrefs are returned as they are
/// 4. With [`RelativeLinkStrategy::Root`], a relative href that does not start
///    with `/` or `#` gets a leading `/`
/// 5. The reference is joined onto `base_url`
///
/// # Examples
///
/// ```
/// use compliance_crawler::url::{resolve_link, RelativeLinkStrategy};
/// use url::Url;
///
/// let base = Url::parse("http://a.com/page/").unwrap();
/// let url = resolve_link(&base, "privacy", RelativeLinkStrategy::Root).unwrap();
/// assert_eq!(url.as_str(), "http://a.com/privacy");
///
/// let url = resolve_link(&base, "privacy", RelativeLinkStrategy::Literal).unwrap();
/// assert_eq!(url.as_str(), "http://a.com/page/privacy");
/// ```
pub fn resolve_link(
    base_url: &Url,
    raw_href: &str,
    strategy: RelativeLinkStrategy,
) -> UrlResult<Url> {
    let relative = match parse_href(raw_href)? {
        Href::Absolute(url) => return Ok(url),
        Href::Relative(href) => href,
    };

    let reference = match strategy {
        RelativeLinkStrategy::Root if !relative.starts_with('/') && !relative.starts_with('#') => {
            format!("/{}", relative)
        }
        _ => relative,
    };

    base_url
        .join(&reference)
        .map_err(|e| UrlError::Malformed(format!("{} against {}: {}", reference, base_url, e)))
}

/// Reports whether `href` points to a different host than `base_url`
///
/// Relative hrefs are never external. Scheme and port are not compared.
///
/// # Examples
///
/// ```
/// use compliance_crawler::url::is_external;
/// use url::Url;
///
/// let base = Url::parse("https://a.com/").unwrap();
/// assert!(!is_external(&base, "/impressum").unwrap());
/// assert!(!is_external(&base, "http://A.com:8080/x").unwrap());
/// assert!(is_external(&base, "https://b.com/").unwrap());
/// ```
pub fn is_external(base_url: &Url, href: &str) -> UrlResult<bool> {
    match parse_href(href)? {
        Href::Relative(_) => Ok(false),
        Href::Absolute(url) => Ok(extract_domain(&url) != extract_domain(base_url)),
    }
}
