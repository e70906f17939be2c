use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use compliance_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Builds the index URL to fetch for an operator-supplied seed domain
///
/// Targets without an `http://` or `https://` scheme are fetched over plain
/// `http://`; redirects take care of the rest.
///
/// # Examples
///
/// ```
/// use compliance_crawler::url::seed_url;
///
/// assert_eq!(seed_url("example.com").unwrap().as_str(), "http://example.com/");
/// assert_eq!(seed_url("https://example.com").unwrap().as_str(), "https://example.com/");
/// ```
pub fn seed_url(target: &str) -> UrlResult<Url> {
    let target = target.trim();
    let candidate = if target.starts_with("http://") || target.starts_with("https://") {
        target.to_string()
    } else {
        format!("http://{}", target)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(format!("{}: {}", target, e)))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(target.to_string()));
    }

    Ok(url)
}
