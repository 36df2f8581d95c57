//! URL resolution for links found on catalog pages
//!
//! Every link on a page is relative to *that* page. Listing pages live one or
//! more path segments below the site root (`/catalogue/page-2.html`), so resolving
//! against a fixed root silently produces wrong URLs. Callers always pass the URL
//! of the page the link was found on.

use crate::CrawlError;
use url::Url;

/// Resolves a possibly-relative link against the URL of the page containing it
///
/// Follows standard relative reference resolution: absolute links are returned
/// as-is, `../` segments climb from the base's directory, and an empty link
/// resolves to the base itself.
///
/// # Errors
///
/// Returns `CrawlError::Resolution` only when the link is structurally malformed
/// (for example an invalid port or host).
///
/// # Example
///
/// ```
/// use catalog_crawler::url::resolve;
/// use url::Url;
///
/// let page = Url::parse("http://example.com/catalogue/page-2.html").unwrap();
/// let detail = resolve(&page, "a-light-in-the-attic_1000/index.html").unwrap();
/// assert_eq!(
///     detail.as_str(),
///     "http://example.com/catalogue/a-light-in-the-attic_1000/index.html"
/// );
/// ```
pub fn resolve(base: &Url, href: &str) -> Result<Url, CrawlError> {
    base.join(href.trim()).map_err(|source| CrawlError::Resolution {
        base: base.to_string(),
        href: href.to_string(),
        source,
    })
}
