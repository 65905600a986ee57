//! URL and path manipulation utilities.
//!
//! This module provides functions for building Confluence API URLs
//! from the user supplied wiki base URL.

use anyhow::Result;
use url::Url;

use super::constants::CONTENT_API_PATH;

/// Join URL segments with a single `/`, stripping extra slashes at the seams
///
/// ```
/// # use confluence_adoc::utils::slash_join;
/// assert_eq!(
///     slash_join(&["https://wiki.example.com/", "/rest/api", "content"]),
///     "https://wiki.example.com/rest/api/content"
/// );
/// ```
#[must_use]
pub fn slash_join(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build the content API root (`<wiki>/rest/api/content`) for a wiki base URL
///
/// # Errors
///
/// Returns an error when the wiki URL does not parse or is not http(s).
pub fn content_api_root(wiki_url: &str) -> Result<String> {
    if !is_valid_url(wiki_url) {
        return Err(anyhow::anyhow!("Invalid wiki URL: '{wiki_url}'"));
    }
    Ok(slash_join(&[wiki_url, CONTENT_API_PATH]))
}

/// Resolve a `_links.next` continuation path against the wiki base URL
///
/// Confluence returns continuation links relative to the wiki base
/// (for example `/rest/api/content/123/child/page?start=25&limit=25`).
/// Absolute links are returned unchanged.
pub fn resolve_continuation(wiki_url: &str, next: &str) -> Result<String> {
    if Url::parse(next).is_ok() {
        return Ok(next.to_string());
    }

    let base = wiki_url.trim_end_matches('/');
    let path = next.trim_start_matches('/');
    let joined = format!("{base}/{path}");

    Url::parse(&joined).map_err(|e| anyhow::anyhow!("Failed to resolve continuation link '{next}': {e}"))?;
    Ok(joined)
}

/// Check if a URL is valid
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some(),
        Err(_) => false,
    }
}
