//! Serde models for the subset of the Confluence content API used by the exporter.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Numeric Confluence content identifier
///
/// The API serializes ids as strings (`"id": "123"`); numbers are accepted too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(pub u64);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PageId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(PageId)
    }
}

impl From<u64> for PageId {
    fn from(value: u64) -> Self {
        PageId(value)
    }
}

impl<'de> Deserialize<'de> for PageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Ok(PageId(n)),
            RawId::Text(s) => s
                .parse()
                .map_err(|e| serde::de::Error::custom(format!("invalid page id '{s}': {e}"))),
        }
    }
}

/// A page as returned by `GET /rest/api/content/{id}?expand=body.storage`
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub body: PageBody,
}

impl Page {
    /// Raw storage-format markup of the page body
    #[must_use]
    pub fn storage_value(&self) -> &str {
        &self.body.storage.value
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageBody {
    pub storage: StorageFormat,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageFormat {
    pub value: String,
    #[serde(default)]
    pub representation: Option<String>,
}

/// One entry of a child listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChildPage {
    pub id: PageId,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: String,
}

impl ChildPage {
    /// Only `page` entries are traversed; attachments, blog posts and
    /// comments are ignored.
    #[must_use]
    pub fn is_page(&self) -> bool {
        self.content_type == "page"
    }
}

/// Response of `GET /rest/api/content/{id}/child/page`
#[derive(Debug, Clone, Deserialize)]
pub struct ChildPagesResponse {
    pub results: Vec<ChildPage>,
    #[serde(rename = "_links", default)]
    pub links: ResponseLinks,
}

impl ChildPagesResponse {
    /// Continuation link for the next result page, if the listing is paginated
    #[must_use]
    pub fn next_link(&self) -> Option<&str> {
        self.links.next.as_deref().filter(|next| !next.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseLinks {
    #[serde(default)]
    pub next: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_storage_body() {
        let json = r#"{
            "id": "123",
            "type": "page",
            "title": "Setup Guide",
            "body": {"storage": {"value": "<p>Hello</p>", "representation": "storage"}}
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.id, PageId(123));
        assert_eq!(page.title, "Setup Guide");
        assert_eq!(page.storage_value(), "<p>Hello</p>");
    }

    #[test]
    fn test_page_without_body_is_rejected() {
        let json = r#"{"id": "123", "title": "No body"}"#;
        assert!(serde_json::from_str::<Page>(json).is_err());
    }

    #[test]
    fn test_child_listing_with_mixed_types() {
        let json = r#"{
            "results": [
                {"id": "1", "title": "One", "type": "page"},
                {"id": 2, "title": "Two", "type": "attachment"}
            ],
            "start": 0,
            "limit": 25,
            "size": 2,
            "_links": {"next": "/rest/api/content/9/child/page?start=25", "base": "https://wiki"}
        }"#;
        let listing: ChildPagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(listing.results.len(), 2);
        assert!(listing.results[0].is_page());
        assert!(!listing.results[1].is_page());
        assert_eq!(listing.results[1].id, PageId(2));
        assert_eq!(listing.next_link(), Some("/rest/api/content/9/child/page?start=25"));
    }

    #[test]
    fn test_child_listing_without_links() {
        let listing: ChildPagesResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(listing.results.is_empty());
        assert_eq!(listing.next_link(), None);
    }

    #[test]
    fn test_page_id_rejects_non_numeric() {
        assert!(serde_json::from_str::<PageId>(r#""abc""#).is_err());
        assert_eq!("  42 ".parse::<PageId>().unwrap(), PageId(42));
    }
}
