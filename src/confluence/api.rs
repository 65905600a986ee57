//! The seam between the exporter and the remote wiki.
//!
//! `ConfluenceClient` is the HTTP implementation; tests drive the exporter
//! through in-memory implementations of the same trait.

use thiserror::Error;

use super::models::{ChildPage, Page, PageId};

/// Result type alias for Confluence API calls
pub type ConfluenceResult<T> = Result<T, ConfluenceError>;

/// Error types for Confluence API calls
///
/// Every variant is scoped to the page or listing that produced it: the
/// exporter logs it and moves on to the next page.
#[derive(Debug, Error)]
pub enum ConfluenceError {
    /// Server answered with a non-success status code
    #[error("Status code {status} for '{url}'")]
    Status { status: u16, url: String },

    /// Request never produced a response (connect, TLS, timeout)
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the JSON shape we expect
    #[error("Unexpected response from '{url}': {message}")]
    Decode { url: String, message: String },

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ConfluenceError {
    /// Check if error is transient and the request should be retried
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Transport { .. } => true,
            Self::Decode { .. } | Self::ClientBuild(_) => false,
        }
    }

    /// HTTP status code, when the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Read access to Confluence content
///
/// Calls are awaited one at a time by the exporter; implementations do not
/// need to be shareable across threads.
#[allow(async_fn_in_trait)]
pub trait ConfluenceApi {
    /// Fetch a page with its body in storage representation
    async fn get_page(&self, id: PageId) -> ConfluenceResult<Page>;

    /// List the immediate children of a page, in API order
    ///
    /// The listing may contain non-page entries; callers filter with
    /// [`ChildPage::is_page`].
    async fn get_child_pages(&self, id: PageId) -> ConfluenceResult<Vec<ChildPage>>;
}
