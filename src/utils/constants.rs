//! Shared configuration constants for confluence-adoc
//!
//! This module contains default values and fixed strings used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Path appended to the wiki base URL to reach the content REST API
pub const CONTENT_API_PATH: &str = "rest/api/content";

/// Expansion requested when fetching a page body in storage representation
pub const STORAGE_EXPAND: &str = "body.storage";

/// File extension of exported documents
pub const ASCIIDOC_EXTENSION: &str = "adoc";

/// Environment variable holding the Confluence user name
pub const USERNAME_ENV: &str = "CONFLUENCE_USERNAME";

/// Environment variable holding the Confluence password or API token
pub const PASSWORD_ENV: &str = "CONFLUENCE_PASSWORD";

/// Default timeout for a single HTTP request: 30 seconds
///
/// Long enough for large pages on slow instances; a hung server no longer
/// stalls the export forever.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of retries for transient HTTP failures
///
/// Covers connection resets, timeouts, HTTP 429 and 5xx responses.
/// Client errors such as 401 or 404 are never retried.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Base delay between retry attempts; multiplied by the attempt number
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// Maximum element nesting accepted by the AsciiDoc converter
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 512;

/// User agent sent with every API request
pub const USER_AGENT: &str = concat!("confluence-adoc/", env!("CARGO_PKG_VERSION"));
