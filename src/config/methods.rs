//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use super::builder::ExportConfigBuilder;

impl<State> ExportConfigBuilder<State> {
    /// Export every descendant page below each requested page
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Name files and subfolders after the sanitized page title
    ///
    /// When disabled (the default) the numeric page id is used, which is
    /// stable across page renames.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use confluence_adoc::config::{Credentials, ExportConfig};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ExportConfig::builder()
    ///     .credentials(Credentials::new("jane", "secret"))
    ///     .wiki_url("https://wiki.example.com")
    ///     .output_dir("./export")
    ///     .title_as_name(true)
    ///     .build()?;
    /// assert!(config.title_as_name());
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn title_as_name(mut self, title_as_name: bool) -> Self {
        self.title_as_name = title_as_name;
        self
    }

    /// Set the timeout applied to every HTTP request
    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Set maximum retry attempts for transient HTTP failures
    ///
    /// Transport errors, HTTP 429 and 5xx responses are retried up to this
    /// many times with a linear backoff. Set to 0 to disable retries.
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}
