//! Type-safe builder for `ExportConfig` using the typestate pattern
//!
//! This module provides a fluent builder interface with compile-time validation
//! ensuring that credentials, wiki URL and output folder are set before
//! building an `ExportConfig`.

use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::{ConfigError, Credentials, ExportConfig};
use crate::utils::{DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, content_api_root};

// Type states for the builder
pub struct WithCredentials;
pub struct WithWikiUrl;
pub struct Complete;

pub struct ExportConfigBuilder<State = ()> {
    pub(crate) credentials: Option<Credentials>,
    pub(crate) wiki_url: Option<String>,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) recursive: bool,
    pub(crate) title_as_name: bool,
    pub(crate) request_timeout_secs: u64,
    pub(crate) max_retries: u32,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ExportConfigBuilder<()> {
    fn default() -> Self {
        Self {
            credentials: None,
            wiki_url: None,
            output_dir: None,
            recursive: false,
            title_as_name: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            _phantom: PhantomData,
        }
    }
}

impl ExportConfig {
    /// Create a builder for configuring an `ExportConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ExportConfigBuilder<()> {
        ExportConfigBuilder::default()
    }
}

impl<State> ExportConfigBuilder<State> {
    fn into_state<Next>(self) -> ExportConfigBuilder<Next> {
        ExportConfigBuilder {
            credentials: self.credentials,
            wiki_url: self.wiki_url,
            output_dir: self.output_dir,
            recursive: self.recursive,
            title_as_name: self.title_as_name,
            request_timeout_secs: self.request_timeout_secs,
            max_retries: self.max_retries,
            _phantom: PhantomData,
        }
    }
}

impl ExportConfigBuilder<()> {
    pub fn credentials(mut self, credentials: Credentials) -> ExportConfigBuilder<WithCredentials> {
        self.credentials = Some(credentials);
        self.into_state()
    }
}

impl ExportConfigBuilder<WithCredentials> {
    pub fn wiki_url(mut self, url: impl Into<String>) -> ExportConfigBuilder<WithWikiUrl> {
        self.wiki_url = Some(url.into());
        self.into_state()
    }
}

impl ExportConfigBuilder<WithWikiUrl> {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> ExportConfigBuilder<Complete> {
        self.output_dir = Some(dir.into());
        self.into_state()
    }
}

// Build method only available when all required fields are set
impl ExportConfigBuilder<Complete> {
    /// Validate the wiki URL and assemble the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWikiUrl` when the wiki URL is not an absolute
    /// http(s) URL.
    pub fn build(self) -> Result<ExportConfig, ConfigError> {
        let credentials = self
            .credentials
            .ok_or(ConfigError::MissingField("credentials"))?;
        let wiki_url = self.wiki_url.ok_or(ConfigError::MissingField("wiki_url"))?;
        let output_dir = self
            .output_dir
            .ok_or(ConfigError::MissingField("output_dir"))?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let api_root =
            content_api_root(&wiki_url).map_err(|_| ConfigError::InvalidWikiUrl(wiki_url.clone()))?;

        Ok(ExportConfig {
            credentials,
            wiki_url,
            api_root,
            output_dir,
            recursive: self.recursive,
            title_as_name: self.title_as_name,
            request_timeout_secs: self.request_timeout_secs,
            max_retries: self.max_retries,
        })
    }
}
