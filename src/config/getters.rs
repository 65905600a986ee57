//! Getter methods for `ExportConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from an `ExportConfig` instance.

use std::path::PathBuf;
use std::time::Duration;

use super::types::{Credentials, ExportConfig};

impl ExportConfig {
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn wiki_url(&self) -> &str {
        &self.wiki_url
    }

    /// Content API root, `<wiki>/rest/api/content`
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    #[must_use]
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    #[must_use]
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    #[must_use]
    pub fn title_as_name(&self) -> bool {
        self.title_as_name
    }

    #[must_use]
    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs())
    }

    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}
