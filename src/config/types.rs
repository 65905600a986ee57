//! Core configuration types for page exports
//!
//! This module contains the main `ExportConfig` struct and its associated types
//! that define the parameters of an export run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::utils::{PASSWORD_ENV, USERNAME_ENV};

/// Errors raised while assembling an `ExportConfig`
///
/// All of these are fatal: the run stops before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or both credential variables are unset or empty
    #[error("Environment variables CONFLUENCE_USERNAME and/or CONFLUENCE_PASSWORD are unset")]
    MissingCredentials,

    /// Wiki base URL is not an absolute http(s) URL
    #[error("Invalid wiki URL '{0}'")]
    InvalidWikiUrl(String),

    /// Required builder field was never set
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A zero request timeout would fail every request
    #[error("Request timeout must be at least one second")]
    ZeroTimeout,
}

/// HTTP basic auth credentials for the Confluence API
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `CONFLUENCE_USERNAME` and `CONFLUENCE_PASSWORD`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredentials` when either variable is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    ///
    /// Used by `from_env`; tests pass a closure over a map instead of
    /// mutating the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredentials` when either value is missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(USERNAME_ENV).filter(|v| !v.is_empty());
        let password = lookup(PASSWORD_ENV).filter(|v| !v.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self { username, password }),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Password never reaches the logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Main configuration struct for export operations
///
/// Built once from CLI flags and the environment and never mutated. The
/// exporter carries each child page's output folder alongside the page id
/// instead of deriving new configurations.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub(crate) credentials: Credentials,
    /// Wiki base URL as given by the user (used to resolve continuation links)
    pub(crate) wiki_url: String,
    /// `<wiki_url>/rest/api/content`
    pub(crate) api_root: String,
    pub(crate) output_dir: PathBuf,
    pub(crate) recursive: bool,
    /// Name files and subfolders after the sanitized page title instead of the id
    pub(crate) title_as_name: bool,

    /// Timeout in seconds for a single HTTP request
    ///
    /// Default: 30 seconds
    pub(crate) request_timeout_secs: u64,

    /// Retries for transient HTTP failures (transport errors, 429, 5xx)
    ///
    /// Default: 2
    pub(crate) max_retries: u32,
}

