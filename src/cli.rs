//! Command-line surface of the `confluence-adoc` binary

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use crate::config::{ConfigError, Credentials, ExportConfig};
use crate::confluence::{ConfluenceClient, PageId};
use crate::content_saver::ensure_output_folder;
use crate::export_engine::{ExportError, ExportSummary, Exporter};
use crate::utils::{DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Export Confluence pages to AsciiDoc files
///
/// Credentials are read from the CONFLUENCE_USERNAME and CONFLUENCE_PASSWORD
/// environment variables.
#[derive(Parser, Debug)]
#[command(name = "confluence-adoc")]
#[command(version)]
pub struct Cli {
    /// Ids of the pages to export
    #[arg(value_name = "N", required = true)]
    pub page_ids: Vec<PageId>,

    /// Folder the files are written into
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Base URL of the wiki, e.g. https://example.atlassian.net/wiki
    #[arg(short, long, value_name = "URL")]
    pub wiki: String,

    /// Also export all descendant pages into subfolders
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Name files and folders after page titles instead of page ids
    #[arg(short, long, default_value_t = false)]
    pub titles: bool,

    /// Log progress information
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Timeout for a single HTTP request, in seconds
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Retries for transient HTTP failures
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_RETRIES)]
    pub retries: u32,
}

impl Cli {
    /// Build the export configuration from the flags and `credentials`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWikiUrl` if `--wiki` is not an http(s) URL.
    pub fn to_config(&self, credentials: Credentials) -> Result<ExportConfig, ConfigError> {
        ExportConfig::builder()
            .credentials(credentials)
            .wiki_url(&self.wiki)
            .output_dir(&self.output)
            .recursive(self.recursive)
            .title_as_name(self.titles)
            .request_timeout_secs(self.timeout)
            .max_retries(self.retries)
            .build()
    }
}

/// Initialize `env_logger` with `LEVEL: message` lines on stderr
///
/// Warnings and errors are shown by default, `--verbose` adds progress
/// information and `RUST_LOG` overrides both.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

/// Run an export as described by `cli`
///
/// Credentials and the output folder are checked before any request is made.
///
/// # Errors
///
/// Configuration errors, an unusable output folder and any fatal export error.
pub async fn run(cli: &Cli) -> anyhow::Result<ExportSummary> {
    let credentials = Credentials::from_env()?;
    let config = cli.to_config(credentials)?;

    ensure_output_folder(config.output_dir())
        .await
        .map_err(|e| ExportError::from_folder_error(config.output_dir().clone(), e))?;

    let client = ConfluenceClient::new(&config)?;
    let summary = Exporter::new(&client, &config)
        .export_all(&cli.page_ids)
        .await?;
    Ok(summary)
}
