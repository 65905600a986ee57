//! Export Confluence pages, optionally with all their descendants, to AsciiDoc files.
//!
//! ```no_run
//! use confluence_adoc::{ConfluenceClient, Credentials, ExportConfig, Exporter, PageId};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ExportConfig::builder()
//!     .credentials(Credentials::from_env()?)
//!     .wiki_url("https://example.atlassian.net/wiki")
//!     .output_dir("docs")
//!     .recursive(true)
//!     .build()?;
//! let client = ConfluenceClient::new(&config)?;
//! let summary = Exporter::new(&client, &config).export(PageId(123)).await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod confluence;
pub mod content_saver;
pub mod export_engine;
pub mod utils;

pub use config::{ConfigError, Credentials, ExportConfig};
pub use confluence::{ChildPage, ConfluenceApi, ConfluenceClient, ConfluenceError, Page, PageId};
pub use content_saver::{ConversionError, ConversionOptions, convert_storage_to_asciidoc};
pub use export_engine::{ExportError, ExportProgress, ExportSummary, Exporter, NoOpProgress};
