//! Core types for export runs: the fatal error taxonomy, the run summary and
//! the work-stack entry.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::confluence::PageId;

/// Errors that abort the whole export run
///
/// Remote and conversion failures never surface here; they only skip the
/// affected page or subtree.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output path exists and is not a directory
    #[error("Output path '{}' exists and is not a directory", .0.display())]
    InvalidOutputFolder(PathBuf),

    /// Creating a folder or writing a file failed
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub(crate) fn from_folder_error(folder: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotADirectory {
            Self::InvalidOutputFolder(folder)
        } else {
            Self::Io {
                path: folder,
                source,
            }
        }
    }
}

/// Convenience alias for Result with `ExportError`
pub type ExportResult<T> = Result<T, ExportError>;

/// Counters of one export run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files written
    pub pages_written: usize,
    /// Pages that could not be fetched or converted (their subtrees included)
    pub pages_skipped: usize,
    /// Child listings that failed; the parent file was still written
    pub listings_failed: usize,
    /// Children skipped because they are their own ancestor
    pub cycles_detected: usize,
}

impl ExportSummary {
    /// Add the counters of another run to this one
    pub fn merge(&mut self, other: &ExportSummary) {
        self.pages_written += other.pages_written;
        self.pages_skipped += other.pages_skipped;
        self.listings_failed += other.listings_failed;
        self.cycles_detected += other.cycles_detected;
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exported {} page(s), skipped {}",
            self.pages_written, self.pages_skipped
        )?;
        if self.listings_failed > 0 {
            write!(f, ", {} child listing(s) failed", self.listings_failed)?;
        }
        if self.cycles_detected > 0 {
            write!(f, ", {} cycle(s) broken", self.cycles_detected)?;
        }
        Ok(())
    }
}

/// One pending page on the export work stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportQueue {
    pub page_id: PageId,
    /// Folder the page's file is written into
    pub folder: PathBuf,
    /// Number of ancestors between this page and the export root
    pub depth: usize,
}
