//! Depth-first export of a page and, optionally, its descendants.
//!
//! The traversal uses an explicit work stack of [`ExportQueue`] entries. Each
//! entry carries the folder its page is written into; the configuration stays
//! shared and immutable. Children are pushed in reverse so they are exported
//! in the order the API lists them.

use log::{error, info, warn};

use super::export_types::{ExportError, ExportQueue, ExportResult, ExportSummary};
use super::progress::{ExportProgress, NoOpProgress};
use crate::config::ExportConfig;
use crate::confluence::{ConfluenceApi, PageId};
use crate::content_saver::{
    ConversionOptions, convert_storage_to_asciidoc, ensure_output_folder, filename_basis,
    save_asciidoc_page,
};
use crate::utils::ASCIIDOC_EXTENSION;

pub struct Exporter<'a, A, P = NoOpProgress> {
    api: &'a A,
    config: &'a ExportConfig,
    options: ConversionOptions,
    progress: P,
}

impl<'a, A: ConfluenceApi> Exporter<'a, A, NoOpProgress> {
    #[must_use]
    pub fn new(api: &'a A, config: &'a ExportConfig) -> Self {
        Self {
            api,
            config,
            options: ConversionOptions::default(),
            progress: NoOpProgress,
        }
    }
}

impl<'a, A: ConfluenceApi, P: ExportProgress> Exporter<'a, A, P> {
    /// Report lifecycle events to `progress`
    #[must_use]
    pub fn with_progress<Q: ExportProgress>(self, progress: Q) -> Exporter<'a, A, Q> {
        Exporter {
            api: self.api,
            config: self.config,
            options: self.options,
            progress,
        }
    }

    #[must_use]
    pub fn with_conversion_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// Export every id in order, stopping at the first fatal error
    ///
    /// # Errors
    ///
    /// Returns the first `ExportError`; pages exported before it stay on disk.
    pub async fn export_all(&self, ids: &[PageId]) -> ExportResult<ExportSummary> {
        let mut summary = ExportSummary::default();
        for id in ids {
            summary.merge(&self.export(*id).await?);
        }
        Ok(summary)
    }

    /// Export `root_id` into the configured output folder
    ///
    /// Fetch and conversion failures skip the page with its subtree; a failed
    /// child listing keeps the parent's file and skips only its children.
    ///
    /// # Errors
    ///
    /// * `ExportError::InvalidOutputFolder` - an output folder path is taken by a non-directory
    /// * `ExportError::Io` - a folder could not be created or a file could not be written
    pub async fn export(&self, root_id: PageId) -> ExportResult<ExportSummary> {
        let mut summary = ExportSummary::default();
        let mut stack = vec![ExportQueue {
            page_id: root_id,
            folder: self.config.output_dir().clone(),
            depth: 0,
        }];
        // ids of the pages above the entry being processed, root first
        let mut ancestors: Vec<PageId> = Vec::new();

        info!(
            "Exporting page {root_id} into {}",
            self.config.output_dir().display()
        );

        while let Some(entry) = stack.pop() {
            ancestors.truncate(entry.depth);
            let id = entry.page_id;

            ensure_output_folder(&entry.folder)
                .await
                .map_err(|e| ExportError::from_folder_error(entry.folder.clone(), e))?;

            let page = match self.api.get_page(id).await {
                Ok(page) => page,
                Err(e) => {
                    error!("{e}. Skipping page {id}.");
                    summary.pages_skipped += 1;
                    self.progress.page_skipped(id, &e.to_string());
                    continue;
                }
            };

            let body = match convert_storage_to_asciidoc(page.storage_value(), &self.options) {
                Ok(body) => body,
                Err(e) => {
                    error!("Cannot convert page {id} '{}': {e}. Skipping page {id}.", page.title);
                    summary.pages_skipped += 1;
                    self.progress.page_skipped(id, &e.to_string());
                    continue;
                }
            };

            let basis = filename_basis(id, &page.title, self.config.title_as_name());
            let path = save_asciidoc_page(&entry.folder, &basis, &page.title, &body)
                .await
                .map_err(|source| ExportError::Io {
                    path: entry.folder.join(format!("{basis}.{ASCIIDOC_EXTENSION}")),
                    source,
                })?;
            info!("Wrote page {id} '{}' to {}", page.title, path.display());
            summary.pages_written += 1;
            self.progress.page_written(id, &path);

            if !self.config.recursive() {
                continue;
            }

            let children = match self.api.get_child_pages(id).await {
                Ok(children) => children,
                Err(e) => {
                    error!("{e}. Not exporting children of page {id}.");
                    summary.listings_failed += 1;
                    continue;
                }
            };

            ancestors.push(id);
            let child_folder = entry.folder.join(&basis);
            let mut pending = Vec::new();
            for child in children.into_iter().filter(|child| child.is_page()) {
                if ancestors.contains(&child.id) {
                    warn!(
                        "Page {} '{}' is an ancestor of page {id}; not descending into it again.",
                        child.id, child.title
                    );
                    summary.cycles_detected += 1;
                    continue;
                }
                pending.push(ExportQueue {
                    page_id: child.id,
                    folder: child_folder.clone(),
                    depth: entry.depth + 1,
                });
            }

            self.progress.children_listed(id, pending.len());
            stack.extend(pending.into_iter().rev());
        }

        Ok(summary)
    }
}
