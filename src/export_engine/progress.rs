//! Progress reporting abstraction for export runs
//!
//! Defines the `ExportProgress` trait for lifecycle event reporting
//! and provides a no-op implementation for simple use cases.

use std::path::Path;

use crate::confluence::PageId;

/// Trait for reporting export progress at key lifecycle events
pub trait ExportProgress {
    /// A page file was written
    fn page_written(&self, id: PageId, path: &Path);

    /// A page (and its subtree) was skipped
    fn page_skipped(&self, id: PageId, reason: &str);

    /// The child listing of a page returned `count` pages to export
    fn children_listed(&self, id: PageId, count: usize);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ExportProgress for NoOpProgress {
    #[inline(always)]
    fn page_written(&self, _id: PageId, _path: &Path) {}

    #[inline(always)]
    fn page_skipped(&self, _id: PageId, _reason: &str) {}

    #[inline(always)]
    fn children_listed(&self, _id: PageId, _count: usize) {}
}

impl<T: ExportProgress + ?Sized> ExportProgress for &T {
    fn page_written(&self, id: PageId, path: &Path) {
        (**self).page_written(id, path);
    }

    fn page_skipped(&self, id: PageId, reason: &str) {
        (**self).page_skipped(id, reason);
    }

    fn children_listed(&self, id: PageId, count: usize) {
        (**self).children_listed(id, count);
    }
}
