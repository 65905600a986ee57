use crate::confluence::PageId;

/// Name (without extension) of the file and child folder for a page.
///
/// With `use_titles` the page title is sanitized for the filesystem; a title
/// that sanitizes to nothing falls back to the page id.
///
/// ```rust
/// # use confluence_adoc::confluence::PageId;
/// # use confluence_adoc::content_saver::filename_basis;
/// assert_eq!(filename_basis(PageId(123), "Setup Guide", false), "123");
/// assert_eq!(filename_basis(PageId(123), "Setup Guide", true), "Setup Guide");
/// ```
#[must_use]
pub fn filename_basis(page_id: PageId, title: &str, use_titles: bool) -> String {
    if !use_titles {
        return page_id.to_string();
    }
    let sanitized = sanitize_filename::sanitize(title.trim());
    if sanitized.trim().is_empty() {
        page_id.to_string()
    } else {
        sanitized
    }
}
