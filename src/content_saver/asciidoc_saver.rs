use std::io;
use std::path::{Path, PathBuf};

use crate::utils::ASCIIDOC_EXTENSION;

/// Make sure `folder` exists as a directory, creating it and its parents if needed
///
/// # Errors
///
/// Returns `io::ErrorKind::NotADirectory` if the path exists but is not a
/// directory, or the underlying error if creation fails.
pub async fn ensure_output_folder(folder: &Path) -> io::Result<()> {
    match tokio::fs::metadata(folder).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("'{}' exists and is not a directory", folder.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => tokio::fs::create_dir_all(folder).await,
        Err(e) => Err(e),
    }
}

/// Write a converted page to `<folder>/<basis>.adoc`
///
/// The file holds the document title line, a blank line, then the body.
/// An existing file is overwritten.
///
/// # Returns
///
/// * `io::Result<PathBuf>` - Path of the written file
pub async fn save_asciidoc_page(
    folder: &Path,
    basis: &str,
    title: &str,
    body: &str,
) -> io::Result<PathBuf> {
    let path = folder.join(format!("{basis}.{ASCIIDOC_EXTENSION}"));
    let content = format!("= {title}\n\n{body}");
    tokio::fs::write(&path, content).await?;

    log::debug!("Saved '{}' to {}", title, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_title_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_asciidoc_page(dir.path(), "123", "Setup Guide", "Hello\n")
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("123.adoc"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "= Setup Guide\n\nHello\n");
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1.adoc"), "stale content that is longer").unwrap();
        save_asciidoc_page(dir.path(), "1", "T", "").await.unwrap();
        assert_eq!(std::fs::read_to_string(dir.path().join("1.adoc")).unwrap(), "= T\n\n");
    }

    #[tokio::test]
    async fn test_ensure_output_folder_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_output_folder(&nested).await.unwrap();
        assert!(nested.is_dir());
        // existing directory is fine
        ensure_output_folder(&nested).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_output_folder_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out");
        std::fs::write(&file, "x").unwrap();
        let err = ensure_output_folder(&file).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotADirectory);
    }
}
