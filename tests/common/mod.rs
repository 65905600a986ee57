//! Test utilities and helper functions for the confluence-adoc test suite

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use confluence_adoc::confluence::{
    ChildPage, ConfluenceApi, ConfluenceError, ConfluenceResult, Page, PageBody, PageId,
    StorageFormat,
};
use confluence_adoc::{Credentials, ExportConfig, ExportProgress};

/// In-memory wiki recording every call made against it
#[derive(Default)]
#[allow(dead_code)]
pub struct FakeWiki {
    pages: HashMap<PageId, (String, String)>,
    children: HashMap<PageId, Vec<ChildPage>>,
    failing_pages: HashMap<PageId, u16>,
    failing_listings: HashMap<PageId, u16>,
    pub calls: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl FakeWiki {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, id: u64, title: &str, storage: &str) -> Self {
        self.pages
            .insert(PageId(id), (title.to_string(), storage.to_string()));
        self
    }

    /// Children of `parent` as `(id, title, type)` in API order
    pub fn children(mut self, parent: u64, entries: &[(u64, &str, &str)]) -> Self {
        let listing = entries
            .iter()
            .map(|(id, title, content_type)| ChildPage {
                id: PageId(*id),
                title: title.to_string(),
                content_type: content_type.to_string(),
            })
            .collect();
        self.children.insert(PageId(parent), listing);
        self
    }

    pub fn failing_page(mut self, id: u64, status: u16) -> Self {
        self.failing_pages.insert(PageId(id), status);
        self
    }

    pub fn failing_listing(mut self, id: u64, status: u16) -> Self {
        self.failing_listings.insert(PageId(id), status);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn listing_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with("children "))
            .count()
    }
}

impl ConfluenceApi for FakeWiki {
    async fn get_page(&self, id: PageId) -> ConfluenceResult<Page> {
        self.calls.borrow_mut().push(format!("page {id}"));
        if let Some(status) = self.failing_pages.get(&id) {
            return Err(ConfluenceError::Status {
                status: *status,
                url: format!("fake://content/{id}"),
            });
        }
        match self.pages.get(&id) {
            Some((title, storage)) => Ok(Page {
                id,
                title: title.clone(),
                body: PageBody {
                    storage: StorageFormat {
                        value: storage.clone(),
                        representation: Some("storage".to_string()),
                    },
                },
            }),
            None => Err(ConfluenceError::Status {
                status: 404,
                url: format!("fake://content/{id}"),
            }),
        }
    }

    async fn get_child_pages(&self, id: PageId) -> ConfluenceResult<Vec<ChildPage>> {
        self.calls.borrow_mut().push(format!("children {id}"));
        if let Some(status) = self.failing_listings.get(&id) {
            return Err(ConfluenceError::Status {
                status: *status,
                url: format!("fake://content/{id}/child/page"),
            });
        }
        Ok(self.children.get(&id).cloned().unwrap_or_default())
    }
}

/// Progress reporter recording events as strings
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingProgress {
    pub events: RefCell<Vec<String>>,
}

impl ExportProgress for RecordingProgress {
    fn page_written(&self, id: PageId, _path: &Path) {
        self.events.borrow_mut().push(format!("written {id}"));
    }

    fn page_skipped(&self, id: PageId, _reason: &str) {
        self.events.borrow_mut().push(format!("skipped {id}"));
    }

    fn children_listed(&self, id: PageId, count: usize) {
        self.events.borrow_mut().push(format!("listed {id}: {count}"));
    }
}

/// Creates an export configuration writing into `output_dir`
#[allow(dead_code)]
pub fn test_config(output_dir: &Path, recursive: bool, titles: bool) -> ExportConfig {
    test_config_for_wiki("https://wiki.example.com", output_dir, recursive, titles)
}

#[allow(dead_code)]
pub fn test_config_for_wiki(
    wiki_url: &str,
    output_dir: &Path,
    recursive: bool,
    titles: bool,
) -> ExportConfig {
    ExportConfig::builder()
        .credentials(Credentials::new("jane", "secret"))
        .wiki_url(wiki_url)
        .output_dir(output_dir)
        .recursive(recursive)
        .title_as_name(titles)
        .request_timeout_secs(5)
        .max_retries(2)
        .build()
        .expect("Failed to create test config")
}

/// Start a mock wiki server
#[allow(dead_code)]
pub async fn setup_mock_wiki() -> mockito::ServerGuard {
    mockito::Server::new_async().await
}

/// Creates a mock endpoint that returns a JSON body
#[allow(dead_code)]
pub async fn create_json_mock(server: &mut mockito::Server, path: &str, body: &str) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

/// JSON body of a page response
#[allow(dead_code)]
pub fn page_json(id: u64, title: &str, storage: &str) -> String {
    serde_json::json!({
        "id": id.to_string(),
        "type": "page",
        "status": "current",
        "title": title,
        "body": {"storage": {"value": storage, "representation": "storage"}}
    })
    .to_string()
}

/// JSON body of a child listing, with an optional continuation link
#[allow(dead_code)]
pub fn children_json(entries: &[(u64, &str, &str)], next: Option<&str>) -> String {
    let results: Vec<_> = entries
        .iter()
        .map(|(id, title, content_type)| {
            serde_json::json!({"id": id.to_string(), "title": title, "type": content_type})
        })
        .collect();
    let mut links = serde_json::json!({"self": "ignored"});
    if let Some(next) = next {
        links["next"] = serde_json::json!(next);
    }
    serde_json::json!({
        "results": results,
        "start": 0,
        "limit": 25,
        "size": entries.len(),
        "_links": links
    })
    .to_string()
}

/// Sorted paths of all files below `root`, relative to it
#[allow(dead_code)]
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(&path, root, out);
            } else if let Ok(relative) = path.strip_prefix(root) {
                out.push(relative.to_path_buf());
            }
        }
    }
    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}

/// Verifies that a file exists and returns its content
#[allow(dead_code)]
pub fn read_file(path: &Path) -> String {
    assert!(path.exists(), "File does not exist: {path:?}");
    std::fs::read_to_string(path).expect("readable file")
}
