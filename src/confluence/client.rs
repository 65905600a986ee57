//! HTTP implementation of [`ConfluenceApi`] on top of `reqwest`.

use log::{debug, info, warn};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::api::{ConfluenceApi, ConfluenceError, ConfluenceResult};
use super::models::{ChildPage, ChildPagesResponse, Page, PageId};
use crate::config::{Credentials, ExportConfig};
use crate::utils::{RETRY_BASE_DELAY_MS, STORAGE_EXPAND, USER_AGENT, resolve_continuation};

/// Confluence REST client with basic auth, per-request timeout and a fixed
/// retry budget for transient failures
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
    http: Client,
    wiki_url: String,
    api_root: String,
    credentials: Credentials,
    max_retries: u32,
}

impl ConfluenceClient {
    /// Build a client from the export configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfluenceError::ClientBuild` if the TLS backend cannot be initialised.
    pub fn new(config: &ExportConfig) -> ConfluenceResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(ConfluenceError::ClientBuild)?;
        debug!(
            "Client for {} with {}s timeout and {} retries",
            config.api_root(),
            config.request_timeout_secs(),
            config.max_retries()
        );

        Ok(Self {
            http,
            wiki_url: config.wiki_url().to_string(),
            api_root: config.api_root().to_string(),
            credentials: config.credentials().clone(),
            max_retries: config.max_retries(),
        })
    }

    #[must_use]
    pub fn page_url(&self, id: PageId) -> String {
        format!("{}/{}?expand={}", self.api_root, id, STORAGE_EXPAND)
    }

    #[must_use]
    pub fn children_url(&self, id: PageId) -> String {
        format!("{}/{}/child/page", self.api_root, id)
    }

    /// GET `url` and decode the JSON body, retrying transient failures
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ConfluenceResult<T> {
        let mut attempt = 0;
        loop {
            match self.get_json_once(url).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = Duration::from_millis(RETRY_BASE_DELAY_MS * u64::from(attempt));
                    warn!(
                        "{e}. Retrying in {}ms (attempt {attempt}/{})",
                        delay.as_millis(),
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(&self, url: &str) -> ConfluenceResult<T> {
        let response = self
            .http
            .get(url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| ConfluenceError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfluenceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        info!("Status code {} for '{}'.", status.as_u16(), url);

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ConfluenceError::Transport {
                url: url.to_string(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|e| ConfluenceError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

impl ConfluenceApi for ConfluenceClient {
    async fn get_page(&self, id: PageId) -> ConfluenceResult<Page> {
        self.get_json(&self.page_url(id)).await
    }

    /// Follows `_links.next` continuation links until the listing is exhausted.
    /// A failure on a continuation page keeps the children gathered so far.
    async fn get_child_pages(&self, id: PageId) -> ConfluenceResult<Vec<ChildPage>> {
        let first: ChildPagesResponse = self.get_json(&self.children_url(id)).await?;

        let mut children = first.results;
        let mut next = first.links.next.filter(|link| !link.is_empty());

        while let Some(link) = next.take() {
            let url = match resolve_continuation(&self.wiki_url, &link) {
                Ok(url) => url,
                Err(e) => {
                    warn!("{e:#}. Keeping {} child entries of page {id}.", children.len());
                    break;
                }
            };

            match self.get_json::<ChildPagesResponse>(&url).await {
                Ok(page) => {
                    next = page.next_link().map(str::to_string);
                    children.extend(page.results);
                }
                Err(e) => {
                    warn!("{e}. Keeping {} child entries of page {id}.", children.len());
                }
            }
        }

        Ok(children)
    }
}
