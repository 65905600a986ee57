//! Confluence module providing the API abstraction, the HTTP client and the
//! data models consumed by the exporter.

pub mod api;
pub mod client;
pub mod models;

pub use api::{ConfluenceApi, ConfluenceError, ConfluenceResult};
pub use client::ConfluenceClient;
pub use models::{ChildPage, ChildPagesResponse, Page, PageBody, PageId, ResponseLinks, StorageFormat};
