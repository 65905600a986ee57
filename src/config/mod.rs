//! Configuration module for page exports
//!
//! This module provides the `ExportConfig` struct and its type-safe builder
//! for configuring export runs with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::{Complete, ExportConfigBuilder, WithCredentials, WithWikiUrl};
pub use types::{ConfigError, Credentials, ExportConfig};
