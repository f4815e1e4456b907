//! Skyell Inspector: single-page web analysis
//!
//! This crate fetches one web page, walks its markup, and reports structural
//! metadata: HTML version, title, heading counts, internal/external links,
//! broken links, and whether the page carries a login form.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Skyell Inspector operations
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL {id}: {message}")]
    Conflict { id: i64, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the primary page fetch
///
/// Every variant is fatal for the crawl invocation; the display string is
/// what ends up on the URL record.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to fetch URL: {0}")]
    Network(String),

    #[error("failed to fetch URL: request timed out")]
    Timeout,

    #[error("failed to fetch URL: too many redirects")]
    TooManyRedirects,

    #[error("HTTP error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Skyell Inspector operations
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlOutcome};
pub use state::CrawlStatus;
pub use crate::url::{classify_link, LinkClass, LinkKind};
