//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::crawler::CrawlOutcome;
use crate::state::CrawlStatus;
use crate::storage::{CrawlResultRecord, StoredLink, UrlRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("URL not found: {0}")]
    UrlNotFound(i64),

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// This is everything the coordinator and reports need from persistence:
/// URL records with their status, and the results crawls produce.
pub trait Storage {
    // ===== URL Records =====

    /// Inserts a new URL in `Queued` status and returns its ID
    fn insert_url(&mut self, url: &str) -> StorageResult<i64>;

    /// Gets a URL record by ID
    fn get_url(&self, id: i64) -> StorageResult<UrlRecord>;

    /// Lists all URL records, oldest first
    fn list_urls(&self) -> StorageResult<Vec<UrlRecord>>;

    /// Sets the status and error message of a URL record
    ///
    /// Passing `None` clears any previous error message.
    fn update_url_status(
        &mut self,
        id: i64,
        status: CrawlStatus,
        error_message: Option<&str>,
    ) -> StorageResult<()>;

    // ===== Crawl Results =====

    /// Persists a crawl outcome and all of its links atomically
    ///
    /// # Returns
    ///
    /// The ID of the new crawl result
    fn save_crawl_outcome(&mut self, url_id: i64, outcome: &CrawlOutcome) -> StorageResult<i64>;

    /// Gets the most recent crawl result for a URL
    fn latest_result(&self, url_id: i64) -> StorageResult<Option<CrawlResultRecord>>;

    /// Gets the links stored for a crawl result, in discovery order
    fn get_links(&self, crawl_result_id: i64) -> StorageResult<Vec<StoredLink>>;

    // ===== Statistics =====

    /// Counts URLs by status
    fn count_urls_by_status(&self, status: CrawlStatus) -> StorageResult<u64>;

    /// Gets total URL count
    fn count_total_urls(&self) -> StorageResult<u64>;

    /// Sums broken links over the latest result of every URL
    fn count_broken_links(&self) -> StorageResult<u64>;
}
