//! Storage module for persisting crawl data
//!
//! This module handles all database operations around the engine:
//! - URL records and their crawl status
//! - Aggregate crawl results
//! - Per-link records with broken flags

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::crawler::{CrawlOutcome, HeadingCounts, HtmlVersion, LinkReport};
use crate::state::CrawlStatus;
use crate::url::LinkKind;

/// Maximum stored length of a link URL, in characters
pub const MAX_LINK_URL_LEN: usize = 500;

/// Represents a submitted URL in the database
#[derive(Debug, Clone)]
pub struct UrlRecord {
    pub id: i64,
    pub url: String,
    pub status: CrawlStatus,
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Represents one persisted crawl result
#[derive(Debug, Clone)]
pub struct CrawlResultRecord {
    pub id: i64,
    pub url_id: i64,
    pub title: String,
    pub html_version: String,
    pub has_login_form: bool,
    pub heading_counts: HeadingCounts,
    pub internal_links: u32,
    pub external_links: u32,
    pub broken_links: u32,
    pub created_at: String,
}

impl CrawlResultRecord {
    /// Rebuilds a crawl outcome from this record and its stored links
    pub fn to_outcome(&self, links: &[StoredLink]) -> CrawlOutcome {
        CrawlOutcome {
            title: self.title.clone(),
            html_version: HtmlVersion::from_label(&self.html_version),
            has_login_form: self.has_login_form,
            heading_counts: self.heading_counts,
            internal_link_count: self.internal_links as usize,
            external_link_count: self.external_links as usize,
            broken_link_count: self.broken_links as usize,
            links: links
                .iter()
                .map(|link| LinkReport {
                    url: link.url.clone(),
                    kind: link.kind,
                    is_broken: link.is_broken,
                    status_code: link.status_code,
                })
                .collect(),
        }
    }
}

/// Represents a link found on a crawled page
#[derive(Debug, Clone)]
pub struct StoredLink {
    pub id: i64,
    pub crawl_result_id: i64,
    pub url: String,
    pub kind: LinkKind,
    pub status_code: Option<u16>,
    pub is_broken: bool,
}

/// Truncates a link URL to the stored column width
///
/// Longer URLs keep their first 497 characters followed by `...`.
pub fn truncate_link_url(url: &str) -> String {
    if url.chars().count() <= MAX_LINK_URL_LEN {
        return url.to_string();
    }

    let mut truncated: String = url.chars().take(MAX_LINK_URL_LEN - 3).collect();
    truncated.push_str("...");
    truncated
}
