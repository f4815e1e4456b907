//! Statistics over stored URL records
//!
//! This module provides functionality for extracting and displaying
//! crawl statistics from the storage layer.

use crate::state::CrawlStatus;
use crate::storage::{Storage, StorageResult};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Total number of submitted URLs
    pub total_urls: u64,

    /// Count of URLs by status
    pub urls_by_status: HashMap<CrawlStatus, u64>,

    /// Broken links across the latest result of every URL
    pub total_broken_links: u64,
}

impl CrawlStatistics {
    /// Count for one status (zero when absent)
    pub fn count(&self, status: CrawlStatus) -> u64 {
        self.urls_by_status.get(&status).copied().unwrap_or(0)
    }

    /// Share of URLs whose last crawl completed, in percent
    pub fn completion_rate(&self) -> f64 {
        if self.total_urls == 0 {
            return 0.0;
        }
        (self.count(CrawlStatus::Completed) as f64 / self.total_urls as f64) * 100.0
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
pub fn load_statistics(storage: &dyn Storage) -> StorageResult<CrawlStatistics> {
    let total_urls = storage.count_total_urls()?;

    let mut urls_by_status = HashMap::new();
    for status in CrawlStatus::ALL {
        let count = storage.count_urls_by_status(status)?;
        if count > 0 {
            urls_by_status.insert(status, count);
        }
    }

    let total_broken_links = storage.count_broken_links()?;

    Ok(CrawlStatistics {
        total_urls,
        urls_by_status,
        total_broken_links,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total URLs: {}", stats.total_urls);
    println!("  Broken links (latest results): {}", stats.total_broken_links);
    println!();

    println!("URLs by Status:");
    for status in CrawlStatus::ALL {
        let count = stats.count(status);
        let percentage = if stats.total_urls > 0 {
            (count as f64 / stats.total_urls as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", status, count, percentage);
    }
    println!();

    println!(
        "Completion Rate: {:.1}% ({} / {} URLs completed)",
        stats.completion_rate(),
        stats.count(CrawlStatus::Completed),
        stats.total_urls
    );
}
