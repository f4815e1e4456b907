//! Crawl status tracking
//!
//! This module defines the lifecycle states of a URL record and the
//! transitions the coordinator is allowed to make between them.

mod crawl_status;

pub use crawl_status::CrawlStatus;
