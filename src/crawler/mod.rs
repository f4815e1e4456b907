//! Crawl-and-analyze engine
//!
//! This module contains everything that happens to a single URL:
//! - HTTP fetching with timeout and redirect limits
//! - Markup analysis (title, headings, links, login forms)
//! - HTML version detection
//! - Rate-limited link accessibility probing
//! - Status bookkeeping and bounded background dispatch

mod coordinator;
mod engine;
mod fetcher;
mod link_checker;
mod login_form;
mod parser;
mod scheduler;
mod version;

pub use coordinator::{Coordinator, STOPPED_MESSAGE};
pub use engine::{CrawlEngine, CrawlOutcome, LinkReport};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use link_checker::{LinkCheckOutcome, LinkChecker, ProbeVerdict};
pub use login_form::is_login_form;
pub use parser::{analyze, AnalysisData, HeadingCounts};
pub use scheduler::Scheduler;
pub use version::{detect_version, HtmlVersion};

use crate::config::Config;
use crate::Result;

/// Runs one crawl of `url` without persisting anything
///
/// This is the entry point for one-off analysis. It builds a fresh engine
/// from `config` and returns the aggregate outcome.
pub async fn crawl(config: &Config, url: &str) -> Result<CrawlOutcome> {
    let engine = CrawlEngine::new(config)?;
    Ok(engine.run_crawl(url).await?)
}
