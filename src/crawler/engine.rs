//! Single crawl invocation
//!
//! Sequences fetch, markup analysis, version detection and link probing for
//! one URL and assembles the immutable [`CrawlOutcome`].

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::link_checker::{LinkCheckOutcome, LinkChecker};
use crate::crawler::parser::{analyze, AnalysisData, HeadingCounts};
use crate::crawler::version::{detect_version, HtmlVersion};
use crate::url::LinkKind;
use crate::FetchError;
use reqwest::Client;
use url::Url;

/// One discovered link and what the accessibility check made of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub url: String,
    pub kind: LinkKind,
    pub is_broken: bool,
    /// Probe status code; None when unprobed or unreachable
    pub status_code: Option<u16>,
}

/// Aggregate result of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    pub title: String,
    pub html_version: HtmlVersion,
    pub has_login_form: bool,
    pub heading_counts: HeadingCounts,
    pub internal_link_count: usize,
    pub external_link_count: usize,
    pub broken_link_count: usize,
    /// Internal links first, then external, each in discovery order
    pub links: Vec<LinkReport>,
}

impl CrawlOutcome {
    /// Combines the markup analysis with the accessibility verdicts
    ///
    /// Every link entry is tagged from the broken set, including repeats of
    /// a probed URL that sit past the sampled window.
    pub fn assemble(data: AnalysisData, checks: &LinkCheckOutcome) -> Self {
        let internal_link_count = data.internal_links.len();
        let external_link_count = data.external_links.len();

        let tagged = |kind: LinkKind| {
            move |url: String| LinkReport {
                is_broken: checks.is_broken(&url),
                status_code: checks.status_code(&url),
                kind,
                url,
            }
        };

        let links: Vec<LinkReport> = data
            .internal_links
            .into_iter()
            .map(tagged(LinkKind::Internal))
            .chain(data.external_links.into_iter().map(tagged(LinkKind::External)))
            .collect();

        let broken_link_count = links.iter().filter(|link| link.is_broken).count();

        Self {
            title: data.title,
            html_version: data.html_version,
            has_login_form: data.has_login_form,
            heading_counts: data.heading_counts,
            internal_link_count,
            external_link_count,
            broken_link_count,
            links,
        }
    }

    /// Links of one kind, in order
    pub fn links_of(&self, kind: LinkKind) -> impl Iterator<Item = &LinkReport> {
        self.links.iter().filter(move |link| link.kind == kind)
    }

    /// Links flagged broken, in order
    pub fn broken_links(&self) -> impl Iterator<Item = &LinkReport> {
        self.links.iter().filter(|link| link.is_broken)
    }
}

/// The crawl-and-analyze engine
///
/// Holds no per-crawl state, so one engine can serve any number of
/// concurrent invocations.
#[derive(Debug, Clone)]
pub struct CrawlEngine {
    client: Client,
    link_checker: LinkChecker,
}

impl CrawlEngine {
    /// Builds the engine's HTTP clients from configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let link_checker = LinkChecker::new(&config.user_agent, &config.crawler)?;
        Ok(Self::with_parts(client, link_checker))
    }

    /// Builds the engine from an existing fetch client and link checker
    pub fn with_parts(client: Client, link_checker: LinkChecker) -> Self {
        Self {
            client,
            link_checker,
        }
    }

    /// Runs one complete crawl of `target_url`
    ///
    /// Only the primary fetch can fail; everything downstream degrades to
    /// defaults instead of erroring.
    pub async fn run_crawl(&self, target_url: &str) -> Result<CrawlOutcome, FetchError> {
        let base_url = parse_target(target_url)?;

        tracing::info!("Crawling {}", base_url);
        let fetched = fetch_url(&self.client, &base_url).await?;
        let body = fetched.text();

        let mut data = analyze(&body, &base_url);
        data.html_version = detect_version(&body);

        let checks = self
            .link_checker
            .check_broken(&data.internal_links, &data.external_links)
            .await;

        let outcome = CrawlOutcome::assemble(data, &checks);

        tracing::info!(
            "Crawled {}: {} internal, {} external, {} broken ({} probes over {} sampled links)",
            base_url,
            outcome.internal_link_count,
            outcome.external_link_count,
            outcome.broken_link_count,
            checks.probes_sent(),
            checks.sampled()
        );

        Ok(outcome)
    }
}

/// Validates the crawl target: it must parse and carry a host
fn parse_target(target_url: &str) -> Result<Url, FetchError> {
    let url = Url::parse(target_url.trim()).map_err(|e| FetchError::InvalidUrl {
        url: target_url.to_string(),
        reason: e.to_string(),
    })?;

    if url.host_str().map_or(true, str::is_empty) {
        return Err(FetchError::InvalidUrl {
            url: target_url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}
