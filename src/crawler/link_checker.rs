//! Link accessibility checker
//!
//! Probes a bounded prefix of the discovered links, one at a time, with a
//! fixed pause between probes. Each probe is a HEAD request that falls back
//! to GET when the HEAD itself fails to get a response.

use crate::config::{CrawlerConfig, UserAgentConfig};
use reqwest::{redirect::Policy, Client};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// What a single probe observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerdict {
    /// Final status code after following redirects
    Status(u16),
    /// Neither HEAD nor GET produced a response
    Unreachable,
}

impl ProbeVerdict {
    /// A link is broken on any status >= 400 or when it could not be reached
    pub fn is_broken(&self) -> bool {
        match self {
            Self::Status(code) => *code >= 400,
            Self::Unreachable => true,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Unreachable => None,
        }
    }
}

/// Result of checking one crawl's links
#[derive(Debug, Clone, Default)]
pub struct LinkCheckOutcome {
    broken: HashSet<String>,
    status_codes: HashMap<String, u16>,
    probes_sent: usize,
    sampled: usize,
}

impl LinkCheckOutcome {
    /// True if the URL was probed and found broken
    ///
    /// URLs outside the sampled window are never probed and report false.
    pub fn is_broken(&self, url: &str) -> bool {
        self.broken.contains(url)
    }

    /// Status code observed for the URL, if it was probed and answered
    pub fn status_code(&self, url: &str) -> Option<u16> {
        self.status_codes.get(url).copied()
    }

    /// Number of distinct URLs actually probed
    pub fn probes_sent(&self) -> usize {
        self.probes_sent
    }

    /// Number of link entries that fell inside the sample window
    pub fn sampled(&self) -> usize {
        self.sampled
    }

    fn record(&mut self, url: &str, verdict: ProbeVerdict) {
        if let Some(code) = verdict.status_code() {
            self.status_codes.insert(url.to_string(), code);
        }
        if verdict.is_broken() {
            self.broken.insert(url.to_string());
        }
    }
}

/// Sequential, rate-limited reachability prober
#[derive(Debug, Clone)]
pub struct LinkChecker {
    client: Client,
    max_probed_links: usize,
    probe_delay: Duration,
}

impl LinkChecker {
    /// Builds a checker with its own probe client
    ///
    /// The probe client follows redirects with reqwest's default policy and
    /// caps each request at `probe-timeout` seconds.
    pub fn new(user_agent: &UserAgentConfig, crawler: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent.header_value())
            .timeout(Duration::from_secs(crawler.probe_timeout))
            .redirect(Policy::default())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self::with_client(
            client,
            crawler.max_probed_links,
            Duration::from_millis(crawler.probe_delay),
        ))
    }

    /// Builds a checker around an existing client
    pub fn with_client(client: Client, max_probed_links: usize, probe_delay: Duration) -> Self {
        Self {
            client,
            max_probed_links,
            probe_delay,
        }
    }

    /// Determines which of the discovered links are broken
    ///
    /// Internal links come first, then external ones; only the first
    /// `max-probed-links` entries of that sequence are considered. A URL that
    /// repeats inside the window is probed once and its verdict reused.
    pub async fn check_broken(&self, internal: &[String], external: &[String]) -> LinkCheckOutcome {
        let mut outcome = LinkCheckOutcome::default();
        let mut verdicts: HashMap<&str, ProbeVerdict> = HashMap::new();

        let sample = internal
            .iter()
            .chain(external.iter())
            .take(self.max_probed_links);

        for url in sample {
            outcome.sampled += 1;

            if verdicts.contains_key(url.as_str()) {
                continue;
            }

            if outcome.probes_sent > 0 && !self.probe_delay.is_zero() {
                tokio::time::sleep(self.probe_delay).await;
            }

            let verdict = self.probe(url).await;
            outcome.probes_sent += 1;
            tracing::debug!("Probed {}: {:?}", url, verdict);

            outcome.record(url, verdict);
            verdicts.insert(url.as_str(), verdict);
        }

        let total = internal.len() + external.len();
        if total > outcome.sampled {
            tracing::debug!(
                "Skipped accessibility check for {} of {} links",
                total - outcome.sampled,
                total
            );
        }

        outcome
    }

    /// Probes a single URL: HEAD, then GET if HEAD got no response
    pub async fn probe(&self, url: &str) -> ProbeVerdict {
        match self.client.head(url).send().await {
            Ok(response) => ProbeVerdict::Status(response.status().as_u16()),
            Err(head_error) => {
                tracing::trace!("HEAD {} failed ({}), retrying with GET", url, head_error);
                match self.client.get(url).send().await {
                    Ok(response) => ProbeVerdict::Status(response.status().as_u16()),
                    Err(_) => ProbeVerdict::Unreachable,
                }
            }
        }
    }
}
