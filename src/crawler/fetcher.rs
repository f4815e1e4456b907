//! HTTP fetcher for the page under analysis
//!
//! One GET per crawl, no retries. Redirects are followed up to the configured
//! limit and anything that is not a complete, sub-400 response is a
//! [`FetchError`].

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::FetchError;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Status code of the final response, after redirects
    pub status_code: u16,
    /// URL of the final response, after redirects
    pub final_url: Url,
    /// Complete response payload
    pub body: Vec<u8>,
}

impl FetchResult {
    /// Decodes the body as text, replacing invalid UTF-8 sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Builds the HTTP client used for the primary page fetch
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Timeout and redirect limits
///
/// # Example
///
/// ```no_run
/// use skyell_inspector::config::{CrawlerConfig, UserAgentConfig};
/// use skyell_inspector::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(crawler.fetch_timeout);

    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(crawler.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its final status and full body
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Redirect chain over the limit | `TooManyRedirects` |
/// | Client timeout | `Timeout` |
/// | Connection/DNS/TLS failure | `Network` |
/// | Final status >= 400 | `HttpStatus` |
/// | Body could not be read | `Body` |
pub async fn fetch_url(client: &Client, url: &Url) -> Result<FetchResult, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(classify_error)?;

    let status = response.status();
    let final_url = response.url().clone();

    if status.as_u16() >= 400 {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Body(e.to_string())
        }
    })?;

    tracing::debug!(
        "Fetched {} ({} bytes, status {})",
        final_url,
        body.len(),
        status.as_u16()
    );

    Ok(FetchResult {
        status_code: status.as_u16(),
        final_url,
        body: body.to_vec(),
    })
}

/// Maps a transport-level reqwest error onto the fetch error taxonomy
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_redirect() {
        FetchError::TooManyRedirects
    } else if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e.to_string())
    }
}
