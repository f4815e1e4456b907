use serde::Deserialize;

/// Main configuration structure for Skyell Inspector
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl engine limits
///
/// Every key is optional; missing keys fall back to the design values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout for the primary page fetch (seconds)
    #[serde(rename = "fetch-timeout")]
    pub fetch_timeout: u64,

    /// Maximum redirect chain length for the primary page fetch
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Timeout for each link accessibility probe (seconds)
    #[serde(rename = "probe-timeout")]
    pub probe_timeout: u64,

    /// Delay between successive probes (milliseconds)
    #[serde(rename = "probe-delay")]
    pub probe_delay: u64,

    /// Maximum number of links probed per crawl
    #[serde(rename = "max-probed-links")]
    pub max_probed_links: usize,

    /// Maximum number of crawl invocations running at once
    #[serde(rename = "max-concurrent-crawls")]
    pub max_concurrent_crawls: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: 30,
            max_redirects: 10,
            probe_timeout: 10,
            probe_delay: 100,
            max_probed_links: 50,
            max_concurrent_crawls: 4,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SkyellInspector".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the markdown report file
    #[serde(rename = "report-path")]
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: "./skyell.db".to_string(),
            report_path: "./report.md".to_string(),
        }
    }
}
