use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use skyell_inspector::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Fetch timeout: {}s", config.crawler.fetch_timeout);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
fetch-timeout = 20
max-redirects = 5
probe-timeout = 3
probe-delay = 250
max-probed-links = 25
max-concurrent-crawls = 2

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"

[output]
database-path = "./test.db"
report-path = "./report.md"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.fetch_timeout, 20);
        assert_eq!(config.crawler.max_redirects, 5);
        assert_eq!(config.crawler.probe_delay, 250);
        assert_eq!(config.crawler.max_probed_links, 25);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
        assert_eq!(config.output.database_path, "./test.db");
    }

    #[test]
    fn test_missing_crawler_keys_use_design_values() {
        let config_content = r#"
[crawler]
probe-delay = 0

[output]
database-path = "./test.db"
report-path = "./report.md"
"#;

        let config = parse_config(config_content).unwrap();

        assert_eq!(config.crawler.fetch_timeout, 30);
        assert_eq!(config.crawler.max_redirects, 10);
        assert_eq!(config.crawler.probe_timeout, 10);
        assert_eq!(config.crawler.probe_delay, 0);
        assert_eq!(config.crawler.max_probed_links, 50);
        assert_eq!(config.user_agent.crawler_name, "SkyellInspector");
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.crawler.max_concurrent_crawls, 4);
        assert_eq!(config.output.report_path, "./report.md");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
max-concurrent-crawls = 0
"#;

        let result = parse_config(config_content);
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
