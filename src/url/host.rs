use url::Url;

/// Extracts the host of a URL, lowercased, including an explicit port
///
/// Default ports are not part of the result because `Url` drops them while
/// parsing, so `https://example.com:443/` and `https://example.com/` agree.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use skyell_inspector::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_host(&url), Some("127.0.0.1:8080".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_host(&url), None);
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Returns true if `url` has no host at all (e.g. `mailto:` or `data:` URLs)
pub fn has_empty_host(url: &Url) -> bool {
    extract_host(url).is_none()
}

/// Returns true if both URLs share the same host and explicit port
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (extract_host(a), extract_host(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
