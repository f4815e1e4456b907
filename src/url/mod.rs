//! Link resolution and classification
//!
//! Anchor hrefs found on a page are resolved against the page URL and sorted
//! into internal links (same host, or no host at all) and external links.

mod host;

pub use host::{extract_host, has_empty_host, same_host};

use url::Url;

/// Which side of the internal/external split a link falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Internal,
    External,
}

impl LinkKind {
    /// Converts the kind to its database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }

    /// Parses a kind from its database string representation
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "internal" => Some(Self::Internal),
            "external" => Some(Self::External),
            _ => None,
        }
    }
}

/// Outcome of classifying a single href
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    /// Resolved to the page's own host, or to a hostless URL
    Internal(String),
    /// Resolved to some other host
    External(String),
    /// Empty, fragment-only, `javascript:` or unparseable
    Ignored,
}

/// Classifies an anchor href relative to the page it was found on
///
/// # Rules
///
/// - Empty, `#fragment`-only and `javascript:` hrefs are ignored.
/// - Every href is resolved against `base` and recorded as the resolved
///   URL: dot segments removed, scheme and host lowercased, embedded tabs
///   and newlines dropped.
/// - An href that names only an authority (`https://other.com`) is
///   recorded without the root `/` the parser adds.
/// - Hrefs that fail to parse are ignored rather than reported.
/// - The result is internal when its host matches `base`'s host or when it
///   has no host; everything else is external.
///
/// # Examples
///
/// ```
/// use skyell_inspector::url::{classify_link, LinkClass};
/// use url::Url;
///
/// let base = Url::parse("https://site.com").unwrap();
/// assert_eq!(
///     classify_link("/x", &base),
///     LinkClass::Internal("https://site.com/x".to_string())
/// );
/// assert_eq!(
///     classify_link("https://other.com", &base),
///     LinkClass::External("https://other.com".to_string())
/// );
/// assert_eq!(classify_link("#top", &base), LinkClass::Ignored);
/// ```
pub fn classify_link(href: &str, base: &Url) -> LinkClass {
    let href = href.trim();

    if is_ignored_href(href) {
        return LinkClass::Ignored;
    }

    let Ok(resolved) = base.join(href) else {
        return LinkClass::Ignored;
    };
    let recorded = render_resolved(&resolved, href);

    if same_host(&resolved, base) || has_empty_host(&resolved) {
        LinkClass::Internal(recorded)
    } else {
        LinkClass::External(recorded)
    }
}

/// Serializes a resolved link, leaving off the root path when the href
/// itself stopped at the authority
fn render_resolved(resolved: &Url, href: &str) -> String {
    let serialized = resolved.to_string();

    let bare_root = resolved.path() == "/"
        && resolved.query().is_none()
        && resolved.fragment().is_none()
        && names_only_authority(href);

    match serialized.strip_suffix('/') {
        Some(trimmed) if bare_root => trimmed.to_string(),
        _ => serialized,
    }
}

/// True for `scheme://host[:port]` and `//host[:port]` with nothing after
fn names_only_authority(href: &str) -> bool {
    let href: String = href
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();

    let Some(index) = href.find("//") else {
        return false;
    };
    let (scheme, authority) = (&href[..index], &href[index + 2..]);

    let scheme_ok = scheme.is_empty()
        || (scheme.ends_with(':') && !scheme.contains(|c: char| matches!(c, '/' | '?' | '#')));

    scheme_ok && !authority.contains(|c: char| matches!(c, '/' | '\\' | '?' | '#'))
}

/// Hrefs that never count as links
fn is_ignored_href(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return true;
    }

    href.get(..11)
        .map(|scheme| scheme.eq_ignore_ascii_case("javascript:"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://site.com/docs/page").unwrap()
    }

    #[test]
    fn test_root_relative_is_internal() {
        assert_eq!(
            classify_link("/x", &base_url()),
            LinkClass::Internal("https://site.com/x".to_string())
        );
    }

    #[test]
    fn test_path_relative_is_internal() {
        assert_eq!(
            classify_link("other", &base_url()),
            LinkClass::Internal("https://site.com/docs/other".to_string())
        );
        assert_eq!(
            classify_link("../up", &base_url()),
            LinkClass::Internal("https://site.com/up".to_string())
        );
    }

    #[test]
    fn test_query_only_is_internal() {
        assert_eq!(
            classify_link("?page=2", &base_url()),
            LinkClass::Internal("https://site.com/docs/page?page=2".to_string())
        );
    }

    #[test]
    fn test_scheme_relative_external() {
        assert_eq!(
            classify_link("//cdn.other.com/lib.js", &base_url()),
            LinkClass::External("https://cdn.other.com/lib.js".to_string())
        );
    }

    #[test]
    fn test_scheme_relative_same_host_is_internal() {
        assert_eq!(
            classify_link("//site.com/a", &base_url()),
            LinkClass::Internal("https://site.com/a".to_string())
        );
    }

    #[test]
    fn test_absolute_same_host_is_internal() {
        assert_eq!(
            classify_link("http://site.com/insecure", &base_url()),
            LinkClass::Internal("http://site.com/insecure".to_string())
        );
    }

    #[test]
    fn test_bare_authority_has_no_root_slash() {
        assert_eq!(
            classify_link("https://other.com", &base_url()),
            LinkClass::External("https://other.com".to_string())
        );
        assert_eq!(
            classify_link("//other.com:8080", &base_url()),
            LinkClass::External("https://other.com:8080".to_string())
        );
        assert_eq!(
            classify_link("https://other.com/", &base_url()),
            LinkClass::External("https://other.com/".to_string())
        );
        assert_eq!(
            classify_link("https://other.com?q=1", &base_url()),
            LinkClass::External("https://other.com/?q=1".to_string())
        );
        assert_eq!(
            classify_link("/", &base_url()),
            LinkClass::Internal("https://site.com/".to_string())
        );
    }

    #[test]
    fn test_absolute_hrefs_are_resolved() {
        let base = Url::parse("https://site.com/").unwrap();
        let hrefs = [
            "https://site.com/a/../b",
            "HTTPS://SITE.COM/c",
            "https://site.com/pa\nth",
        ];
        let recorded: Vec<_> = hrefs
            .iter()
            .map(|href| classify_link(href, &base))
            .collect();

        assert_eq!(
            recorded,
            vec![
                LinkClass::Internal("https://site.com/b".to_string()),
                LinkClass::Internal("https://site.com/c".to_string()),
                LinkClass::Internal("https://site.com/path".to_string()),
            ]
        );
    }

    #[test]
    fn test_spellings_of_one_url_agree() {
        let base = Url::parse("https://site.com/docs/").unwrap();
        let a = classify_link("HTTPS://Other.COM/x/./y", &base);
        let b = classify_link("https://other.com/x/y", &base);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_port_is_external() {
        assert_eq!(
            classify_link("https://site.com:8443/admin", &base_url()),
            LinkClass::External("https://site.com:8443/admin".to_string())
        );
    }

    #[test]
    fn test_hostless_scheme_is_internal() {
        assert_eq!(
            classify_link("mailto:team@site.com", &base_url()),
            LinkClass::Internal("mailto:team@site.com".to_string())
        );
    }

    #[test]
    fn test_ignored_hrefs() {
        assert_eq!(classify_link("", &base_url()), LinkClass::Ignored);
        assert_eq!(classify_link("   ", &base_url()), LinkClass::Ignored);
        assert_eq!(classify_link("#", &base_url()), LinkClass::Ignored);
        assert_eq!(classify_link("#section", &base_url()), LinkClass::Ignored);
        assert_eq!(
            classify_link("javascript:void(0)", &base_url()),
            LinkClass::Ignored
        );
        assert_eq!(
            classify_link("JavaScript:alert(1)", &base_url()),
            LinkClass::Ignored
        );
    }

    #[test]
    fn test_malformed_href_is_ignored() {
        assert_eq!(
            classify_link("http://[not-an-ip/", &base_url()),
            LinkClass::Ignored
        );
        assert_eq!(classify_link("https://", &base_url()), LinkClass::Ignored);
    }

    #[test]
    fn test_link_kind_db_roundtrip() {
        for kind in [LinkKind::Internal, LinkKind::External] {
            assert_eq!(LinkKind::from_db_string(kind.to_db_string()), Some(kind));
        }
        assert_eq!(LinkKind::from_db_string("broken"), None);
    }
}
