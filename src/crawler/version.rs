//! HTML version detection
//!
//! A case-insensitive textual scan of the raw document for doctype markers.
//! This is a heuristic, not a validating parse.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `<!doctype html` followed by anything, used as the generic fallback
static DOCTYPE_HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!doctype\s+html").expect("doctype pattern is valid"));

/// Document version label reported for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HtmlVersion {
    Html5,
    Html401,
    Xhtml10,
    Xhtml11,
    /// A doctype naming `html` that matched none of the specific versions
    Html,
    #[default]
    Unknown,
}

impl HtmlVersion {
    /// Human-readable label, also used as the stored value
    pub fn label(&self) -> &'static str {
        match self {
            Self::Html5 => "HTML5",
            Self::Html401 => "HTML 4.01",
            Self::Xhtml10 => "XHTML 1.0",
            Self::Xhtml11 => "XHTML 1.1",
            Self::Html => "HTML",
            Self::Unknown => "Unknown",
        }
    }

    /// Parses a stored label; anything unrecognised is `Unknown`
    pub fn from_label(label: &str) -> Self {
        match label {
            "HTML5" => Self::Html5,
            "HTML 4.01" => Self::Html401,
            "XHTML 1.0" => Self::Xhtml10,
            "XHTML 1.1" => Self::Xhtml11,
            "HTML" => Self::Html,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for HtmlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detects the HTML version from the raw document text
///
/// Checks run in order and the first match wins:
///
/// 1. `<!doctype html>` → HTML5
/// 2. `html 4.01` → HTML 4.01
/// 3. `xhtml 1.0` → XHTML 1.0
/// 4. `xhtml 1.1` → XHTML 1.1
/// 5. any other `<!doctype html...` → HTML
/// 6. otherwise → Unknown
///
/// # Examples
///
/// ```
/// use skyell_inspector::crawler::{detect_version, HtmlVersion};
///
/// assert_eq!(detect_version("<!DOCTYPE html><p>hi</p>"), HtmlVersion::Html5);
/// assert_eq!(detect_version("<p>no doctype</p>"), HtmlVersion::Unknown);
/// ```
pub fn detect_version(raw: &str) -> HtmlVersion {
    let text = raw.to_ascii_lowercase();

    if text.contains("<!doctype html>") {
        HtmlVersion::Html5
    } else if text.contains("html 4.01") {
        HtmlVersion::Html401
    } else if text.contains("xhtml 1.0") {
        HtmlVersion::Xhtml10
    } else if text.contains("xhtml 1.1") {
        HtmlVersion::Xhtml11
    } else if DOCTYPE_HTML.is_match(&text) {
        HtmlVersion::Html
    } else {
        HtmlVersion::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html5() {
        assert_eq!(detect_version("<!DOCTYPE html>"), HtmlVersion::Html5);
        assert_eq!(
            detect_version("<!doctype HTML>\n<html></html>"),
            HtmlVersion::Html5
        );
    }

    #[test]
    fn test_html401() {
        let doc = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#;
        assert_eq!(detect_version(doc), HtmlVersion::Html401);
    }

    #[test]
    fn test_xhtml10() {
        let doc = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#;
        assert_eq!(detect_version(doc), HtmlVersion::Xhtml10);
    }

    #[test]
    fn test_xhtml11() {
        let doc = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">"#;
        assert_eq!(detect_version(doc), HtmlVersion::Xhtml11);
    }

    #[test]
    fn test_generic_doctype() {
        assert_eq!(
            detect_version("<!DOCTYPE html SYSTEM \"about:legacy-compat\">"),
            HtmlVersion::Html
        );
        assert_eq!(detect_version("<!DOCTYPE  html >"), HtmlVersion::Html);
    }

    #[test]
    fn test_first_match_wins() {
        // An HTML5 doctype on a page that mentions XHTML 1.0 in its text
        let doc = "<!doctype html><p>Migrated from XHTML 1.0</p>";
        assert_eq!(detect_version(doc), HtmlVersion::Html5);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(detect_version(""), HtmlVersion::Unknown);
        assert_eq!(
            detect_version("<html><body>plain</body></html>"),
            HtmlVersion::Unknown
        );
    }

    #[test]
    fn test_label_roundtrip() {
        for version in [
            HtmlVersion::Html5,
            HtmlVersion::Html401,
            HtmlVersion::Xhtml10,
            HtmlVersion::Xhtml11,
            HtmlVersion::Html,
            HtmlVersion::Unknown,
        ] {
            assert_eq!(HtmlVersion::from_label(version.label()), version);
        }
        assert_eq!(HtmlVersion::from_label("HTML 3.2"), HtmlVersion::Unknown);
    }
}
