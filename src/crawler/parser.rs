//! Markup analyzer
//!
//! Parses a page once and walks every element in a single depth-first pass,
//! collecting the title, heading counts, classified anchor links and the
//! login form flag into one [`AnalysisData`] accumulator.

use crate::crawler::login_form::is_login_form;
use crate::crawler::version::HtmlVersion;
use crate::url::{classify_link, LinkClass};
use scraper::{ElementRef, Html};
use url::Url;

/// Per-level heading counts, `h1` through `h6`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadingCounts([u32; 6]);

impl HeadingCounts {
    /// Level names in order
    pub const LEVELS: [&'static str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

    /// Builds counts from `[h1, h2, h3, h4, h5, h6]`
    pub fn from_levels(levels: [u32; 6]) -> Self {
        Self(levels)
    }

    /// Count for a level name such as `"h2"`; unknown names are zero
    pub fn get(&self, name: &str) -> u32 {
        Self::LEVELS
            .iter()
            .position(|level| *level == name)
            .map(|index| self.0[index])
            .unwrap_or(0)
    }

    /// Total number of heading elements
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Iterates `(level name, count)` pairs in level order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        Self::LEVELS.iter().copied().zip(self.0.iter().copied())
    }

    /// Raw `[h1..h6]` counts
    pub fn as_levels(&self) -> [u32; 6] {
        self.0
    }

    fn increment(&mut self, level: usize) {
        if (1..=6).contains(&level) {
            self.0[level - 1] += 1;
        }
    }
}

/// Everything a single crawl learns from the page markup
///
/// Owned by one crawl invocation and filled in place during the walk.
/// Link sequences hold absolute URLs in discovery order, duplicates kept.
#[derive(Debug, Clone, Default)]
pub struct AnalysisData {
    pub title: String,
    pub html_version: HtmlVersion,
    pub has_login_form: bool,
    pub heading_counts: HeadingCounts,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
}

/// Walk state carried alongside the accumulator
struct Walker<'a> {
    base_url: &'a Url,
    title_seen: bool,
}

impl Walker<'_> {
    fn visit(&mut self, element: ElementRef<'_>, data: &mut AnalysisData) {
        let name = element.value().name();

        match name {
            "title" => {
                if !self.title_seen {
                    self.title_seen = true;
                    data.title = element.text().collect::<String>().trim().to_string();
                }
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                if let Ok(level) = name[1..].parse::<usize>() {
                    data.heading_counts.increment(level);
                }
            }
            "a" => {
                if let Some(href) = element.value().attr("href") {
                    match classify_link(href, self.base_url) {
                        LinkClass::Internal(url) => data.internal_links.push(url),
                        LinkClass::External(url) => data.external_links.push(url),
                        LinkClass::Ignored => {}
                    }
                }
            }
            "form" => {
                if is_login_form(element) {
                    data.has_login_form = true;
                }
            }
            _ => {}
        }
    }
}

/// Analyzes page markup relative to the URL it was fetched from
///
/// Never fails: missing elements leave the corresponding fields at their
/// empty/zero defaults. `html_version` is left for the version detector.
///
/// # Example
///
/// ```
/// use skyell_inspector::crawler::analyze;
/// use url::Url;
///
/// let html = r#"<title>Hi</title><h1>A</h1><a href="/x">x</a><a href="https://other.com">y</a>"#;
/// let data = analyze(html, &Url::parse("https://site.com").unwrap());
/// assert_eq!(data.title, "Hi");
/// assert_eq!(data.heading_counts.get("h1"), 1);
/// assert_eq!(data.internal_links, vec!["https://site.com/x"]);
/// assert_eq!(data.external_links, vec!["https://other.com"]);
/// ```
pub fn analyze(html: &str, base_url: &Url) -> AnalysisData {
    let document = Html::parse_document(html);
    let mut data = AnalysisData::default();
    let mut walker = Walker {
        base_url,
        title_seen: false,
    };

    for node in document.tree.root().descendants() {
        if let Some(element) = ElementRef::wrap(node) {
            walker.visit(element, &mut data);
        }
    }

    tracing::debug!(
        "Analyzed {}: {} headings, {} internal links, {} external links, login form: {}",
        base_url,
        data.heading_counts.total(),
        data.internal_links.len(),
        data.external_links.len(),
        data.has_login_form
    );

    data
}
