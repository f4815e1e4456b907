//! Markdown report generation
//!
//! Renders one crawl outcome as a human-readable markdown document.

use crate::crawler::CrawlOutcome;
use crate::output::OutputResult;
use crate::url::LinkKind;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report for a crawl outcome to a file
///
/// # Arguments
///
/// * `url` - The URL that was crawled
/// * `outcome` - The crawl outcome
/// * `output_path` - Path where the markdown file should be written
pub fn write_markdown_report(url: &str, outcome: &CrawlOutcome, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(url, outcome);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl outcome as markdown
pub fn format_markdown_report(url: &str, outcome: &CrawlOutcome) -> String {
    let mut md = String::new();

    md.push_str("# Page Analysis Report\n\n");

    // Page information
    md.push_str("## Page Information\n\n");
    md.push_str(&format!("- **URL**: {}\n", url));
    let title = if outcome.title.is_empty() {
        "(none)"
    } else {
        outcome.title.as_str()
    };
    md.push_str(&format!("- **Title**: {}\n", title));
    md.push_str(&format!("- **HTML Version**: {}\n", outcome.html_version));
    md.push_str(&format!(
        "- **Login Form**: {}\n\n",
        if outcome.has_login_form { "yes" } else { "no" }
    ));

    // Headings
    md.push_str("## Headings\n\n");
    md.push_str("| Level | Count |\n");
    md.push_str("|-------|-------|\n");
    for (level, count) in outcome.heading_counts.iter() {
        md.push_str(&format!("| {} | {} |\n", level.to_uppercase(), count));
    }
    md.push_str(&format!(
        "| **Total** | {} |\n\n",
        outcome.heading_counts.total()
    ));

    // Links
    md.push_str("## Links\n\n");
    md.push_str(&format!(
        "- **Internal**: {}\n",
        outcome.internal_link_count
    ));
    md.push_str(&format!(
        "- **External**: {}\n",
        outcome.external_link_count
    ));
    md.push_str(&format!("- **Broken**: {}\n\n", outcome.broken_link_count));

    if outcome.broken_link_count > 0 {
        md.push_str("### Broken Links\n\n");
        md.push_str("| URL | Type | Status |\n");
        md.push_str("|-----|------|--------|\n");
        for link in outcome.broken_links() {
            let status = link
                .status_code
                .map(|code| code.to_string())
                .unwrap_or_else(|| "unreachable".to_string());
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                link.url,
                link.kind.to_db_string(),
                status
            ));
        }
        md.push('\n');
    }

    for (kind, heading) in [
        (LinkKind::Internal, "### Internal Links"),
        (LinkKind::External, "### External Links"),
    ] {
        let mut links = outcome.links_of(kind).peekable();
        if links.peek().is_none() {
            continue;
        }

        md.push_str(heading);
        md.push_str("\n\n");
        for link in links {
            md.push_str(&format!("- {}\n", link.url));
        }
        md.push('\n');
    }

    md
}
