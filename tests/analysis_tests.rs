//! Offline tests for markup analysis, link classification and version detection
//!
//! These run the analysis stages directly on HTML strings, without any
//! HTTP traffic.

use skyell_inspector::crawler::{analyze, detect_version, HtmlVersion};
use url::Url;

fn analyze_page(html: &str, page_url: &str) -> skyell_inspector::crawler::AnalysisData {
    let base = Url::parse(page_url).expect("valid page URL");
    let mut data = analyze(html, &base);
    data.html_version = detect_version(html);
    data
}

#[test]
fn test_simple_page_scenario() {
    let html = r#"<!DOCTYPE html><title>Hi</title><h1>A</h1><h2>B</h2><a href="/x">x</a><a href="https://other.com">y</a>"#;
    let data = analyze_page(html, "https://site.com");

    assert_eq!(data.html_version, HtmlVersion::Html5);
    assert_eq!(data.html_version.label(), "HTML5");
    assert_eq!(data.title, "Hi");
    assert_eq!(data.heading_counts.get("h1"), 1);
    assert_eq!(data.heading_counts.get("h2"), 1);
    assert_eq!(data.heading_counts.total(), 2);
    assert_eq!(data.internal_links, vec!["https://site.com/x"]);
    assert_eq!(data.external_links, vec!["https://other.com"]);
    assert!(!data.has_login_form);
}

#[test]
fn test_login_form_scenario() {
    let html = r#"<form><input type="email" name="email"><input type="password" name="pwd"></form>"#;
    assert!(analyze_page(html, "https://site.com").has_login_form);
}

#[test]
fn test_heading_total_matches_element_count() {
    let html = r#"
        <html><body>
          <h1 id="a">One</h1>
          <div><div><div><h3>Deep</h3></div></div></div>
          <table><tr><td><h2>In a table</h2></td></tr></table>
          <ul><li><h4>Listed</h4></li><li><h4>Listed</h4></li></ul>
          <h5 style="display:none">Hidden</h5>
          <h6><span>Wrapped</span></h6>
        </body></html>
    "#;
    let counts = analyze_page(html, "https://site.com").heading_counts;

    let summed: u32 = counts.iter().map(|(_, count)| count).sum();
    assert_eq!(summed, 7);
    assert_eq!(counts.total(), 7);
    assert_eq!(counts.as_levels(), [1, 1, 1, 2, 1, 1]);
}

#[test]
fn test_ignored_anchors_never_reach_link_lists() {
    let html = r##"
        <a href="">empty</a>
        <a href="#">hash</a>
        <a href="#top">fragment</a>
        <a href="javascript:history.back()">back</a>
        <a href="http://[::1">broken</a>
        <a href="/kept">kept</a>
    "##;
    let data = analyze_page(html, "https://site.com/");

    assert_eq!(data.internal_links, vec!["https://site.com/kept"]);
    assert!(data.external_links.is_empty());
}

#[test]
fn test_classification_against_page_host() {
    let html = r#"
        <a href="https://site.com/a">same host</a>
        <a href="//site.com/b">scheme relative</a>
        <a href="c">path relative</a>
        <a href="mailto:hello@site.com">mail</a>
        <a href="https://www.site.com/">www</a>
        <a href="https://elsewhere.org/d">other</a>
    "#;
    let data = analyze_page(html, "https://site.com/dir/index.html");

    assert_eq!(
        data.internal_links,
        vec![
            "https://site.com/a",
            "https://site.com/b",
            "https://site.com/dir/c",
            "mailto:hello@site.com",
        ]
    );
    assert_eq!(
        data.external_links,
        vec!["https://www.site.com/", "https://elsewhere.org/d"]
    );
}

#[test]
fn test_page_without_expected_elements() {
    let data = analyze_page("just some text", "https://site.com");

    assert_eq!(data.title, "");
    assert_eq!(data.heading_counts.total(), 0);
    assert!(data.internal_links.is_empty());
    assert!(data.external_links.is_empty());
    assert!(!data.has_login_form);
    assert_eq!(data.html_version, HtmlVersion::Unknown);
}

#[test]
fn test_legacy_doctypes() {
    let html401 = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN"><title>Old</title>"#;
    assert_eq!(
        analyze_page(html401, "https://site.com").html_version,
        HtmlVersion::Html401
    );

    let xhtml = r#"<?xml version="1.0"?><!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "x"><html></html>"#;
    assert_eq!(
        analyze_page(xhtml, "https://site.com").html_version,
        HtmlVersion::Xhtml11
    );
}
