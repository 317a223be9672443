//! HTML link extraction
//!
//! Links on insurer sites hide in many places: plain anchors, JS-driven
//! navigation menus, arbitrary attributes, JSON props blobs for front-end
//! components and inline scripts. Each place has its own strategy; the
//! strategies are independent and their results are unioned.
//!
//! # Strategies
//!
//! | Strategy | Source |
//! |----------|--------|
//! | Anchor scan | `<a href>` plus anchors under navigation containers |
//! | Attribute scan | any attribute value that looks like it holds a URL |
//! | Embedded JSON | `data-props`, `data-json`, `data-config`, `data-settings` |
//! | Script scan | text of inline `<script>` elements |

use crate::url::{is_navigable_href, resolve_link};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// Selectors for navigation containers whose menus are often built by JS
const NAV_SELECTORS: &[&str] = &[
    "nav a",
    ".nav a",
    ".menu a",
    ".navigation a",
    ".c-header a",
    ".header a",
    ".navbar a",
    "ul.c-header__navigation-level-2-list a",
];

/// Attributes that front-end frameworks fill with JSON
const JSON_ATTRIBUTES: &[&str] = &["data-props", "data-json", "data-config", "data-settings"];

/// JSON object keys whose string values are collected as links
const JSON_LINK_KEYS: &[&str] = &["href", "url", "link", "src"];

/// Absolute http(s) URLs, or root-relative paths to .htm/.html files
const URL_PATTERN: &str = r#"https?://[^\s'"<>]+|/[a-zA-Z0-9_\-./]+\.html?"#;

static URL_REGEX: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

/// Failure of a single extraction strategy
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Set of raw href-like strings found in one document
pub type CandidateLinks = BTreeSet<String>;

fn url_regex() -> Result<&'static Regex, ExtractError> {
    URL_REGEX
        .get_or_init(|| Regex::new(URL_PATTERN))
        .as_ref()
        .map_err(|e| ExtractError::Pattern(e.clone()))
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Collects `href` values from anchors, including navigation menus
///
/// Skips `javascript:`, `mailto:`, `tel:` and fragment-only hrefs. A broken
/// navigation selector is logged and skipped.
pub fn anchor_links(document: &Html) -> Result<CandidateLinks, ExtractError> {
    let mut links = CandidateLinks::new();

    for element in document.select(&selector("a[href]")?) {
        if let Some(href) = element.value().attr("href") {
            if is_navigable_href(href) {
                links.insert(href.trim().to_string());
            }
        }
    }

    for css in NAV_SELECTORS {
        let nav = match selector(css) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Error extracting with selector {}: {}", css, e);
                continue;
            }
        };

        for element in document.select(&nav) {
            if let Some(href) = element.value().attr("href") {
                if is_navigable_href(href) {
                    links.insert(href.trim().to_string());
                }
            }
        }
    }

    Ok(links)
}

/// Scans every attribute value that contains `/` or `http` for URLs
pub fn attribute_links(document: &Html) -> Result<CandidateLinks, ExtractError> {
    let pattern = url_regex()?;
    let mut links = CandidateLinks::new();

    for element in document.select(&selector("*")?) {
        for (_, value) in element.value().attrs() {
            if value.contains('/') || value.contains("http") {
                links.extend(pattern.find_iter(value).map(|m| m.as_str().to_string()));
            }
        }
    }

    Ok(links)
}

/// Parses JSON attributes and collects link-like keys at any depth
///
/// Malformed JSON is skipped silently.
pub fn embedded_json_links(document: &Html) -> Result<CandidateLinks, ExtractError> {
    let mut links = CandidateLinks::new();

    for attr in JSON_ATTRIBUTES {
        for element in document.select(&selector(&format!("[{}]", attr))?) {
            let Some(raw) = element.value().attr(attr) else {
                continue;
            };

            match serde_json::from_str::<Value>(raw) {
                Ok(data) => collect_json_links(&data, &mut links),
                Err(e) => tracing::trace!("Skipping malformed JSON in {}: {}", attr, e),
            }
        }
    }

    Ok(links)
}

/// Scans the text of inline scripts for URLs
pub fn script_links(document: &Html) -> Result<CandidateLinks, ExtractError> {
    let pattern = url_regex()?;
    let mut links = CandidateLinks::new();

    for script in document.select(&selector("script")?) {
        let text: String = script.text().collect();
        if text.trim().is_empty() {
            continue;
        }
        links.extend(pattern.find_iter(&text).map(|m| m.as_str().to_string()));
    }

    Ok(links)
}

fn collect_json_links(value: &Value, links: &mut CandidateLinks) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(s)
                        if JSON_LINK_KEYS.contains(&key.as_str())
                            && !s.is_empty()
                            && !s.starts_with('#') =>
                    {
                        links.insert(s.clone());
                    }
                    Value::Object(_) | Value::Array(_) => collect_json_links(value, links),
                    _ => {}
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_json_links(item, links);
            }
        }
        _ => {}
    }
}

/// Runs all four strategies and unions their results
///
/// A failing strategy is logged and contributes nothing; the others still
/// run. Entries that are not navigable are dropped from the union.
pub fn collect_candidates(document: &Html) -> CandidateLinks {
    let mut candidates = CandidateLinks::new();

    merge_strategy("anchor", anchor_links(document), &mut candidates);
    merge_strategy("attribute", attribute_links(document), &mut candidates);
    merge_strategy("embedded JSON", embedded_json_links(document), &mut candidates);
    merge_strategy("script", script_links(document), &mut candidates);

    candidates.retain(|link| is_navigable_href(link));
    candidates
}

fn merge_strategy(
    name: &str,
    result: Result<CandidateLinks, ExtractError>,
    candidates: &mut CandidateLinks,
) {
    match result {
        Ok(found) => {
            tracing::trace!("{} extractor found {} links", name, found.len());
            candidates.extend(found);
        }
        Err(e) => tracing::error!("Error in {} extractor: {}", name, e),
    }
}

/// Resolves candidates against the page URL, skipping entries that fail
pub fn resolve_candidates(candidates: &CandidateLinks, page_url: &Url) -> Vec<String> {
    let mut absolute = BTreeSet::new();

    for link in candidates {
        match resolve_link(link, page_url) {
            Ok(resolved) => {
                absolute.insert(resolved);
            }
            Err(e) => tracing::warn!("Skipping invalid URL: {}, Error: {}", link, e),
        }
    }

    absolute.into_iter().collect()
}

/// Extracts every link of a parsed document as absolute URLs
pub fn extract_links(document: &Html, page_url: &Url) -> Vec<String> {
    resolve_candidates(&collect_candidates(document), page_url)
}

/// Convenience function for extracting links from raw HTML
///
/// # Example
///
/// ```
/// use insurance_compare::crawler::extract_links_from_html;
/// use url::Url;
///
/// let html = r#"<html><body><a href="/productos">Productos</a></body></html>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// assert_eq!(extract_links_from_html(html, &base), vec!["https://example.com/productos"]);
/// ```
pub fn extract_links_from_html(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    extract_links(&document, page_url)
}
