//! Crawler module for web page fetching and processing
//!
//! This module contains the site extraction logic, including:
//! - HTTP fetching with browser-like headers and a TLS allow-list
//! - Multi-strategy link extraction from HTML
//! - Visible text extraction
//! - Per-site sessions with a bounded document cache
//! - Chunked, bounded-parallel content aggregation

mod aggregator;
mod cache;
mod content;
mod fetcher;
mod parser;
mod session;

pub use aggregator::{
    aggregate_pages, aggregate_pages_with_session, PageOutcome, CONTENT_SEPARATOR,
};
pub use cache::DocumentCache;
pub use content::{extract_page_text, normalize_whitespace, page_text};
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher};
pub use parser::{
    anchor_links, attribute_links, collect_candidates, embedded_json_links, extract_links,
    extract_links_from_html, resolve_candidates, script_links, CandidateLinks, ExtractError,
};
pub use session::ExtractionSession;

use crate::config::Config;
use crate::CompareError;
use std::sync::Arc;

/// Everything gathered from one website
#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    /// Number of distinct links discovered on the seed page
    pub links_found: usize,

    /// Same-site content links, priority links first
    pub content_links: Vec<String>,

    /// Aggregated visible text of the crawled pages
    pub content: String,
}

/// Runs a complete extraction for one website
///
/// This is the main entry point for crawling a company site. It will:
/// 1. Open an extraction session for the seed URL
/// 2. Extract every link from the seed page
/// 3. Filter them down to same-site content links
/// 4. Aggregate the text of up to `max-pages` of those links, reusing the
///    seed session so cached pages are not fetched again
///
/// # Arguments
///
/// * `seed` - The website's entry-point URL
/// * `config` - The application configuration
///
/// # Returns
///
/// * `Ok(CrawlOutput)` - Extraction finished (pages may have failed individually)
/// * `Err(CompareError)` - The seed URL is unusable
pub async fn crawl(seed: &str, config: &Config) -> Result<CrawlOutput, CompareError> {
    let session = Arc::new(ExtractionSession::new(seed, &config.crawler)?);
    tracing::info!("Extracting links from {}", session.base_url());

    let links = session.extract_links(None).await;
    let content_links = session.filter_links(&links, &config.filter);

    // The seed page stays cached if the site links back to it
    let content = aggregate_pages_with_session(
        &content_links,
        config.crawler.max_pages,
        &config.crawler,
        session,
    )
    .await;

    Ok(CrawlOutput {
        links_found: links.len(),
        content_links,
        content,
    })
}
