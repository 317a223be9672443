//! Extraction session: per-site fetch state
//!
//! A session owns everything one website's crawl shares: its base URL and
//! domain, the HTTP clients, and the bounded document cache. Link discovery
//! and content extraction both go through the session so a page requested by
//! both phases is fetched once.

use crate::config::{CrawlerConfig, FilterConfig};
use crate::crawler::cache::DocumentCache;
use crate::crawler::content::extract_page_text;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::extract_links_from_html;
use crate::url::{extract_domain, filter_links};
use crate::{CompareError, UrlError};
use std::sync::Arc;
use url::Url;

pub struct ExtractionSession {
    base_url: Url,
    domain: String,
    fetcher: Fetcher,
    cache: DocumentCache,
}

impl ExtractionSession {
    /// Creates a session for the site behind `base_url`
    ///
    /// # Returns
    ///
    /// * `Ok(ExtractionSession)` - Ready to fetch
    /// * `Err(CompareError)` - The URL has no host or the HTTP client could not be built
    pub fn new(base_url: &str, config: &CrawlerConfig) -> Result<Self, CompareError> {
        let base_url = Url::parse(base_url)?;

        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(base_url.scheme().to_string()).into());
        }

        let domain = extract_domain(&base_url).ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            base_url,
            domain,
            fetcher: Fetcher::new(config)?,
            cache: DocumentCache::new(config.cache_capacity),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The lowercase host of the base URL, used for the same-site filter
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    /// Returns the body of a page, from the cache when possible
    ///
    /// `None` fetches the base URL. Failures are logged by the fetcher and
    /// come back as `None`; they are never cached.
    pub async fn fetch_document(&self, url: Option<&str>) -> Option<Arc<str>> {
        let target = url.unwrap_or(self.base_url.as_str());

        if let Some(body) = self.cache.get(target) {
            tracing::trace!("Cache hit for {}", target);
            return Some(body);
        }

        let body: Arc<str> = Arc::from(self.fetcher.fetch(target).await.into_body()?);
        self.cache.insert(target.to_string(), Arc::clone(&body));
        Some(body)
    }

    /// Discovers every link on a page as absolute URLs
    ///
    /// Relative links resolve against `url`, or the base URL when `url` is
    /// `None` or unparseable. A failed fetch yields no links.
    pub async fn extract_links(&self, url: Option<&str>) -> Vec<String> {
        let Some(body) = self.fetch_document(url).await else {
            return Vec::new();
        };

        let page_url = match url.map(Url::parse) {
            Some(Ok(parsed)) => parsed,
            Some(Err(e)) => {
                tracing::warn!("Resolving links of {:?} against base URL: {}", url, e);
                self.base_url.clone()
            }
            None => self.base_url.clone(),
        };

        let links = extract_links_from_html(&body, &page_url);
        tracing::info!("Extracted {} links from {}", links.len(), page_url);
        links
    }

    /// Applies the same-site filter for this session's domain
    pub fn filter_links(&self, links: &[String], filter: &FilterConfig) -> Vec<String> {
        filter_links(links, &self.domain, filter)
    }

    /// Returns the visible text of a page, or an empty string on failure
    pub async fn page_text(&self, url: Option<&str>) -> String {
        match self.fetch_document(url).await {
            Some(body) => extract_page_text(&body),
            None => String::new(),
        }
    }
}
