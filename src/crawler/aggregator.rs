//! Parallel content aggregation
//!
//! Turns an ordered list of page URLs into one text blob:
//! - One extraction session per host, shared by every URL on that host
//! - URLs processed in fixed-size chunks; each chunk is a join barrier
//! - Inside a chunk, at most `max-workers` fetches run at once
//! - Failed pages contribute nothing; the batch always completes

use crate::config::CrawlerConfig;
use crate::crawler::content::extract_page_text;
use crate::crawler::session::ExtractionSession;
use crate::url::host_key;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Separator placed between the texts of consecutive pages
pub const CONTENT_SEPARATOR: &str = "\n\n";

/// Outcome of processing one URL
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    /// Page fetched; holds its normalized text (possibly empty)
    Text(String),

    /// Fetch failed or the URL could not be processed
    Failed,
}

impl PageOutcome {
    /// Returns the page text if it is non-empty
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

type SessionMap = HashMap<String, Arc<ExtractionSession>>;

/// Fetches up to `max_pages` URLs and joins their visible text
///
/// # Arguments
///
/// * `urls` - Ordered page URLs; anything past `max_pages` is ignored
/// * `max_pages` - Maximum number of pages to fetch
/// * `config` - Crawler configuration (chunk size, worker count, client settings)
///
/// # Returns
///
/// The non-empty page texts in input order, joined with [`CONTENT_SEPARATOR`].
/// An empty URL list returns an empty string without touching the network.
pub async fn aggregate_pages(urls: &[String], max_pages: usize, config: &CrawlerConfig) -> String {
    aggregate(urls, max_pages, config, SessionMap::new()).await
}

/// Like [`aggregate_pages`], but reuses an open session for its host
///
/// Pages already in the session's cache (typically the seed page that links
/// were extracted from) are not downloaded again.
pub async fn aggregate_pages_with_session(
    urls: &[String],
    max_pages: usize,
    config: &CrawlerConfig,
    session: Arc<ExtractionSession>,
) -> String {
    let mut sessions = SessionMap::new();
    if let Some(key) = host_key(session.base_url()) {
        sessions.insert(key, session);
    }
    aggregate(urls, max_pages, config, sessions).await
}

async fn aggregate(
    urls: &[String],
    max_pages: usize,
    config: &CrawlerConfig,
    mut sessions: SessionMap,
) -> String {
    let urls = &urls[..urls.len().min(max_pages)];
    if urls.is_empty() {
        return String::new();
    }

    tracing::info!("Processing {} URLs", urls.len());

    build_sessions(urls, config, &mut sessions);

    let chunk_size = config.chunk_size.min(max_pages).max(1);
    let total_chunks = urls.len().div_ceil(chunk_size);
    let mut texts = Vec::new();

    for (index, chunk) in urls.chunks(chunk_size).enumerate() {
        tracing::info!(
            "Processing chunk {}/{} ({} URLs)",
            index + 1,
            total_chunks,
            chunk.len()
        );

        let outcomes = process_chunk(chunk, &sessions, config.max_workers).await;
        texts.extend(outcomes.into_iter().filter_map(PageOutcome::into_text));
    }

    tracing::info!("Successfully processed {} pages", texts.len());
    texts.join(CONTENT_SEPARATOR)
}

/// Creates one session per host not yet in `sessions`, seeded with the host's first URL
fn build_sessions(urls: &[String], config: &CrawlerConfig, sessions: &mut SessionMap) {
    for url in urls {
        let Some(key) = session_key(url) else {
            tracing::warn!("Skipping URL without host: {}", url);
            continue;
        };

        if sessions.contains_key(&key) {
            continue;
        }

        tracing::info!("Creating extraction session for domain: {}", key);
        match ExtractionSession::new(url, config) {
            Ok(session) => {
                sessions.insert(key, Arc::new(session));
            }
            Err(e) => tracing::error!("Failed to create session for {}: {}", key, e),
        }
    }
}

fn session_key(url: &str) -> Option<String> {
    Url::parse(url).ok().as_ref().and_then(host_key)
}

/// Runs one chunk on a bounded worker pool and waits for all of it
///
/// Outcomes are returned in the chunk's URL order.
async fn process_chunk(
    chunk: &[String],
    sessions: &SessionMap,
    max_workers: usize,
) -> Vec<PageOutcome> {
    let workers = Arc::new(Semaphore::new(max_workers.max(1)));
    let mut outcomes = vec![PageOutcome::Failed; chunk.len()];
    let mut tasks = JoinSet::new();

    for (position, url) in chunk.iter().enumerate() {
        let Some(session) = session_key(url).and_then(|key| sessions.get(&key).cloned()) else {
            tracing::debug!("No session for {}, skipping", url);
            continue;
        };

        let workers = Arc::clone(&workers);
        let url = url.clone();

        tasks.spawn(async move {
            let outcome = match workers.acquire_owned().await {
                Ok(_permit) => process_url(&session, &url).await,
                Err(_) => PageOutcome::Failed,
            };
            (position, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, outcome)) => outcomes[position] = outcome,
            Err(e) => tracing::error!("Page task failed: {}", e),
        }
    }

    outcomes
}

async fn process_url(session: &ExtractionSession, url: &str) -> PageOutcome {
    match session.fetch_document(Some(url)).await {
        Some(body) => {
            let text = extract_page_text(&body);
            tracing::debug!("Extracted {} characters from {}", text.len(), url);
            PageOutcome::Text(text)
        }
        None => PageOutcome::Failed,
    }
}
