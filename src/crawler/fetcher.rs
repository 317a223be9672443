//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with browser-like headers
//! - GET requests with a fixed timeout and no retries
//! - Error classification (HTTP status, network, TLS)
//! - A single unverified retry for hosts on the TLS allow-list

use crate::config::CrawlerConfig;
use crate::url::matches_any_host;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use reqwest::Client;
use std::error::Error as _;
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },

    /// Certificate validation failed during the TLS handshake
    TlsError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Consumes the result, keeping only a successful body
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration (user agent, timeout)
/// * `accept_invalid_certs` - Disable certificate verification
///
/// # Example
///
/// ```no_run
/// use insurance_compare::config::CrawlerConfig;
/// use insurance_compare::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default(), false).unwrap();
/// ```
pub fn build_http_client(
    config: &CrawlerConfig,
    accept_invalid_certs: bool,
) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once with the given client
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Success |
/// | Other HTTP status | HttpError |
/// | Certificate validation failure | TlsError |
/// | Timeout, connection refused, body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if is_certificate_error(&e) {
                FetchResult::TlsError {
                    error: describe_error(&e),
                }
            } else if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else {
                FetchResult::NetworkError {
                    error: describe_error(&e),
                }
            }
        }
    }
}

/// Page fetcher owning a verified client and, on demand, an unverified one
pub struct Fetcher {
    client: Client,
    insecure_client: OnceCell<Client>,
    config: CrawlerConfig,
}

impl Fetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config, false)?,
            insecure_client: OnceCell::new(),
            config: config.clone(),
        })
    }

    /// Fetches a URL, logging failures instead of returning errors
    ///
    /// A TLS failure on a host covered by `insecure-tls-domains` is retried
    /// once with certificate verification disabled. Every other failure is
    /// final.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let result = fetch_url(&self.client, url).await;

        let result = match result {
            FetchResult::TlsError { error } if self.is_tls_exempt(url) => {
                tracing::warn!(
                    "SSL verification failed for {} ({}). Proceeding with verification disabled.",
                    url,
                    error
                );
                self.fetch_unverified(url).await
            }
            other => other,
        };

        match &result {
            FetchResult::Success { .. } => tracing::debug!("Fetched {}", url),
            FetchResult::HttpError { status_code } => {
                tracing::error!("Error fetching {}: HTTP {}", url, status_code)
            }
            FetchResult::NetworkError { error } => {
                tracing::error!("Error fetching {}: {}", url, error)
            }
            FetchResult::TlsError { error } => {
                tracing::error!("SSL error fetching {}: {}", url, error)
            }
        }

        result
    }

    /// Checks the URL's host against the TLS allow-list
    pub fn is_tls_exempt(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .map(|host| matches_any_host(&self.config.insecure_tls_domains, &host))
            .unwrap_or(false)
    }

    async fn fetch_unverified(&self, url: &str) -> FetchResult {
        let client = self
            .insecure_client
            .get_or_try_init(|| async { build_http_client(&self.config, true) })
            .await;

        match client {
            Ok(client) => fetch_url(client, url).await,
            Err(e) => FetchResult::NetworkError {
                error: format!("Failed to build unverified client: {}", e),
            },
        }
    }
}

/// Walks the error chain looking for a certificate problem
///
/// reqwest does not expose TLS failures as a distinct kind; the rustls and
/// native-tls messages all mention the certificate.
fn is_certificate_error(error: &reqwest::Error) -> bool {
    has_certificate_cause(error)
}

/// Checks the causes of `error` (not its own message, which embeds the URL)
fn has_certificate_cause(error: &dyn std::error::Error) -> bool {
    let mut source = error.source();
    while let Some(err) = source {
        let message = err.to_string().to_lowercase();
        if message.contains("certificate") || message.contains("ssl") {
            return true;
        }
        source = err.source();
    }
    false
}

/// Formats an error with its innermost cause
fn describe_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        message = format!("{}: {}", message, err);
        source = err.source();
    }
    message
}
