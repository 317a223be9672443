//! Insurance-Compare: website extraction and comparison for insurers
//!
//! This crate crawls insurance-company websites, discovers same-domain content
//! pages with several link-extraction strategies, aggregates their visible text
//! and hands it to a text generator for summarization and comparison.

pub mod config;
pub mod crawler;
pub mod generator;
pub mod pipeline;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for Insurance-Compare operations
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Text generation failed: {0}")]
    Generation(#[from] generator::GenerationError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompareError {
    /// Returns true if the error came from the text generation backend
    ///
    /// Generation failures cannot be worked around with partial data, so
    /// callers report them separately from every other failure.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Insurance-Compare operations
pub type Result<T> = std::result::Result<T, CompareError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{aggregate_pages, ExtractionSession};
pub use generator::{GenerationError, TextGenerator};
pub use url::{extract_domain, filter_links};
