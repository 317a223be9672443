//! Configuration module for Insurance-Compare
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section except the company list falls back to built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use insurance_compare::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawler will aggregate up to {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CompanyEntry, Config, CrawlerConfig, FilterConfig, GenerationSettings, GeneratorConfig,
    OutputConfig, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_INSECURE_TLS_DOMAINS,
    DEFAULT_PRIORITY_PATTERNS, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
