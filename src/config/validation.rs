use crate::config::types::{
    CompanyEntry, Config, CrawlerConfig, FilterConfig, GenerationSettings, GeneratorConfig,
    OutputConfig,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_filter_config(&config.filter)?;
    validate_generator_config(&config.generator)?;
    validate_output_config(&config.output)?;
    validate_companies(&config.companies)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_workers < 1 || config.max_workers > 32 {
        return Err(ConfigError::Validation(format!(
            "max_workers must be between 1 and 32, got {}",
            config.max_workers
        )));
    }

    if config.chunk_size < 1 {
        return Err(ConfigError::Validation(format!(
            "chunk_size must be >= 1, got {}",
            config.chunk_size
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.cache_capacity < 1 {
        return Err(ConfigError::Validation(format!(
            "cache_capacity must be >= 1, got {}",
            config.cache_capacity
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    for domain in &config.insecure_tls_domains {
        validate_domain_pattern(domain)?;
    }

    Ok(())
}

/// Validates link filtering patterns
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    // An empty pattern is a substring of every link
    if config.exclude_patterns.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "exclude_patterns cannot contain empty entries".to_string(),
        ));
    }

    if config.priority_patterns.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Validation(
            "priority_patterns cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates the text generator section
fn validate_generator_config(config: &GeneratorConfig) -> Result<(), ConfigError> {
    Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid generator endpoint: {}", e)))?;

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if config.api_key_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    validate_generation_settings("summary", &config.summary)?;
    validate_generation_settings("comparison", &config.comparison)?;

    Ok(())
}

fn validate_generation_settings(
    name: &str,
    settings: &GenerationSettings,
) -> Result<(), ConfigError> {
    if !(0.0..=2.0).contains(&settings.temperature) {
        return Err(ConfigError::Validation(format!(
            "{} temperature must be between 0.0 and 2.0, got {}",
            name, settings.temperature
        )));
    }

    if let Some(top_p) = settings.top_p {
        if !(0.0..=1.0).contains(&top_p) {
            return Err(ConfigError::Validation(format!(
                "{} top_p must be between 0.0 and 1.0, got {}",
                name, top_p
            )));
        }
    }

    if settings.top_k == Some(0) {
        return Err(ConfigError::Validation(format!(
            "{} top_k must be >= 1",
            name
        )));
    }

    if settings.max_tokens < 1 {
        return Err(ConfigError::Validation(format!(
            "{} max_tokens must be >= 1",
            name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.summaries_dir.is_empty() {
        return Err(ConfigError::Validation(
            "summaries_dir cannot be empty".to_string(),
        ));
    }

    if config.comparisons_dir.is_empty() {
        return Err(ConfigError::Validation(
            "comparisons_dir cannot be empty".to_string(),
        ));
    }

    if config.max_chars < 1_000 || config.max_chars > 1_000_000 {
        return Err(ConfigError::Validation(format!(
            "max_chars must be between 1000 and 1000000, got {}",
            config.max_chars
        )));
    }

    Ok(())
}

/// Validates company entries
fn validate_companies(companies: &[CompanyEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for company in companies {
        validate_company_id(&company.id)?;

        if !seen.insert(company.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate company id '{}'",
                company.id
            )));
        }

        if company.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "Company '{}' must have a name",
                company.id
            )));
        }

        let url = Url::parse(&company.url).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", company.url, e))
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Validation(format!(
                "Seed URL '{}' must use HTTP or HTTPS",
                company.url
            )));
        }

        if url.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "Seed URL '{}' has no host",
                company.url
            )));
        }
    }

    Ok(())
}

/// Company ids end up in file names
fn validate_company_id(id: &str) -> Result<(), ConfigError> {
    if id.is_empty() {
        return Err(ConfigError::Validation(
            "company id cannot be empty".to_string(),
        ));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "company id must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            id
        )));
    }

    Ok(())
}

/// Validates a domain pattern (supports wildcards)
fn validate_domain_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain pattern cannot be empty".to_string(),
        ));
    }

    let domain = pattern.strip_prefix("*.").unwrap_or(pattern);

    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
