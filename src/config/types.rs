use serde::Deserialize;

/// Browser user agent sent with every page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Domains known to serve broken certificate chains
pub const DEFAULT_INSECURE_TLS_DOMAINS: &[&str] =
    &["galiciaseguros.com.ar", "integrityseguros.com.ar"];

/// Substrings marking links that never carry page content
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    // Media and documents
    ".pdf", ".jpg", ".png", ".mp4", ".avi", ".svg", ".jpeg", ".gif", ".webp",
    // Web assets
    ".js", ".css", ".min.js", ".map",
    // CMS asset paths
    "/wp-content/", "/wp-includes/", "/plugins/", "/themes/",
    // Common libraries
    "jquery", "bootstrap", "fontawesome",
    // Legal pages
    "/terminos", "/condiciones", "/cookies", "/privacidad",
    // Feeds, embeds and CDNs
    "cdn.", "/wp-json/", "/feed/", "/embed/",
];

/// Substrings promoting a link to the front of the crawl order
pub const DEFAULT_PRIORITY_PATTERNS: &[&str] = &[
    "/productos",
    "/seguros",
    "/coberturas",
    "/siniestros",
    "/contacto",
];

/// Main configuration structure for Insurance-Compare
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default, rename = "company")]
    pub companies: Vec<CompanyEntry>,
}

impl Config {
    /// Looks up a configured company by id
    pub fn company(&self, id: &str) -> Option<&CompanyEntry> {
        self.companies.iter().find(|c| c.id == id)
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlerConfig {
    /// Maximum number of pages whose content is aggregated per company
    pub max_pages: usize,

    /// Number of concurrent fetches within one chunk
    pub max_workers: usize,

    /// Number of URLs processed between join barriers
    pub chunk_size: usize,

    /// Per-request timeout (seconds)
    pub request_timeout: u64,

    /// Number of fetched documents memoized per session
    pub cache_capacity: usize,

    pub user_agent: String,

    /// Hosts allowed to retry without certificate verification
    pub insecure_tls_domains: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 100,
            max_workers: 2,
            chunk_size: 10,
            request_timeout: 10,
            cache_capacity: 32,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            insecure_tls_domains: to_strings(DEFAULT_INSECURE_TLS_DOMAINS),
        }
    }
}

/// Link filtering patterns
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FilterConfig {
    /// Links containing any of these (case-insensitive) are dropped
    pub exclude_patterns: Vec<String>,

    /// Links containing any of these are crawled first
    pub priority_patterns: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: to_strings(DEFAULT_EXCLUDE_PATTERNS),
            priority_patterns: to_strings(DEFAULT_PRIORITY_PATTERNS),
        }
    }
}

/// Text generation backend configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GeneratorConfig {
    /// Base URL of the generative language API
    pub endpoint: String,

    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Parameters used when summarizing one company
    pub summary: GenerationSettings,

    /// Parameters used when comparing two summaries
    pub comparison: GenerationSettings,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-pro".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            summary: GenerationSettings {
                temperature: 0.2,
                top_p: Some(0.95),
                top_k: Some(40),
                max_tokens: 1024,
            },
            comparison: GenerationSettings {
                temperature: 0.2,
                top_p: None,
                top_k: None,
                max_tokens: 4096,
            },
        }
    }
}

/// Sampling parameters for one kind of generation call
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerationSettings {
    pub temperature: f32,
    #[serde(default)]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub top_k: Option<u32>,
    pub max_tokens: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OutputConfig {
    /// Directory holding per-company summaries
    pub summaries_dir: String,

    /// Directory holding comparison reports
    pub comparisons_dir: String,

    /// Maximum characters of aggregated text sent for summarization
    pub max_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summaries_dir: "data/summaries".to_string(),
            comparisons_dir: ".".to_string(),
            max_chars: 70_000,
        }
    }
}

/// An insurance company to crawl
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyEntry {
    /// Short identifier used in file names and on the command line
    pub id: String,

    /// Display name
    pub name: String,

    /// Seed URL of the company's website
    pub url: String,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
