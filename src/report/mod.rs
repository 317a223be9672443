//! Report output
//!
//! Persistence of generated summaries and comparisons, plus the plain-text
//! rendering the CLI prints.

mod store;

pub use store::SummaryStore;

use crate::crawler::CrawlOutput;

/// Width of the rules printed around a comparison
pub const RULE_WIDTH: usize = 80;

/// Wraps a comparison between separator rules for terminal output
pub fn format_comparison(first_name: &str, second_name: &str, comparison: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "{rule}\nComparative analysis: {first_name} vs {second_name}\n{rule}\n\n{}\n\n{rule}\n",
        comparison.trim_end()
    )
}

/// One-line overview of a crawl, used by `--crawl-only`
pub fn format_crawl_stats(name: &str, output: &CrawlOutput) -> String {
    format!(
        "{}: {} links found, {} content links, {} characters extracted",
        name,
        output.links_found,
        output.content_links.len(),
        output.content.chars().count()
    )
}
