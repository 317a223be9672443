//! Summarization and comparison pipeline
//!
//! Ties the crawler, the text generator and the summary store together:
//! each company's site is crawled and summarized once (unless a fresh run is
//! requested), then two summaries are compared.

use crate::config::{CompanyEntry, Config};
use crate::crawler::crawl;
use crate::generator::{comparison_prompt, summary_prompt, TextGenerator};
use crate::report::SummaryStore;
use crate::{CompareError, ConfigError};

/// Returns at most the first `max_chars` characters of `text`
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

pub struct Pipeline<G> {
    config: Config,
    generator: G,
    store: SummaryStore,
    fresh: bool,
}

impl<G: TextGenerator> Pipeline<G> {
    /// Creates a pipeline storing results where the output config says
    pub fn new(config: Config, generator: G) -> Self {
        let store = SummaryStore::from_config(&config.output);
        Self {
            config,
            generator,
            store,
            fresh: false,
        }
    }

    /// Ignore cached summaries and comparisons, regenerating and overwriting them
    pub fn fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    pub fn store(&self) -> &SummaryStore {
        &self.store
    }

    fn company(&self, id: &str) -> Result<&CompanyEntry, CompareError> {
        self.config
            .company(id)
            .ok_or_else(|| CompareError::UnknownCompany(id.to_string()))
    }

    /// Returns the markdown summary of one company's website
    ///
    /// A saved summary is reused unless the pipeline is fresh. Otherwise the
    /// site is crawled, its text truncated to `max-chars` and summarized.
    pub async fn summarize_company(&self, company: &CompanyEntry) -> Result<String, CompareError> {
        if !self.fresh {
            if let Some(summary) = self.store.load_summary(&company.id)? {
                tracing::info!("Summary of {} already exists, loading", company.name);
                return Ok(summary);
            }
        }

        tracing::info!("Extracting content from {} ({})", company.name, company.url);
        let output = crawl(&company.url, &self.config).await?;
        if output.content.is_empty() {
            tracing::warn!("No content extracted from {}", company.url);
        }

        let content = truncate_chars(&output.content, self.config.output.max_chars);
        tracing::info!(
            "Summarizing {} characters for {}",
            content.chars().count(),
            company.name
        );

        let summary = self
            .generator
            .generate(&summary_prompt(content), &self.config.generator.summary)
            .await?;

        self.store.save_summary(&company.id, &summary)?;
        Ok(summary)
    }

    /// Summarizes two companies and returns their comparative analysis
    pub async fn compare_companies(
        &self,
        first_id: &str,
        second_id: &str,
    ) -> Result<String, CompareError> {
        if first_id == second_id {
            return Err(ConfigError::Validation(format!(
                "Cannot compare company '{}' with itself",
                first_id
            ))
            .into());
        }

        let first = self.company(first_id)?;
        let second = self.company(second_id)?;

        // A failed fresh run must not leave the old comparison to be reused later
        if self.fresh && self.store.remove_comparison(first_id, second_id)? {
            tracing::info!("Removed saved comparison of {} and {}", first.name, second.name);
        }

        let first_summary = self.summarize_company(first).await?;
        let second_summary = self.summarize_company(second).await?;

        if !self.fresh {
            if let Some(comparison) = self.store.load_comparison(first_id, second_id)? {
                tracing::info!(
                    "Loading existing comparison of {} and {}",
                    first.name,
                    second.name
                );
                return Ok(comparison);
            }
        }

        tracing::info!(
            "Generating comparison of {} and {}",
            first.name,
            second.name
        );
        let prompt = comparison_prompt(&first.name, &first_summary, &second.name, &second_summary);
        let comparison = self
            .generator
            .generate(&prompt, &self.config.generator.comparison)
            .await?;

        self.store.save_comparison(first_id, second_id, &comparison)?;
        Ok(comparison)
    }
}
