//! Markdown files for summaries and comparisons
//!
//! Summaries live at `{summaries-dir}/summary_{id}.md` and comparisons at
//! `{comparisons-dir}/comparison_{first}_{second}.md`. A file that exists is
//! treated as a valid cached result.

use crate::config::OutputConfig;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// File-backed cache of generated markdown
#[derive(Debug, Clone)]
pub struct SummaryStore {
    summaries_dir: PathBuf,
    comparisons_dir: PathBuf,
}

impl SummaryStore {
    pub fn new(summaries_dir: impl Into<PathBuf>, comparisons_dir: impl Into<PathBuf>) -> Self {
        Self {
            summaries_dir: summaries_dir.into(),
            comparisons_dir: comparisons_dir.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.summaries_dir, &config.comparisons_dir)
    }

    pub fn summary_path(&self, company_id: &str) -> PathBuf {
        self.summaries_dir.join(format!("summary_{}.md", company_id))
    }

    pub fn comparison_path(&self, first_id: &str, second_id: &str) -> PathBuf {
        self.comparisons_dir
            .join(format!("comparison_{}_{}.md", first_id, second_id))
    }

    /// Loads a saved summary, or `None` if there is none
    pub fn load_summary(&self, company_id: &str) -> io::Result<Option<String>> {
        read_optional(&self.summary_path(company_id))
    }

    /// Writes a summary, creating the summaries directory if needed
    pub fn save_summary(&self, company_id: &str, summary: &str) -> io::Result<PathBuf> {
        let path = self.summary_path(company_id);
        write_creating_dirs(&path, summary)?;
        tracing::info!("Summary saved to {}", path.display());
        Ok(path)
    }

    /// Loads a saved comparison, or `None` if there is none
    pub fn load_comparison(&self, first_id: &str, second_id: &str) -> io::Result<Option<String>> {
        read_optional(&self.comparison_path(first_id, second_id))
    }

    /// Writes a comparison, creating the comparisons directory if needed
    pub fn save_comparison(
        &self,
        first_id: &str,
        second_id: &str,
        comparison: &str,
    ) -> io::Result<PathBuf> {
        let path = self.comparison_path(first_id, second_id);
        write_creating_dirs(&path, comparison)?;
        tracing::info!("Comparison saved to {}", path.display());
        Ok(path)
    }

    /// Deletes a saved comparison
    ///
    /// Returns `true` if a file was removed.
    pub fn remove_comparison(&self, first_id: &str, second_id: &str) -> io::Result<bool> {
        match fs::remove_file(self.comparison_path(first_id, second_id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

fn write_creating_dirs(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
