//! Text generation backends
//!
//! Summaries and comparisons are produced by a [`TextGenerator`]. The
//! production implementation talks to the Gemini API; tests substitute
//! their own.

mod gemini;
mod prompts;

pub use gemini::GeminiClient;
pub use prompts::{comparison_prompt, summary_prompt};

use crate::config::GenerationSettings;
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a text generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("Usage limit reached (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("Generation service unavailable: {0}")]
    Unavailable(String),

    #[error("Generation service returned no text")]
    EmptyResponse,
}

/// Produces text from a prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a completion for `prompt` with the given sampling parameters
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationSettings,
    ) -> Result<String, GenerationError>;
}
