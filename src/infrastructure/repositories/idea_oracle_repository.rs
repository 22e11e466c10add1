use async_trait::async_trait;

/// Text-completion provider that answers idea prompts.
/// Abstracts the underlying generative-language API (Gemini today).
///
/// Implementations only move text: prompt construction and response
/// parsing live in the ideas domain.
#[async_trait]
pub trait IdeaOracleRepository: Send + Sync {
    /// Send `prompt` and return the raw completion text
    ///
    /// # Errors
    /// Returns error on transport failure, non-success status, or a
    /// response without completion text
    async fn complete(&self, prompt: &str) -> Result<String, String>;
}
