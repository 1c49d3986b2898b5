use async_trait::async_trait;

use crate::GenerationError;

/// A text-generation backend.
///
/// Implementations make exactly one attempt per call; callers decide how to
/// degrade when it fails.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Sends `prompt` and returns the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
