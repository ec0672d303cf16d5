use async_trait::async_trait;

use super::types::GenerationError;

/// Core trait that all generation backends must implement
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Send a single prompt to the model and get its text back
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
