use tracing::warn;

use super::traits::Generator;
use super::types::GenerationError;
use crate::constants::{ADVICE_PROMPT_PREFIX, NO_RESPONSE_MESSAGE, WARNING_PREFIX};

/// Wrap a user question in the fixed advice instruction
pub fn advice_prompt(question: &str) -> String {
    format!("{ADVICE_PROMPT_PREFIX}{question}")
}

/// Call the generator and flatten any failure into a warning answer
pub async fn generate_or_warn(generator: &dyn Generator, prompt: &str) -> String {
    match generator.generate(prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("generation failed: {}", e);
            warning_text(&e)
        }
    }
}

/// The answer text shown in place of a failed generation
pub fn warning_text(error: &GenerationError) -> String {
    match error {
        GenerationError::EmptyResponse => NO_RESPONSE_MESSAGE.to_string(),
        other => format!("{WARNING_PREFIX} An error occurred: {other}"),
    }
}

/// Whether an answer is a flattened failure rather than model output
pub fn is_warning(answer: &str) -> bool {
    answer.starts_with(WARNING_PREFIX)
}
