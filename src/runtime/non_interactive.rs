use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{
    app::Config,
    cli::OutputFormat,
    models::{is_warning, Generator, ModelFactory},
    session::{ConversationController, Entry, SessionStore, SubmitOutcome},
};

/// Result of a one-shot run
#[derive(Debug, Serialize, Deserialize)]
pub struct NonInteractiveResult {
    /// The question and its answer, or the warning text if generation failed
    #[serde(flatten)]
    pub entry: Entry,
    /// Whether `answer` is a warning rather than model output
    pub warning: bool,
    /// Metadata about the execution
    pub metadata: ExecutionMetadata,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Model used
    pub model: String,
    /// Execution time in milliseconds
    pub duration_ms: u128,
    /// When the answer arrived
    pub answered_at: DateTime<Local>,
}

/// Runner for answering a single question outside the TUI
pub struct NonInteractiveRunner {
    controller: ConversationController,
    model_name: String,
}

impl NonInteractiveRunner {
    /// Create a runner using the configured generator
    pub fn new(config: &Config) -> Result<Self> {
        let generator = ModelFactory::create(config)?;
        Ok(Self::with_generator(generator, config.model.name.clone()))
    }

    pub fn with_generator(generator: Box<dyn Generator>, model_name: String) -> Self {
        Self {
            controller: ConversationController::new(generator),
            model_name,
        }
    }

    /// Ask one question against a fresh session
    pub async fn execute(&self, question: String) -> Result<NonInteractiveResult> {
        let start_time = std::time::Instant::now();
        let mut store = SessionStore::new();

        let entry = match self.controller.submit(&mut store, &question).await {
            SubmitOutcome::Answered(index) => store.get(index).cloned(),
            SubmitOutcome::Duplicate | SubmitOutcome::Ignored => None,
        };
        let Some(entry) = entry else {
            anyhow::bail!("Question must not be empty");
        };

        Ok(NonInteractiveResult {
            warning: is_warning(&entry.answer),
            entry,
            metadata: ExecutionMetadata {
                model: self.model_name.clone(),
                duration_ms: start_time.elapsed().as_millis(),
                answered_at: Local::now(),
            },
        })
    }

    /// Format the result according to the output format
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
            }),
            OutputFormat::Text => result.entry.answer.clone(),
            OutputFormat::Markdown => {
                let mut output = String::new();

                output.push_str("## Question\n\n");
                output.push_str(&result.entry.question);
                output.push_str("\n\n## Answer\n\n");
                output.push_str(&result.entry.answer);
                output.push_str("\n\n---\n");
                output.push_str(&format!(
                    "*Model: {} | Duration: {}ms*\n",
                    result.metadata.model, result.metadata.duration_ms
                ));

                output
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenerationError, MockGenerator};

    fn runner(reply: Result<String, GenerationError>) -> NonInteractiveRunner {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(move |_| reply.clone());
        NonInteractiveRunner::with_generator(Box::new(generator), "gemini-test".to_string())
    }

    #[tokio::test]
    async fn test_execute_success() {
        let runner = runner(Ok("Index funds track a market.".to_string()));
        let result = runner.execute("index funds".to_string()).await.unwrap();

        assert_eq!(result.entry.answer, "Index funds track a market.");
        assert!(!result.warning);
        assert_eq!(result.metadata.model, "gemini-test");
    }

    #[tokio::test]
    async fn test_execute_failure_is_warning() {
        let runner = runner(Err(GenerationError::EmptyResponse));
        let result = runner.execute("anything".to_string()).await.unwrap();

        assert_eq!(result.entry.answer, "⚠️ No response received.");
        assert!(result.warning);
    }

    #[tokio::test]
    async fn test_execute_rejects_blank_question() {
        let runner = runner(Ok("unused".to_string()));
        assert!(runner.execute("  ".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_formats() {
        let runner = runner(Ok("Buy **low**.".to_string()));
        let result = runner.execute("timing".to_string()).await.unwrap();

        assert_eq!(runner.format_result(&result, OutputFormat::Text), "Buy **low**.");

        let json: serde_json::Value =
            serde_json::from_str(&runner.format_result(&result, OutputFormat::Json)).unwrap();
        assert_eq!(json["question"], "timing");
        assert_eq!(json["answer"], "Buy **low**.");
        assert_eq!(json["warning"], false);

        let parsed: NonInteractiveResult =
            serde_json::from_str(&runner.format_result(&result, OutputFormat::Json)).unwrap();
        assert_eq!(parsed.entry, result.entry);

        let markdown = runner.format_result(&result, OutputFormat::Markdown);
        assert!(markdown.starts_with("## Question\n\ntiming"));
        assert!(markdown.contains("*Model: gemini-test |"));
    }
}
