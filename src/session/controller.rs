use tracing::{debug, info};

use super::store::{Entry, SessionStore};
use crate::models::{advice_prompt, generate_or_warn, Generator};

/// What a call to [`ConversationController::submit`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new entry was appended at this index and is now displayed
    Answered(usize),
    /// Same text as the previous submission; nothing changed
    Duplicate,
    /// Blank input; nothing changed
    Ignored,
}

/// Turns questions into history entries via the generator
pub struct ConversationController {
    generator: Box<dyn Generator>,
}

impl ConversationController {
    pub fn new(generator: Box<dyn Generator>) -> Self {
        Self { generator }
    }

    /// Answer `question` and record it in `store`
    ///
    /// Only the immediately preceding submission is compared, so asking
    /// q1, q2, q1 yields three entries. Generation failures come back as
    /// warning text and are stored like any other answer.
    pub async fn submit(&self, store: &mut SessionStore, question: &str) -> SubmitOutcome {
        if question.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }

        if store.last_submitted() == Some(question) {
            debug!("suppressing re-delivered submission");
            return SubmitOutcome::Duplicate;
        }

        store.set_last_submitted(question);

        let answer = generate_or_warn(self.generator.as_ref(), &advice_prompt(question)).await;

        match store.append(question, answer.clone()) {
            Ok(index) => {
                info!(index, "conversation entry added");
                store.show(Entry::new(question, answer));
                SubmitOutcome::Answered(index)
            }
            // Blank questions were rejected above
            Err(_) => SubmitOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenerationError, MockGenerator};
    use pretty_assertions::assert_eq;

    fn echo_generator() -> MockGenerator {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(|prompt| Ok(format!("insight: {prompt}")));
        generator
    }

    #[tokio::test]
    async fn test_duplicate_submission_appends_once() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(|_| Ok("Diversify.".to_string()));
        let controller = ConversationController::new(Box::new(generator));
        let mut store = SessionStore::new();

        assert_eq!(
            controller.submit(&mut store, "How do I invest?").await,
            SubmitOutcome::Answered(0)
        );
        assert_eq!(
            controller.submit(&mut store, "How do I invest?").await,
            SubmitOutcome::Duplicate
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_questions_both_recorded() {
        let controller = ConversationController::new(Box::new(echo_generator()));
        let mut store = SessionStore::new();

        controller.submit(&mut store, "stocks").await;
        controller.submit(&mut store, "bonds").await;

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().question, "stocks");
        assert_eq!(
            store.display(),
            Some(&Entry::new(
                "bonds",
                "insight: Provide financial insights for: bonds"
            ))
        );
    }

    #[tokio::test]
    async fn test_non_consecutive_repeat_is_fresh() {
        let controller = ConversationController::new(Box::new(echo_generator()));
        let mut store = SessionStore::new();

        for q in ["q1", "q2", "q1"] {
            controller.submit(&mut store, q).await;
        }

        assert_eq!(store.len(), 3);
        assert_eq!(store.last_submitted(), Some("q1"));
    }

    #[tokio::test]
    async fn test_prompt_uses_template() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .withf(|p| p == "Provide financial insights for: inflation")
            .times(1)
            .returning(|_| Ok("Prices rise.".to_string()));
        let controller = ConversationController::new(Box::new(generator));
        let mut store = SessionStore::new();

        controller.submit(&mut store, "inflation").await;
        assert_eq!(store.get(0).unwrap().answer, "Prices rise.");
    }

    #[tokio::test]
    async fn test_transport_failure_is_stored_as_warning() {
        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(GenerationError::Transport("dns error".to_string())));
        let controller = ConversationController::new(Box::new(generator));
        let mut store = SessionStore::new();

        let outcome = controller.submit(&mut store, "inflation").await;

        assert_eq!(outcome, SubmitOutcome::Answered(0));
        let entry = store.get(0).unwrap();
        assert!(entry.answer.starts_with("⚠️"));
        assert!(entry.answer.contains("dns error"));
        assert_eq!(store.display(), Some(entry));
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let mut generator = MockGenerator::new();
        generator.expect_generate().times(0);
        let controller = ConversationController::new(Box::new(generator));
        let mut store = SessionStore::new();

        assert_eq!(controller.submit(&mut store, "   ").await, SubmitOutcome::Ignored);
        assert!(store.is_empty());
        assert_eq!(store.last_submitted(), None);
    }

    #[tokio::test]
    async fn test_repeat_allowed_after_clear_only_if_different() {
        let controller = ConversationController::new(Box::new(echo_generator()));
        let mut store = SessionStore::new();

        controller.submit(&mut store, "etf").await;
        store.clear_all();

        // the guard is about the previous event, not about history contents
        assert_eq!(
            controller.submit(&mut store, "etf").await,
            SubmitOutcome::Duplicate
        );
        assert!(store.is_empty());
    }
}
