use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One stored question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub question: String,
    pub answer: String,
}

impl Entry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("question must not be empty")]
    EmptyQuestion,
}

/// History, the displayed entry and the last submitted question for one session
///
/// The displayed entry is a copy. Deleting or clearing history never touches it.
#[derive(Debug, Default, Clone)]
pub struct SessionStore {
    history: Vec<Entry>,
    display: Option<Entry>,
    last_submitted: Option<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry to the tail of history and return its index
    pub fn append(
        &mut self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<usize, SessionError> {
        let entry = Entry::new(question, answer);
        if entry.question.trim().is_empty() {
            return Err(SessionError::EmptyQuestion);
        }
        self.history.push(entry);
        Ok(self.history.len() - 1)
    }

    /// Copy the entry at `index` into the display; out of range does nothing
    pub fn select(&mut self, index: usize) -> bool {
        match self.history.get(index) {
            Some(entry) => {
                self.display = Some(entry.clone());
                true
            }
            None => false,
        }
    }

    /// Remove the entry at `index`, shifting later entries down
    pub fn delete_at(&mut self, index: usize) -> Option<Entry> {
        if index < self.history.len() {
            Some(self.history.remove(index))
        } else {
            None
        }
    }

    pub fn clear_all(&mut self) {
        self.history.clear();
    }

    /// Replace the displayed entry
    pub fn show(&mut self, entry: Entry) {
        self.display = Some(entry);
    }

    pub fn history(&self) -> &[Entry] {
        &self.history
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.history.get(index)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn display(&self) -> Option<&Entry> {
        self.display.as_ref()
    }

    pub fn last_submitted(&self) -> Option<&str> {
        self.last_submitted.as_deref()
    }

    pub fn set_last_submitted(&mut self, question: impl Into<String>) {
        self.last_submitted = Some(question.into());
    }
}
