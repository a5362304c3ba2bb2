use std::sync::{Arc, Mutex};

use drill_core::Question;

use crate::error::SinkError;

/// Receives every question the user gets wrong, e.g. to build a review list.
pub trait MissedQuestionSink: Send + Sync {
    /// # Errors
    ///
    /// Returns `SinkError` when the question could not be recorded.
    fn record_missed(&self, question: &Question, index: usize) -> Result<(), SinkError>;
}

/// Keeps missed questions in memory, once per distinct question.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMissedQuestions {
    entries: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryMissedQuestions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded questions in the order they were first missed.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Unavailable` if the lock is poisoned.
    pub fn missed(&self) -> Result<Vec<Question>, SinkError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| SinkError::Unavailable(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl MissedQuestionSink for InMemoryMissedQuestions {
    fn record_missed(&self, question: &Question, _index: usize) -> Result<(), SinkError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| SinkError::Unavailable(e.to_string()))?;
        if !guard.contains(question) {
            guard.push(question.clone());
        }
        Ok(())
    }
}
