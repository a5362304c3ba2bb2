use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use drill_core::{EngineState, Question};

/// Read-only summary of a drill, available at any point of the session.
///
/// `missed` lists the questions behind `incorrect_indices`, in the order they
/// were marked. `completed` is the whole active list, not only the ones reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResults {
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub completed: Vec<Question>,
    pub missed: Vec<Question>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl SessionResults {
    #[must_use]
    pub fn from_state(
        state: &EngineState,
        started_at: Option<DateTime<Utc>>,
        finished_at: Option<DateTime<Utc>>,
    ) -> Self {
        let questions = state.active_questions();
        Self {
            total: questions.len(),
            correct: state.correct_indices().len(),
            incorrect: state.incorrect_indices().len(),
            completed: questions.to_vec(),
            missed: state
                .incorrect_indices()
                .iter()
                .filter_map(|&index| questions.get(index).cloned())
                .collect(),
            started_at,
            finished_at,
        }
    }

    /// Share of graded answers that were correct, `None` before anything was graded.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        let graded = self.correct + self.incorrect;
        if graded == 0 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.correct as f64 / graded as f64;
        Some(ratio)
    }

    /// Time between start and finish, when both are known.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        Some(self.finished_at? - self.started_at?)
    }
}
