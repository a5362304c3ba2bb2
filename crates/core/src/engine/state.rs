use crate::model::{Question, QuizMode};

/// Coarse lifecycle of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No questions loaded.
    Loading,
    InProgress,
    /// `advance` was called on the last question.
    Complete,
}

/// Read-only snapshot of everything the host needs to render a quiz.
///
/// Only [`super::Engine`] mutates this. `correct_indices` and
/// `incorrect_indices` are independent: each holds an index at most once, but
/// a manual mark may put an index in both sets. A later manual mark is treated
/// as the user's override and is never reconciled with the earlier answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineState {
    pub(crate) active_questions: Vec<Question>,
    pub(crate) current_index: usize,
    pub(crate) finished: bool,
    pub(crate) mode: QuizMode,
    pub(crate) revealed: bool,
    pub(crate) selected_choice: Option<String>,
    pub(crate) result_shown: bool,
    pub(crate) choices: Vec<String>,
    pub(crate) incorrect_indices: Vec<usize>,
    pub(crate) correct_indices: Vec<usize>,
}

impl EngineState {
    #[must_use]
    pub fn active_questions(&self) -> &[Question] {
        &self.active_questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.active_questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.active_questions.get(self.current_index)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    #[must_use]
    pub fn selected_choice(&self) -> Option<&str> {
        self.selected_choice.as_deref()
    }

    #[must_use]
    pub fn is_result_shown(&self) -> bool {
        self.result_shown
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn incorrect_indices(&self) -> &[usize] {
        &self.incorrect_indices
    }

    #[must_use]
    pub fn correct_indices(&self) -> &[usize] {
        &self.correct_indices
    }

    /// Percentage of the way through the quiz, counting the current question.
    ///
    /// Returns `0.0` when no questions are loaded.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        let total = self.active_questions.len();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let percent = (self.current_index + 1) as f64 * 100.0 / total as f64;
        percent
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.active_questions.is_empty() && self.current_index == self.active_questions.len() - 1
    }

    /// Whether the committed choice matches the current answer.
    ///
    /// `None` until a choice has been submitted for the current question.
    #[must_use]
    pub fn is_answer_correct(&self) -> Option<bool> {
        let choice = self.selected_choice.as_deref()?;
        let question = self.current_question()?;
        Some(question.is_correct(choice))
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.active_questions.is_empty() {
            QuizPhase::Loading
        } else if self.finished {
            QuizPhase::Complete
        } else {
            QuizPhase::InProgress
        }
    }

    /// Clear everything tied to the current question.
    pub(crate) fn clear_transient(&mut self) {
        self.revealed = false;
        self.selected_choice = None;
        self.result_shown = false;
        self.choices.clear();
    }

    pub(crate) fn clear_tracking(&mut self) {
        self.incorrect_indices.clear();
        self.correct_indices.clear();
    }
}

/// Append `index` unless it is already present.
pub(crate) fn insert_unique(indices: &mut Vec<usize>, index: usize) -> bool {
    if indices.contains(&index) {
        return false;
    }
    indices.push(index);
    true
}
