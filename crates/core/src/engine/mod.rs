mod state;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt;
use tracing::debug;

use crate::choices;
use crate::config::{EngineConfig, EngineConfigOverride};
use crate::model::{Question, QuizMode};

pub use state::{EngineState, QuizPhase};
use state::insert_unique;

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Single-session quiz state machine.
///
/// Every action commits its state change before anything observable happens:
/// choices for a new question are recomputed right after the index or mode
/// changes, and `on_correct`/`on_incorrect` run only once tracking is updated.
/// Callbacks must not call back into the same engine.
///
/// No action fails. With no questions loaded every action is a no-op.
pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    rng: StdRng,
}

impl Engine {
    /// Create an engine whose shuffles are seeded from the thread RNG.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Create an engine with reproducible shuffling and choice selection.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: StdRng) -> Self {
        let state = EngineState {
            mode: config.initial_mode(),
            ..EngineState::default()
        };
        Self { config, state, rng }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.state.phase()
    }

    /// Load a new question list, replacing whatever was active.
    ///
    /// `overrides` is merged into the session config first and stays in effect
    /// for later calls. The list is then shuffled (if enabled), truncated to
    /// `max_questions`, and all progress and tracking is cleared. The mode is
    /// reset to the configured initial mode.
    pub fn initialize_quiz(
        &mut self,
        questions: Vec<Question>,
        overrides: Option<EngineConfigOverride>,
    ) {
        if let Some(overrides) = overrides {
            self.config.merge(overrides);
        }

        let mut questions = questions;
        if self.config.shuffle_questions() {
            questions.shuffle(&mut self.rng);
        }
        questions.truncate(self.config.max_questions());

        self.state = EngineState {
            active_questions: questions,
            mode: self.config.initial_mode(),
            ..EngineState::default()
        };
        debug!(
            count = self.state.active_questions.len(),
            mode = %self.state.mode,
            "quiz initialized"
        );

        self.refresh_choices();
    }

    /// Switch presentation mode without moving the current index.
    pub fn set_mode(&mut self, mode: QuizMode) {
        self.state.mode = mode;
        self.state.clear_transient();
        debug!(%mode, index = self.state.current_index, "mode changed");

        self.refresh_choices();
    }

    /// Recompute the choices for the current question regardless of mode.
    ///
    /// Returns the freshly stored list; empty when no question is loaded.
    pub fn compute_choices(&mut self) -> &[String] {
        let computed = match self.state.current_question() {
            Some(question) => choices::compute_choices(
                question,
                &self.state.active_questions,
                self.config.choice_generation(),
                &mut self.rng,
            ),
            None => Vec::new(),
        };
        self.state.choices = computed;
        &self.state.choices
    }

    /// Commit an answer for the current question.
    ///
    /// Only the first submission per question counts; later ones are ignored.
    /// Returns whether the submission was accepted.
    pub fn submit_choice(&mut self, choice: &str) -> bool {
        if self.state.selected_choice.is_some() {
            return false;
        }
        let index = self.state.current_index;
        let Some(correct) = self.state.current_question().map(|q| q.is_correct(choice)) else {
            return false;
        };

        self.state.selected_choice = Some(choice.to_owned());
        self.state.result_shown = true;
        self.state.revealed = true;

        if correct {
            insert_unique(&mut self.state.correct_indices, index);
        } else if self.config.incorrect_tracking() {
            insert_unique(&mut self.state.incorrect_indices, index);
        }
        debug!(index, correct, "choice submitted");

        if correct {
            self.notify_correct(index);
        } else {
            self.notify_incorrect(index);
        }
        true
    }

    /// Move to the next question, or finish when already on the last one.
    pub fn advance(&mut self) {
        let total = self.state.active_questions.len();
        if total == 0 {
            return;
        }

        if self.state.current_index + 1 < total {
            self.state.current_index += 1;
            self.state.clear_transient();
            debug!(index = self.state.current_index, "advanced");
            self.refresh_choices();
        } else if !self.state.finished {
            self.state.finished = true;
            debug!(total, "quiz finished");
        }
    }

    /// Alias of [`Engine::advance`].
    pub fn next_question(&mut self) {
        self.advance();
    }

    /// First tap reveals the answer, the second moves on.
    pub fn handle_reveal_mode_tap(&mut self) {
        if self.state.active_questions.is_empty() {
            return;
        }
        if self.state.revealed {
            self.advance();
        } else {
            self.state.revealed = true;
            debug!(index = self.state.current_index, "answer revealed");
        }
    }

    /// Record the current question as wrong, independent of any submitted choice.
    ///
    /// Always tracked, even when automatic incorrect tracking is disabled.
    pub fn mark_incorrect(&mut self) {
        if self.state.current_question().is_none() {
            return;
        }
        let index = self.state.current_index;
        insert_unique(&mut self.state.incorrect_indices, index);
        debug!(index, "marked incorrect");
        self.notify_incorrect(index);
    }

    /// Record the current question as right, independent of any submitted choice.
    pub fn mark_correct(&mut self) {
        if self.state.current_question().is_none() {
            return;
        }
        let index = self.state.current_index;
        insert_unique(&mut self.state.correct_indices, index);
        debug!(index, "marked correct");
        self.notify_correct(index);
    }

    /// Restart from the first question keeping the same question order.
    pub fn reset_quiz(&mut self) {
        self.state.current_index = 0;
        self.state.finished = false;
        self.state.clear_transient();
        self.state.clear_tracking();
        debug!(count = self.state.active_questions.len(), "quiz reset");

        self.refresh_choices();
    }

    /// Derived step run after any change to the index or mode.
    fn refresh_choices(&mut self) {
        if self.state.mode == QuizMode::Choice {
            self.compute_choices();
        } else {
            self.state.choices.clear();
        }
    }

    fn notify_correct(&self, index: usize) {
        if let (Some(callback), Some(question)) =
            (self.config.on_correct(), self.state.active_questions.get(index))
        {
            callback(question, index);
        }
    }

    fn notify_incorrect(&self, index: usize) {
        if let (Some(callback), Some(question)) =
            (self.config.on_incorrect(), self.state.active_questions.get(index))
        {
            callback(question, index);
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("questions_len", &self.state.active_questions.len())
            .field("current_index", &self.state.current_index)
            .field("mode", &self.state.mode)
            .field("finished", &self.state.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
