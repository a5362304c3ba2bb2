use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::model::{Question, QuizMode};

//
// ─── CALLBACKS ─────────────────────────────────────────────────────────────────
//

/// Side-effect hook invoked with the question and its index in the active list.
pub type AnswerCallback = Arc<dyn Fn(&Question, usize) + Send + Sync>;

/// Produces a flat pool of candidate strings from all active questions.
pub type PoolGenerator = Arc<dyn Fn(&[Question]) -> Vec<String> + Send + Sync>;

/// Produces the complete choice list for one question. Output is used verbatim.
pub type CustomGenerator = Arc<dyn Fn(&Question, &[Question]) -> Vec<String> + Send + Sync>;

pub const DEFAULT_MAX_QUESTIONS: usize = 20;
pub const DEFAULT_CHOICE_COUNT: usize = 4;

//
// ─── CHOICE GENERATION ─────────────────────────────────────────────────────────
//

/// Strategy used to build the choice list in choice mode.
///
/// When both generators are set the custom generator wins. A `choice_count`
/// below 2 is a caller error; the engine does not reject it and the resulting
/// choice lists are unspecified.
#[derive(Clone)]
pub struct ChoiceGeneration {
    choice_count: usize,
    pool_generator: Option<PoolGenerator>,
    custom_generator: Option<CustomGenerator>,
}

impl ChoiceGeneration {
    #[must_use]
    pub fn new(choice_count: usize) -> Self {
        Self {
            choice_count,
            pool_generator: None,
            custom_generator: None,
        }
    }

    #[must_use]
    pub fn with_pool_generator(
        mut self,
        generator: impl Fn(&[Question]) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.pool_generator = Some(Arc::new(generator));
        self
    }

    #[must_use]
    pub fn with_custom_generator(
        mut self,
        generator: impl Fn(&Question, &[Question]) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.custom_generator = Some(Arc::new(generator));
        self
    }

    #[must_use]
    pub fn choice_count(&self) -> usize {
        self.choice_count
    }

    #[must_use]
    pub fn pool_generator(&self) -> Option<&PoolGenerator> {
        self.pool_generator.as_ref()
    }

    #[must_use]
    pub fn custom_generator(&self) -> Option<&CustomGenerator> {
        self.custom_generator.as_ref()
    }
}

impl Default for ChoiceGeneration {
    fn default() -> Self {
        Self::new(DEFAULT_CHOICE_COUNT)
    }
}

impl fmt::Debug for ChoiceGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoiceGeneration")
            .field("choice_count", &self.choice_count)
            .field("pool_generator", &self.pool_generator.is_some())
            .field("custom_generator", &self.custom_generator.is_some())
            .finish()
    }
}

//
// ─── ENGINE CONFIG ─────────────────────────────────────────────────────────────
//

/// Session-wide engine configuration.
///
/// Held by value inside the engine and only changed through the merge step of
/// `Engine::initialize_quiz`.
#[derive(Clone)]
pub struct EngineConfig {
    initial_mode: QuizMode,
    max_questions: usize,
    shuffle_questions: bool,
    choice_generation: ChoiceGeneration,
    enable_incorrect_tracking: bool,
    on_correct: Option<AnswerCallback>,
    on_incorrect: Option<AnswerCallback>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_mode: QuizMode::Reveal,
            max_questions: DEFAULT_MAX_QUESTIONS,
            shuffle_questions: true,
            choice_generation: ChoiceGeneration::default(),
            enable_incorrect_tracking: true,
            on_correct: None,
            on_incorrect: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_initial_mode(mut self, mode: QuizMode) -> Self {
        self.initial_mode = mode;
        self
    }

    #[must_use]
    pub fn with_max_questions(mut self, max: usize) -> Self {
        self.max_questions = max;
        self
    }

    #[must_use]
    pub fn with_shuffle_questions(mut self, shuffle: bool) -> Self {
        self.shuffle_questions = shuffle;
        self
    }

    #[must_use]
    pub fn with_choice_generation(mut self, generation: ChoiceGeneration) -> Self {
        self.choice_generation = generation;
        self
    }

    #[must_use]
    pub fn with_incorrect_tracking(mut self, enabled: bool) -> Self {
        self.enable_incorrect_tracking = enabled;
        self
    }

    #[must_use]
    pub fn with_on_correct(
        mut self,
        callback: impl Fn(&Question, usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_correct = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn with_on_incorrect(
        mut self,
        callback: impl Fn(&Question, usize) + Send + Sync + 'static,
    ) -> Self {
        self.on_incorrect = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn initial_mode(&self) -> QuizMode {
        self.initial_mode
    }

    #[must_use]
    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }

    #[must_use]
    pub fn choice_generation(&self) -> &ChoiceGeneration {
        &self.choice_generation
    }

    #[must_use]
    pub fn incorrect_tracking(&self) -> bool {
        self.enable_incorrect_tracking
    }

    #[must_use]
    pub fn on_correct(&self) -> Option<&AnswerCallback> {
        self.on_correct.as_ref()
    }

    #[must_use]
    pub fn on_incorrect(&self) -> Option<&AnswerCallback> {
        self.on_incorrect.as_ref()
    }

    /// Shallow merge: every field set in `overrides` replaces the current value.
    pub fn merge(&mut self, overrides: EngineConfigOverride) {
        let EngineConfigOverride {
            initial_mode,
            max_questions,
            shuffle_questions,
            choice_generation,
            enable_incorrect_tracking,
            on_correct,
            on_incorrect,
        } = overrides;

        if let Some(mode) = initial_mode {
            self.initial_mode = mode;
        }
        if let Some(max) = max_questions {
            self.max_questions = max;
        }
        if let Some(shuffle) = shuffle_questions {
            self.shuffle_questions = shuffle;
        }
        if let Some(generation) = choice_generation {
            self.choice_generation = generation;
        }
        if let Some(enabled) = enable_incorrect_tracking {
            self.enable_incorrect_tracking = enabled;
        }
        if on_correct.is_some() {
            self.on_correct = on_correct;
        }
        if on_incorrect.is_some() {
            self.on_incorrect = on_incorrect;
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("initial_mode", &self.initial_mode)
            .field("max_questions", &self.max_questions)
            .field("shuffle_questions", &self.shuffle_questions)
            .field("choice_generation", &self.choice_generation)
            .field("enable_incorrect_tracking", &self.enable_incorrect_tracking)
            .field("on_correct", &self.on_correct.is_some())
            .field("on_incorrect", &self.on_incorrect.is_some())
            .finish()
    }
}

/// Per-call overrides applied on top of the session config at initialization.
#[derive(Clone, Default)]
pub struct EngineConfigOverride {
    pub initial_mode: Option<QuizMode>,
    pub max_questions: Option<usize>,
    pub shuffle_questions: Option<bool>,
    pub choice_generation: Option<ChoiceGeneration>,
    pub enable_incorrect_tracking: Option<bool>,
    pub on_correct: Option<AnswerCallback>,
    pub on_incorrect: Option<AnswerCallback>,
}

impl EngineConfigOverride {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.initial_mode.is_none()
            && self.max_questions.is_none()
            && self.shuffle_questions.is_none()
            && self.choice_generation.is_none()
            && self.enable_incorrect_tracking.is_none()
            && self.on_correct.is_none()
            && self.on_incorrect.is_none()
    }
}

impl fmt::Debug for EngineConfigOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfigOverride")
            .field("initial_mode", &self.initial_mode)
            .field("max_questions", &self.max_questions)
            .field("shuffle_questions", &self.shuffle_questions)
            .field("choice_generation", &self.choice_generation)
            .field("enable_incorrect_tracking", &self.enable_incorrect_tracking)
            .field("on_correct", &self.on_correct.is_some())
            .field("on_incorrect", &self.on_incorrect.is_some())
            .finish()
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Plain-data settings as read from deck files or the command line.
///
/// Unlike [`EngineConfig`], a draft is validated before use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfigDraft {
    pub initial_mode: Option<QuizMode>,
    pub max_questions: Option<usize>,
    pub shuffle_questions: Option<bool>,
    pub choice_count: Option<usize>,
    pub enable_incorrect_tracking: Option<bool>,
}

impl EngineConfigDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill every unset field of `self` from `base`.
    #[must_use]
    pub fn layered_over(self, base: Self) -> Self {
        Self {
            initial_mode: self.initial_mode.or(base.initial_mode),
            max_questions: self.max_questions.or(base.max_questions),
            shuffle_questions: self.shuffle_questions.or(base.shuffle_questions),
            choice_count: self.choice_count.or(base.choice_count),
            enable_incorrect_tracking: self
                .enable_incorrect_tracking
                .or(base.enable_incorrect_tracking),
        }
    }

    /// Validate the draft and resolve it against the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMaxQuestions` when `max_questions` is zero.
    /// Returns `ConfigError::InvalidChoiceCount` when `choice_count` is below 2.
    pub fn validate(self) -> Result<EngineConfig, ConfigError> {
        let defaults = EngineConfig::default();

        let max_questions = self.max_questions.unwrap_or(defaults.max_questions);
        if max_questions == 0 {
            return Err(ConfigError::InvalidMaxQuestions);
        }

        let choice_count = self
            .choice_count
            .unwrap_or(defaults.choice_generation.choice_count);
        if choice_count < 2 {
            return Err(ConfigError::InvalidChoiceCount(choice_count));
        }

        let initial_mode = self.initial_mode.unwrap_or(defaults.initial_mode);
        let shuffle_questions = self.shuffle_questions.unwrap_or(defaults.shuffle_questions);
        let enable_incorrect_tracking = self
            .enable_incorrect_tracking
            .unwrap_or(defaults.enable_incorrect_tracking);

        Ok(defaults
            .with_initial_mode(initial_mode)
            .with_max_questions(max_questions)
            .with_shuffle_questions(shuffle_questions)
            .with_choice_generation(ChoiceGeneration::new(choice_count))
            .with_incorrect_tracking(enable_incorrect_tracking))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
