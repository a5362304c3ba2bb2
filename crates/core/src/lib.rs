//! Quiz drill engine.
//!
//! [`Engine`] walks a user through a list of [`Question`]s in either reveal
//! or multiple-choice mode and tracks which ones were answered right or wrong.

#![forbid(unsafe_code)]

pub mod choices;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod time;

pub use choices::{FILLER_VOCABULARY, compute_choices};
pub use config::{
    AnswerCallback, ChoiceGeneration, CustomGenerator, EngineConfig, EngineConfigDraft,
    EngineConfigOverride, PoolGenerator,
};
pub use engine::{Engine, EngineState, QuizPhase};
pub use error::ConfigError;
pub use model::{Question, QuizMode};
pub use time::{Clock, fixed_now};
