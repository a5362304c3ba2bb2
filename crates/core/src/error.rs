use thiserror::Error;

/// Errors raised while validating engine configuration.
///
/// The engine itself never validates its config; these only surface from
/// [`crate::config::EngineConfigDraft::validate`] and mode parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("max questions must be > 0")]
    InvalidMaxQuestions,

    #[error("choice count must be at least 2, got {0}")]
    InvalidChoiceCount(usize),

    #[error("unknown quiz mode: {0}")]
    UnknownMode(String),
}
