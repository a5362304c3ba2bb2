//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use drill_core::ConfigError;

/// Errors emitted while loading questions from a source.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse deck: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("deck contains no questions")]
    Empty,

    #[error("question {index} has an empty {field}")]
    BlankField { index: usize, field: &'static str },
}

/// Errors emitted by a `MissedQuestionSink`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SinkError {
    #[error("missed-question sink unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted while bootstrapping a drill session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
