#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod sinks;
pub mod sources;

pub use drill_core::Clock;
pub use sessions as session;

pub use error::{SessionError, SinkError, SourceError};
pub use sessions::{
    DrillSession, ExitPolicy, LaunchedSession, NavigationIntent, SessionLauncher, SessionResults,
};
pub use sinks::{InMemoryMissedQuestions, MissedQuestionSink};
pub use sources::{Deck, JsonFileSource, QuestionSource, StaticSource};
