use std::sync::Arc;

use drill_core::{Clock, Engine, EngineConfigDraft, EngineConfigOverride};

use super::service::DrillSession;
use crate::error::SessionError;
use crate::sinks::MissedQuestionSink;
use crate::sources::QuestionSource;

/// A started session plus the deck metadata it came from.
#[derive(Debug)]
pub struct LaunchedSession {
    pub title: Option<String>,
    pub session: DrillSession,
}

/// Loads a deck from a source, resolves its settings and starts a session.
///
/// Settings given to the launcher take precedence over the deck's own.
#[derive(Clone, Default)]
pub struct SessionLauncher {
    clock: Clock,
    seed: Option<u64>,
    settings: EngineConfigDraft,
    missed_sink: Option<Arc<dyn MissedQuestionSink>>,
}

impl SessionLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Make question order and choice selection reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: EngineConfigDraft) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_missed_sink(mut self, sink: Arc<dyn MissedQuestionSink>) -> Self {
        self.missed_sink = Some(sink);
        self
    }

    /// Load the deck and start a fresh session on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Source` when the deck cannot be loaded and
    /// `SessionError::Config` when the combined settings are invalid.
    pub fn launch(&self, source: &dyn QuestionSource) -> Result<LaunchedSession, SessionError> {
        let deck = source.load_deck()?;
        let config = self.settings.clone().layered_over(deck.settings).validate()?;

        let engine = match self.seed {
            Some(seed) => Engine::with_seed(config, seed),
            None => Engine::new(config),
        };
        let mut session = DrillSession::with_engine(engine).with_clock(self.clock);
        if let Some(sink) = self.missed_sink.clone() {
            session = session.with_missed_sink(sink);
        }
        session.start(deck.questions, EngineConfigOverride::new());

        Ok(LaunchedSession {
            title: deck.title,
            session,
        })
    }
}

impl std::fmt::Debug for SessionLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLauncher")
            .field("clock", &self.clock)
            .field("seed", &self.seed)
            .field("settings", &self.settings)
            .field("missed_sink", &self.missed_sink.is_some())
            .finish()
    }
}
