use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

use drill_core::{
    AnswerCallback, Clock, Engine, EngineConfig, EngineConfigOverride, EngineState, Question,
    QuizMode,
};

use super::navigation::{ExitPolicy, NavigationIntent};
use super::results::SessionResults;
use crate::sinks::MissedQuestionSink;

type FinishedCallback = Box<dyn FnMut(&SessionResults)>;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One drill session: owns a single [`Engine`] and exposes summaries and
/// navigation to the host.
///
/// Engine actions are forwarded through the session so it can notice the
/// transition into the finished state and fire the `on_finished` callback
/// exactly once per completion.
pub struct DrillSession {
    engine: Engine,
    clock: Clock,
    loaded: Option<Vec<Question>>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    on_finished: Option<FinishedCallback>,
    finish_notified: bool,
    exit_policy: ExitPolicy,
    missed_sink: Option<Arc<dyn MissedQuestionSink>>,
    downstream_incorrect: Option<AnswerCallback>,
}

impl DrillSession {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_engine(Engine::new(config))
    }

    #[must_use]
    pub fn with_engine(engine: Engine) -> Self {
        Self {
            engine,
            clock: Clock::default(),
            loaded: None,
            started_at: None,
            finished_at: None,
            on_finished: None,
            finish_notified: false,
            exit_policy: ExitPolicy::default(),
            missed_sink: None,
            downstream_incorrect: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    /// Forward every incorrect answer to `sink`, in addition to any configured
    /// `on_incorrect` callback. Takes effect on the next [`DrillSession::start`].
    ///
    /// The engine's current `on_incorrect` is kept as the downstream callback;
    /// an `on_incorrect` passed to a later `start` replaces it.
    #[must_use]
    pub fn with_missed_sink(mut self, sink: Arc<dyn MissedQuestionSink>) -> Self {
        if self.missed_sink.is_none() {
            self.downstream_incorrect = self.engine.config().on_incorrect().cloned();
        }
        self.missed_sink = Some(sink);
        self
    }

    /// Register the callback run when the quiz reaches its finished state.
    pub fn on_finished(&mut self, callback: impl FnMut(&SessionResults) + 'static) {
        self.on_finished = Some(Box::new(callback));
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn state(&self) -> &EngineState {
        self.engine.state()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Time spent on the current run, frozen once the quiz finishes.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started_at?;
        Some(match self.finished_at {
            Some(finished) => finished - started,
            None => self.clock.elapsed_since(started),
        })
    }

    /// Feed `questions` into the engine.
    ///
    /// Calling again with an identical list is a no-op, so hosts may call this
    /// on every render. Returns whether the engine was (re)initialized.
    pub fn start(&mut self, questions: Vec<Question>, overrides: EngineConfigOverride) -> bool {
        if self.loaded.as_ref() == Some(&questions) {
            return false;
        }

        let overrides = self.wire_missed_sink(overrides);
        let overrides = (!overrides.is_empty()).then_some(overrides);
        self.engine.initialize_quiz(questions.clone(), overrides);
        self.loaded = Some(questions);
        self.started_at = Some(self.clock.now());
        self.finished_at = None;
        self.finish_notified = false;

        info!(
            questions = self.engine.state().question_count(),
            mode = %self.engine.state().mode(),
            "drill session started"
        );
        true
    }

    /// Summary of the session so far. Valid at any time, not only once finished.
    #[must_use]
    pub fn summarize(&self) -> SessionResults {
        SessionResults::from_state(self.engine.state(), self.started_at, self.finished_at)
    }

    /// Resolve the exit intent: handler, then default path, then back.
    pub fn exit(&mut self) -> NavigationIntent {
        self.exit_policy.resolve()
    }

    /// Plain back navigation, ignoring any exit handler or default path.
    #[must_use]
    pub fn back(&self) -> NavigationIntent {
        NavigationIntent::Back
    }

    //
    // ─── ENGINE ACTIONS ───────────────────────────────────────────────────────
    //

    pub fn set_mode(&mut self, mode: QuizMode) {
        self.engine.set_mode(mode);
    }

    pub fn compute_choices(&mut self) -> &[String] {
        self.engine.compute_choices()
    }

    pub fn submit_choice(&mut self, choice: &str) -> bool {
        self.engine.submit_choice(choice)
    }

    pub fn mark_correct(&mut self) {
        self.engine.mark_correct();
    }

    pub fn mark_incorrect(&mut self) {
        self.engine.mark_incorrect();
    }

    pub fn advance(&mut self) {
        self.engine.advance();
        self.notify_if_finished();
    }

    pub fn next_question(&mut self) {
        self.advance();
    }

    pub fn handle_reveal_mode_tap(&mut self) {
        self.engine.handle_reveal_mode_tap();
        self.notify_if_finished();
    }

    /// Restart the same question list; a later completion notifies again.
    pub fn reset(&mut self) {
        self.engine.reset_quiz();
        self.started_at = Some(self.clock.now());
        self.finished_at = None;
        self.finish_notified = false;
    }

    fn notify_if_finished(&mut self) {
        if self.finish_notified || !self.engine.state().is_finished() {
            return;
        }
        self.finish_notified = true;
        self.finished_at = Some(self.clock.now());

        let results = self.summarize();
        info!(
            total = results.total,
            correct = results.correct,
            incorrect = results.incorrect,
            "drill session finished"
        );
        if let Some(callback) = self.on_finished.as_mut() {
            callback(&results);
        }
    }

    /// Wrap the caller's `on_incorrect` so the sink sees every wrong answer.
    ///
    /// The engine config holds the wrapper after the first start, so the
    /// downstream callback is kept on the session and never read back.
    fn wire_missed_sink(&mut self, mut overrides: EngineConfigOverride) -> EngineConfigOverride {
        let Some(sink) = self.missed_sink.clone() else {
            return overrides;
        };
        if let Some(replacement) = overrides.on_incorrect.take() {
            self.downstream_incorrect = Some(replacement);
        }
        let downstream = self.downstream_incorrect.clone();

        let callback: AnswerCallback = Arc::new(move |question: &Question, index: usize| {
            if let Err(err) = sink.record_missed(question, index) {
                warn!(index, error = %err, "failed to record missed question");
            }
            if let Some(downstream) = downstream.as_ref() {
                downstream(question, index);
            }
        });
        overrides.on_incorrect = Some(callback);
        overrides
    }
}

impl fmt::Debug for DrillSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillSession")
            .field("engine", &self.engine)
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .field("finish_notified", &self.finish_notified)
            .field("exit_policy", &self.exit_policy)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
