use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;

use drill_core::{EngineConfigDraft, Question, QuizMode, fixed_now};
use serde_json::json;
use services::{
    Clock, Deck, InMemoryMissedQuestions, JsonFileSource, SessionError, SessionLauncher,
    SessionResults, SourceError, StaticSource,
};

const DECK: &str = r#"{
    "title": "Elements",
    "settings": { "initialMode": "choice", "shuffleQuestions": false, "choiceCount": 3 },
    "questions": [
        { "prompt": "H", "answer": "Hydrogen" },
        { "prompt": "He", "answer": "Helium" },
        { "prompt": "Li", "answer": "Lithium" },
        { "prompt": "Be", "answer": "Beryllium" }
    ]
}"#;

fn deck_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DECK.as_bytes()).unwrap();
    file
}

#[test]
fn choice_session_runs_to_completion_from_file() {
    let file = deck_file();
    let sink = InMemoryMissedQuestions::new();
    let launched = SessionLauncher::new()
        .with_clock(Clock::fixed(fixed_now()))
        .with_seed(Some(7))
        .with_missed_sink(Arc::new(sink.clone()))
        .launch(&JsonFileSource::new(file.path()))
        .unwrap();

    assert_eq!(launched.title.as_deref(), Some("Elements"));
    let mut session = launched.session;
    assert_eq!(session.state().mode(), QuizMode::Choice);

    let finished: Rc<RefCell<Option<SessionResults>>> = Rc::new(RefCell::new(None));
    let slot = Rc::clone(&finished);
    session.on_finished(move |results| *slot.borrow_mut() = Some(results.clone()));

    for round in 0..4 {
        let state = session.state();
        assert_eq!(state.choices().len(), 3);
        let answer = state.current_question().unwrap().answer().to_owned();
        let pick = if round == 1 {
            state
                .choices()
                .iter()
                .find(|c| **c != answer)
                .cloned()
                .unwrap()
        } else {
            answer
        };
        session.submit_choice(&pick);
        session.advance();
    }

    let results = finished.borrow().clone().expect("finished callback fired");
    assert_eq!(results.total, 4);
    assert_eq!(results.correct, 3);
    assert_eq!(results.incorrect, 1);
    assert_eq!(results.missed[0].prompt(), "He");
    assert_eq!(results.started_at, Some(fixed_now()));
    assert_eq!(results.finished_at, Some(fixed_now()));
    assert_eq!(results, session.summarize());

    let missed = sink.missed().unwrap();
    assert_eq!(missed.len(), 1);
    assert_eq!(missed[0].answer(), "Helium");
}

#[test]
fn launcher_settings_override_deck_settings() {
    let file = deck_file();
    let settings = EngineConfigDraft {
        initial_mode: Some(QuizMode::Reveal),
        max_questions: Some(2),
        ..EngineConfigDraft::default()
    };

    let launched = SessionLauncher::new()
        .with_settings(settings)
        .with_seed(Some(1))
        .launch(&JsonFileSource::new(file.path()))
        .unwrap();

    let state = launched.session.state();
    assert_eq!(state.mode(), QuizMode::Reveal);
    assert_eq!(state.question_count(), 2);
    assert!(state.choices().is_empty());
}

#[test]
fn invalid_settings_surface_as_config_error() {
    let settings = EngineConfigDraft {
        choice_count: Some(1),
        ..EngineConfigDraft::default()
    };
    let source = StaticSource::new(Deck::from_json(DECK).unwrap());

    let err = SessionLauncher::new()
        .with_settings(settings)
        .launch(&source)
        .unwrap_err();

    assert!(matches!(err, SessionError::Config(_)));
}

#[test]
fn empty_source_surfaces_as_source_error() {
    let err = SessionLauncher::new()
        .launch(&StaticSource::new(Deck::default()))
        .unwrap_err();
    assert!(matches!(err, SessionError::Source(SourceError::Empty)));
}

#[test]
fn bundled_sample_deck_loads() {
    let deck = Deck::from_json(include_str!("../../../decks/capitals.json")).unwrap();
    assert_eq!(deck.questions.len(), 10);
    assert_eq!(deck.settings.initial_mode, Some(QuizMode::Choice));

    let launched = SessionLauncher::new()
        .with_seed(Some(2))
        .launch(&StaticSource::new(deck))
        .unwrap();
    assert_eq!(launched.session.state().question_count(), 8);
    assert_eq!(launched.session.state().choices().len(), 4);
}

#[test]
fn missed_questions_keep_annotation_and_extras() {
    let deck = Deck::from_questions(vec![
        Question::new("Fe", "Iron")
            .with_annotation("from Latin ferrum")
            .with_extra("group", json!(8)),
        Question::new("Cu", "Copper"),
    ]);
    let launched = SessionLauncher::new()
        .with_seed(Some(2))
        .with_settings(EngineConfigDraft {
            shuffle_questions: Some(false),
            ..EngineConfigDraft::default()
        })
        .launch(&StaticSource::new(deck))
        .unwrap();
    let mut session = launched.session;

    session.mark_incorrect();
    session.next_question();
    assert_eq!(session.state().current_index(), 1);

    let missed = session.summarize().missed;
    assert_eq!(missed.len(), 1);
    assert_eq!(missed[0].annotation(), Some("from Latin ferrum"));
    assert_eq!(missed[0].extra().get("group"), Some(&json!(8)));

    let raw = serde_json::to_string(&missed[0]).unwrap();
    assert!(raw.contains(r#""group":8"#));
}
