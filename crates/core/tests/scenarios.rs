use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use drill_core::{
    ChoiceGeneration, Engine, EngineConfig, FILLER_VOCABULARY, Question, QuizMode, QuizPhase,
};

fn deck(count: usize) -> Vec<Question> {
    (1..=count)
        .map(|i| Question::new(format!("Q{i}"), format!("A{i}")))
        .collect()
}

fn in_order() -> EngineConfig {
    EngineConfig::default()
        .with_shuffle_questions(false)
        .with_max_questions(10)
}

#[test]
fn five_questions_in_order_start_at_twenty_percent() {
    let mut engine = Engine::with_seed(in_order(), 1);
    engine.initialize_quiz(deck(5), None);

    let state = engine.state();
    assert_eq!(state.question_count(), 5);
    let prompts: Vec<_> = state.active_questions().iter().map(Question::prompt).collect();
    assert_eq!(prompts, vec!["Q1", "Q2", "Q3", "Q4", "Q5"]);
    assert!((state.progress_percent() - 20.0).abs() < 1e-9);
}

#[test]
fn max_questions_caps_the_session() {
    let mut engine = Engine::with_seed(in_order().with_max_questions(3), 1);
    engine.initialize_quiz(deck(5), None);
    assert_eq!(engine.state().question_count(), 3);
}

#[test]
fn reveal_walkthrough_of_two_questions() {
    let mut engine = Engine::with_seed(in_order(), 1);
    engine.initialize_quiz(deck(2), None);

    engine.handle_reveal_mode_tap();
    assert!(engine.state().is_revealed());

    engine.handle_reveal_mode_tap();
    assert_eq!(engine.state().current_index(), 1);

    engine.handle_reveal_mode_tap();
    engine.handle_reveal_mode_tap();
    assert!(engine.state().is_finished());
    assert_eq!(engine.phase(), QuizPhase::Complete);
}

#[test]
fn correct_choice_on_first_question() {
    let calls: Arc<Mutex<Vec<(Question, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&calls);
    let config = in_order()
        .with_initial_mode(QuizMode::Choice)
        .with_on_correct(move |question, index| {
            recorder.lock().unwrap().push((question.clone(), index));
        });
    let mut engine = Engine::with_seed(config, 1);
    engine.initialize_quiz(deck(4), None);

    engine.submit_choice("A1");

    assert_eq!(engine.state().correct_indices(), &[0]);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (Question::new("Q1", "A1"), 0));
}

#[test]
fn sparse_deck_is_padded_to_four_distinct_choices() {
    for seed in 0..20 {
        let config = in_order()
            .with_initial_mode(QuizMode::Choice)
            .with_choice_generation(ChoiceGeneration::new(4));
        let mut engine = Engine::with_seed(config, seed);
        engine.initialize_quiz(deck(2), None);

        let choices = engine.state().choices();
        assert_eq!(choices.len(), 4);
        assert_eq!(choices.iter().filter(|c| c.as_str() == "A1").count(), 1);
        assert!(choices.iter().any(|c| c == "A2"));
        let unique: HashSet<_> = choices.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(
            choices
                .iter()
                .filter(|c| c.as_str() != "A1" && c.as_str() != "A2")
                .all(|c| FILLER_VOCABULARY.contains(&c.as_str()))
        );
    }
}

#[test]
fn correct_answers_never_land_in_incorrect_set() {
    let mut engine = Engine::with_seed(in_order().with_initial_mode(QuizMode::Choice), 3);
    engine.initialize_quiz(deck(6), None);

    for i in 0..6 {
        if i % 2 == 0 {
            let answer = engine.state().current_question().unwrap().answer().to_owned();
            engine.submit_choice(&answer);
        } else {
            engine.submit_choice("not it");
        }
        engine.advance();
    }

    let state = engine.state();
    assert!(state.is_finished());
    assert_eq!(state.correct_indices(), &[0, 2, 4]);
    assert_eq!(state.incorrect_indices(), &[1, 3, 5]);
}
