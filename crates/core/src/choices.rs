use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::collections::HashSet;
use tracing::warn;

use crate::config::ChoiceGeneration;
use crate::model::Question;

/// Built-in distractors used when the deck itself has too few distinct answers.
///
/// Padding stops once this list is used up, so the default strategy can only
/// guarantee `choice_count` entries when `choice_count - 1` fits within the
/// real alternatives plus these fillers.
pub const FILLER_VOCABULARY: &[&str] = &[
    "None of the above",
    "All of the above",
    "It depends",
    "Not enough information",
    "Always",
    "Never",
    "Sometimes",
    "True",
    "False",
    "Zero",
    "Undefined",
    "Unknown",
];

/// Build the candidate answers for `question`.
///
/// Strategy order:
/// 1. a custom generator, whose output is returned untouched
/// 2. a pool generator, sampled for wrong answers
/// 3. the answers of the other questions, padded from [`FILLER_VOCABULARY`]
///
/// For strategies 2 and 3 the correct answer appears exactly once and the
/// final order is shuffled. Pool output is de-duplicated before sampling, so a
/// pool with repeated entries can yield fewer than `choice_count - 1` wrong
/// answers; it is never padded.
pub fn compute_choices<R: Rng + ?Sized>(
    question: &Question,
    all_questions: &[Question],
    generation: &ChoiceGeneration,
    rng: &mut R,
) -> Vec<String> {
    if let Some(custom) = generation.custom_generator() {
        return custom(question, all_questions);
    }

    let wanted = generation.choice_count().saturating_sub(1);
    let answer = question.answer();

    let wrong = if let Some(pool_generator) = generation.pool_generator() {
        let pool = distinct_excluding(pool_generator(all_questions), answer);
        if pool.is_empty() {
            warn!(prompt = question.prompt(), "choice pool has no usable distractors");
        }
        sample(&pool, wanted, rng)
    } else {
        let alternatives = distinct_excluding(
            all_questions.iter().map(|q| q.answer().to_owned()).collect(),
            answer,
        );
        let mut wrong = sample(&alternatives, wanted, rng);
        if wrong.len() < wanted {
            pad_with_fillers(&mut wrong, answer, wanted, rng);
        }
        wrong
    };

    let mut choices = Vec::with_capacity(wrong.len() + 1);
    choices.push(answer.to_owned());
    choices.extend(wrong);
    choices.shuffle(rng);
    choices
}

/// Remove `answer` and duplicates while keeping first-seen order.
fn distinct_excluding(candidates: Vec<String>, answer: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| candidate != answer && seen.insert(candidate.clone()))
        .collect()
}

fn sample<R: Rng + ?Sized>(candidates: &[String], amount: usize, rng: &mut R) -> Vec<String> {
    candidates.choose_multiple(rng, amount).cloned().collect()
}

fn pad_with_fillers<R: Rng + ?Sized>(
    wrong: &mut Vec<String>,
    answer: &str,
    wanted: usize,
    rng: &mut R,
) {
    let mut fillers = FILLER_VOCABULARY.to_vec();
    fillers.shuffle(rng);

    for filler in fillers {
        if wrong.len() >= wanted {
            return;
        }
        if filler == answer || wrong.iter().any(|existing| existing == filler) {
            continue;
        }
        wrong.push(filler.to_owned());
    }

    if wrong.len() < wanted {
        warn!(
            wanted,
            found = wrong.len(),
            "filler vocabulary exhausted while padding choices"
        );
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn deck(pairs: &[(&str, &str)]) -> Vec<Question> {
        pairs.iter().map(|(p, a)| Question::new(*p, *a)).collect()
    }

    fn count_of(choices: &[String], value: &str) -> usize {
        choices.iter().filter(|c| c.as_str() == value).count()
    }

    #[test]
    fn default_strategy_uses_other_answers() {
        let questions = deck(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4"), ("e", "5")]);
        let mut rng = StdRng::seed_from_u64(7);

        let choices = compute_choices(&questions[0], &questions, &ChoiceGeneration::new(4), &mut rng);

        assert_eq!(choices.len(), 4);
        assert_eq!(count_of(&choices, "1"), 1);
        for choice in &choices {
            assert!(["1", "2", "3", "4", "5"].contains(&choice.as_str()));
        }
    }

    #[test]
    fn default_strategy_pads_from_fillers() {
        let questions = deck(&[("a", "left"), ("b", "right")]);
        let mut rng = StdRng::seed_from_u64(1);

        let choices = compute_choices(&questions[0], &questions, &ChoiceGeneration::new(4), &mut rng);

        assert_eq!(choices.len(), 4);
        assert_eq!(count_of(&choices, "left"), 1);
        assert_eq!(count_of(&choices, "right"), 1);
        let fillers = choices
            .iter()
            .filter(|c| FILLER_VOCABULARY.contains(&c.as_str()))
            .count();
        assert_eq!(fillers, 2);
        let unique: HashSet<_> = choices.iter().collect();
        assert_eq!(unique.len(), choices.len());
    }

    #[test]
    fn duplicate_answers_count_once() {
        let questions = deck(&[("a", "x"), ("b", "y"), ("c", "y"), ("d", "y")]);
        let mut rng = StdRng::seed_from_u64(3);

        let choices = compute_choices(&questions[0], &questions, &ChoiceGeneration::new(3), &mut rng);

        assert_eq!(choices.len(), 3);
        assert_eq!(count_of(&choices, "y"), 1);
    }

    #[test]
    fn filler_equal_to_answer_is_skipped() {
        let questions = deck(&[("is water wet", "True")]);
        let mut rng = StdRng::seed_from_u64(11);

        let choices = compute_choices(
            &questions[0],
            &questions,
            &ChoiceGeneration::new(FILLER_VOCABULARY.len()),
            &mut rng,
        );

        assert_eq!(choices.len(), FILLER_VOCABULARY.len());
        assert_eq!(count_of(&choices, "True"), 1);
    }

    #[test]
    fn padding_stops_when_vocabulary_runs_out() {
        let questions = deck(&[("only", "answer")]);
        let mut rng = StdRng::seed_from_u64(5);

        let choices = compute_choices(
            &questions[0],
            &questions,
            &ChoiceGeneration::new(FILLER_VOCABULARY.len() + 10),
            &mut rng,
        );

        assert_eq!(choices.len(), FILLER_VOCABULARY.len() + 1);
        assert_eq!(count_of(&choices, "answer"), 1);
    }

    #[test]
    fn pool_strategy_excludes_answer_and_limits_count() {
        let questions = deck(&[("capital of Peru", "Lima")]);
        let generation = ChoiceGeneration::new(3).with_pool_generator(|_| {
            vec![
                "Lima".to_owned(),
                "Quito".to_owned(),
                "Bogota".to_owned(),
                "Quito".to_owned(),
                "La Paz".to_owned(),
            ]
        });
        let mut rng = StdRng::seed_from_u64(9);

        let choices = compute_choices(&questions[0], &questions, &generation, &mut rng);

        assert_eq!(choices.len(), 3);
        assert_eq!(count_of(&choices, "Lima"), 1);
        let unique: HashSet<_> = choices.iter().collect();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn small_pool_is_not_padded() {
        let questions = deck(&[("q", "a")]);
        let generation = ChoiceGeneration::new(4).with_pool_generator(|_| vec!["b".to_owned()]);
        let mut rng = StdRng::seed_from_u64(2);

        let mut choices = compute_choices(&questions[0], &questions, &generation, &mut rng);
        choices.sort();

        assert_eq!(choices, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn repeated_pool_entries_count_once() {
        let questions = deck(&[("q", "a")]);
        let generation = ChoiceGeneration::new(4)
            .with_pool_generator(|_| vec!["b".to_owned(), "b".to_owned(), "c".to_owned()]);
        let mut rng = StdRng::seed_from_u64(8);

        let mut choices = compute_choices(&questions[0], &questions, &generation, &mut rng);
        choices.sort();

        assert_eq!(choices, vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]);
    }

    #[test]
    fn custom_generator_wins_and_is_verbatim() {
        let questions = deck(&[("q", "a"), ("r", "b")]);
        let generation = ChoiceGeneration::new(4)
            .with_pool_generator(|_| vec!["pool".to_owned()])
            .with_custom_generator(|question, all| {
                vec![format!("{}!", question.answer()), all.len().to_string()]
            });
        let mut rng = StdRng::seed_from_u64(4);

        let choices = compute_choices(&questions[0], &questions, &generation, &mut rng);

        assert_eq!(choices, vec!["a!".to_owned(), "2".to_owned()]);
    }
}
