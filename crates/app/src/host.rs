use std::io::{BufRead, Write};

use anyhow::Result;
use drill_core::QuizMode;
use services::{DrillSession, NavigationIntent, SessionResults};

/// One line of user input, interpreted against the current mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Empty line: reveal / next.
    Continue,
    /// 1-based choice number.
    Answer(usize),
    MarkCorrect,
    MarkIncorrect,
    ToggleMode,
    Reset,
    Quit,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => Command::Continue,
            "y" | "yes" => Command::MarkCorrect,
            "n" | "no" => Command::MarkIncorrect,
            "m" | "mode" => Command::ToggleMode,
            "r" | "reset" => Command::Reset,
            "q" | "quit" | "exit" => Command::Quit,
            other => match other.parse::<usize>() {
                Ok(number) if number > 0 => Command::Answer(number),
                _ => Command::Unknown(trimmed.to_owned()),
            },
        }
    }
}

/// How the interactive loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Exited(NavigationIntent),
}

/// Drive `session` from line-based input until it finishes or the user quits.
///
/// End of input counts as quitting.
///
/// # Errors
///
/// Returns any I/O error from reading input or writing output.
pub fn run<R: BufRead, W: Write>(
    session: &mut DrillSession,
    mut input: R,
    mut output: W,
) -> Result<Outcome> {
    let mut line = String::new();
    loop {
        if session.state().is_finished() {
            return Ok(Outcome::Finished);
        }
        render(session, &mut output)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(Outcome::Exited(session.exit()));
        }

        match Command::parse(&line) {
            Command::Continue => match session.state().mode() {
                QuizMode::Reveal => session.handle_reveal_mode_tap(),
                QuizMode::Choice if session.state().selected_choice().is_some() => {
                    session.next_question();
                }
                QuizMode::Choice => writeln!(output, "Pick a number first.")?,
            },
            Command::Answer(number) => {
                let picked = session.state().choices().get(number - 1).cloned();
                match picked {
                    Some(choice) if session.state().mode() == QuizMode::Choice => {
                        session.submit_choice(&choice);
                    }
                    _ => writeln!(output, "No choice {number} here.")?,
                }
            }
            Command::MarkCorrect => session.mark_correct(),
            Command::MarkIncorrect => session.mark_incorrect(),
            Command::ToggleMode => {
                let next = session.state().mode().toggled();
                session.set_mode(next);
            }
            Command::Reset => session.reset(),
            Command::Quit => return Ok(Outcome::Exited(session.exit())),
            Command::Unknown(raw) => writeln!(output, "Unknown command: {raw}")?,
        }
    }
}

fn render<W: Write>(session: &DrillSession, output: &mut W) -> Result<()> {
    let state = session.state();
    let Some(question) = state.current_question() else {
        writeln!(output, "No questions loaded.")?;
        return Ok(());
    };

    writeln!(output)?;
    writeln!(
        output,
        "[{}/{} | {:.0}% | {}] {}",
        state.current_index() + 1,
        state.question_count(),
        state.progress_percent(),
        state.mode(),
        question.prompt()
    )?;

    match state.mode() {
        QuizMode::Reveal if state.is_revealed() => {
            writeln!(output, "  = {}", question.answer())?;
            if let Some(note) = question.annotation() {
                writeln!(output, "  ({note})")?;
            }
            writeln!(output, "y/n to grade yourself, enter for next")?;
        }
        QuizMode::Reveal => writeln!(output, "enter to reveal")?,
        QuizMode::Choice => {
            for (i, choice) in state.choices().iter().enumerate() {
                writeln!(output, "  {}) {choice}", i + 1)?;
            }
            match state.is_answer_correct() {
                Some(true) => writeln!(output, "Correct! enter for next")?,
                Some(false) => writeln!(
                    output,
                    "Wrong, the answer is {}. enter for next",
                    question.answer()
                )?,
                None => {}
            }
        }
    }
    Ok(())
}

/// Print a human-readable summary.
///
/// # Errors
///
/// Returns any I/O error from writing output.
pub fn print_results<W: Write>(results: &SessionResults, mut output: W) -> Result<()> {
    writeln!(output)?;
    writeln!(
        output,
        "{} questions, {} correct, {} incorrect",
        results.total, results.correct, results.incorrect
    )?;
    if let Some(accuracy) = results.accuracy() {
        writeln!(output, "accuracy: {:.0}%", accuracy * 100.0)?;
    }
    if let Some(duration) = results.duration() {
        writeln!(output, "time: {}s", duration.num_seconds())?;
    }
    if !results.missed.is_empty() {
        writeln!(output, "to review:")?;
        for question in &results.missed {
            writeln!(output, "  {} -> {}", question.prompt(), question.answer())?;
        }
    }
    Ok(())
}
