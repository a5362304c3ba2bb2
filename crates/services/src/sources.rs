use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use drill_core::{EngineConfigDraft, Question};

use crate::error::SourceError;

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// A titled question list with optional engine settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub settings: EngineConfigDraft,
    pub questions: Vec<Question>,
}

impl Deck {
    #[must_use]
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    /// Parse a deck from JSON. Accepts either a deck object or a bare question array.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Parse` for malformed JSON and the `validate` errors otherwise.
    pub fn from_json(raw: &str) -> Result<Self, SourceError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bare(Vec<Question>),
            Full(Deck),
        }

        let deck = match serde_json::from_str::<Repr>(raw)? {
            Repr::Bare(questions) => Deck::from_questions(questions),
            Repr::Full(deck) => deck,
        };
        deck.validate()
    }

    /// Reject empty decks and questions whose prompt or answer is blank.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Empty` or `SourceError::BlankField`.
    pub fn validate(self) -> Result<Self, SourceError> {
        if self.questions.is_empty() {
            return Err(SourceError::Empty);
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.prompt().trim().is_empty() {
                return Err(SourceError::BlankField {
                    index,
                    field: "prompt",
                });
            }
            if question.answer().trim().is_empty() {
                return Err(SourceError::BlankField {
                    index,
                    field: "answer",
                });
            }
        }
        Ok(self)
    }
}

//
// ─── SOURCES ───────────────────────────────────────────────────────────────────
//

/// Supplies the questions a session drills.
pub trait QuestionSource {
    /// # Errors
    ///
    /// Returns `SourceError` when the deck cannot be produced.
    fn load_deck(&self) -> Result<Deck, SourceError>;

    /// # Errors
    ///
    /// Returns `SourceError` when the deck cannot be produced.
    fn load_questions(&self) -> Result<Vec<Question>, SourceError> {
        Ok(self.load_deck()?.questions)
    }
}

/// Reads a JSON deck file from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl QuestionSource for JsonFileSource {
    fn load_deck(&self) -> Result<Deck, SourceError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let deck = Deck::from_json(&raw)?;
        debug!(
            path = %self.path.display(),
            questions = deck.questions.len(),
            "deck loaded"
        );
        Ok(deck)
    }
}

/// Serves a deck held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    deck: Deck,
}

impl StaticSource {
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self { deck }
    }
}

impl QuestionSource for StaticSource {
    fn load_deck(&self) -> Result<Deck, SourceError> {
        self.deck.clone().validate()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
