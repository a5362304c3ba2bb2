use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How the current question is presented.
///
/// - `Reveal`: the answer is hidden until the user asks for it
/// - `Choice`: the user picks among generated candidate answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    #[default]
    Reveal,
    Choice,
}

impl QuizMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::Reveal => "reveal",
            QuizMode::Choice => "choice",
        }
    }

    /// The other presentation mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            QuizMode::Reveal => QuizMode::Choice,
            QuizMode::Choice => QuizMode::Reveal,
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reveal" => Ok(QuizMode::Reveal),
            "choice" => Ok(QuizMode::Choice),
            _ => Err(ConfigError::UnknownMode(s.to_owned())),
        }
    }
}
