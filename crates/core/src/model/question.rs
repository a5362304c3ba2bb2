use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single prompt/answer pair presented to the user.
///
/// Only `prompt`, `answer` and `annotation` carry meaning for the engine.
/// Any other fields found in the source data are kept in `extra` so hosts can
/// round-trip them, but the engine never looks at them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotation: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
            annotation: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    /// Attach an opaque field that travels with the question.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn annotation(&self) -> Option<&str> {
        self.annotation.as_deref()
    }

    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Exact comparison against the stored answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.answer == choice
    }
}
