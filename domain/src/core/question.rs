//! Question value objects
//!
//! A generator hands back [`RawQuestion`] records. Each one is validated into
//! a [`Question`] before a session may present or score it; records that break
//! the structural invariants are rejected with a [`MalformedQuestion`].

use crate::quiz::difficulty::Difficulty;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of choices a question must offer.
pub const MIN_CHOICES: usize = 2;

/// Structural invariant violations found while ingesting a question record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedQuestion {
    #[error("question text is empty")]
    EmptyText,

    #[error("expected at least {min} choices, got {count}", min = MIN_CHOICES)]
    TooFewChoices { count: usize },

    #[error("choice {index} is blank")]
    BlankChoice { index: usize },

    #[error("correct index is missing")]
    MissingCorrectIndex,

    #[error("correct index {index} is outside 0..{len}")]
    CorrectIndexOutOfRange { index: i64, len: usize },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

/// An unvalidated, question-shaped record as returned by a generator.
///
/// Field aliases cover the spellings generators commonly drift to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawQuestion {
    #[serde(alias = "question", default)]
    pub text: String,
    #[serde(alias = "options", alias = "answers", default)]
    pub choices: Vec<String>,
    #[serde(alias = "answer", alias = "correct", alias = "correctIndex", default)]
    pub correct_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl RawQuestion {
    /// Validate the record into a [`Question`].
    ///
    /// `fallback` is the session difficulty, used when the record does not
    /// carry its own.
    pub fn validate(self, fallback: Difficulty) -> Result<Question, MalformedQuestion> {
        let difficulty = match self.difficulty.as_deref().map(str::trim) {
            None | Some("") => fallback,
            Some(s) => s
                .parse()
                .map_err(|_| MalformedQuestion::UnknownDifficulty(s.to_string()))?,
        };

        let index = self
            .correct_index
            .ok_or(MalformedQuestion::MissingCorrectIndex)?;
        let len = self.choices.len();
        let correct_index = usize::try_from(index)
            .ok()
            .filter(|i| *i < len)
            .ok_or(MalformedQuestion::CorrectIndexOutOfRange { index, len })?;

        Question::new(self.text, self.choices, correct_index, difficulty)
    }
}

/// A validated multiple-choice question (Value Object).
///
/// Invariants: non-empty text, at least two non-blank choices, and
/// `correct_index` indexes into `choices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    choices: Vec<String>,
    correct_index: usize,
    difficulty: Difficulty,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
        difficulty: Difficulty,
    ) -> Result<Self, MalformedQuestion> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(MalformedQuestion::EmptyText);
        }
        if choices.len() < MIN_CHOICES {
            return Err(MalformedQuestion::TooFewChoices {
                count: choices.len(),
            });
        }
        if let Some(index) = choices.iter().position(|c| c.trim().is_empty()) {
            return Err(MalformedQuestion::BlankChoice { index });
        }
        if correct_index >= choices.len() {
            return Err(MalformedQuestion::CorrectIndexOutOfRange {
                index: correct_index as i64,
                len: choices.len(),
            });
        }

        Ok(Self {
            text,
            choices,
            correct_index,
            difficulty,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Points awarded for answering this question correctly.
    pub fn points(&self) -> u64 {
        self.difficulty.points()
    }

    /// Button-style labels for the choices: `A) Paris`, `B) Rome`, ...
    ///
    /// Choices past `Z` fall back to numbering.
    pub fn choice_labels(&self) -> Vec<String> {
        self.choices
            .iter()
            .enumerate()
            .map(|(i, choice)| match u8::try_from(i) {
                Ok(n) if n < 26 => format!("{}) {}", (b'A' + n) as char, choice),
                _ => format!("{}) {}", i + 1, choice),
            })
            .collect()
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
