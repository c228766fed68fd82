//! Answer outcome value object

use serde::{Deserialize, Serialize};

/// How a single question resolved.
///
/// Exactly one of `Correct`, `Incorrect` or `TimedOut` is produced per
/// question. `AlreadyResolved` is handed to any response arriving after
/// that and never affects score or session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    TimedOut,
    AlreadyResolved,
}

impl AnswerOutcome {
    /// Outcome of a first submission of `chosen` against `correct_index`.
    pub fn judge(chosen: usize, correct_index: usize) -> Self {
        if chosen == correct_index {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Whether this outcome is the resolution of a question (as opposed to
    /// a late duplicate).
    pub fn is_resolution(self) -> bool {
        !matches!(self, AnswerOutcome::AlreadyResolved)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerOutcome::Correct => "correct",
            AnswerOutcome::Incorrect => "incorrect",
            AnswerOutcome::TimedOut => "timed_out",
            AnswerOutcome::AlreadyResolved => "already_resolved",
        }
    }
}

impl std::fmt::Display for AnswerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
