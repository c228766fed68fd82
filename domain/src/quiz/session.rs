//! Quiz session state machine
//!
//! ```text
//! InProgress ──Correct──> InProgress (next question)
//!     │
//!     ├── Incorrect ───────> TerminatedOnWrongAnswer
//!     ├── TimedOut ────────> TerminatedOnTimeout
//!     ├── batch exhausted ─> CompletedAllQuestions
//!     └── no usable batch ─> AbortedOnGenerationFailure
//! ```
//!
//! Terminal states have no outgoing transition.

use crate::core::player::PlayerId;
use crate::core::question::Question;
use crate::quiz::batch::QuestionBatch;
use crate::quiz::difficulty::Difficulty;
use crate::quiz::outcome::AnswerOutcome;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    CompletedAllQuestions,
    TerminatedOnWrongAnswer,
    TerminatedOnTimeout,
    AbortedOnGenerationFailure,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionStatus::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::CompletedAllQuestions => "completed_all_questions",
            SessionStatus::TerminatedOnWrongAnswer => "terminated_on_wrong_answer",
            SessionStatus::TerminatedOnTimeout => "terminated_on_timeout",
            SessionStatus::AbortedOnGenerationFailure => "aborted_on_generation_failure",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final report emitted once a session reaches a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub player: PlayerId,
    pub category: String,
    pub difficulty: Difficulty,
    pub running_score: u64,
    pub status: SessionStatus,
    /// Questions that were presented and resolved.
    pub answered: usize,
    /// Generator records dropped for breaking question invariants.
    pub skipped_malformed: usize,
}

/// Mutable state of one session, owned by its controller.
#[derive(Debug, Clone)]
pub struct SessionState {
    player: PlayerId,
    category: String,
    difficulty: Difficulty,
    remaining: VecDeque<Question>,
    running_score: u64,
    answered: usize,
    skipped_malformed: usize,
    status: SessionStatus,
}

impl SessionState {
    pub fn new(player: PlayerId, category: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            player,
            category: category.into(),
            difficulty,
            remaining: VecDeque::new(),
            running_score: 0,
            answered: 0,
            skipped_malformed: 0,
            status: SessionStatus::InProgress,
        }
    }

    /// Install the session's questions. `skipped` counts records that were
    /// rejected during validation.
    pub fn load_batch(&mut self, batch: QuestionBatch, skipped: usize) {
        self.remaining = batch.into_queue();
        self.skipped_malformed = skipped;
    }

    /// Terminate before any question was asked because no usable batch
    /// could be produced.
    pub fn abort_on_generation_failure(&mut self) {
        if !self.status.is_terminal() {
            self.remaining.clear();
            self.status = SessionStatus::AbortedOnGenerationFailure;
        }
    }

    /// Take the next question to present.
    ///
    /// Returns `None` once the session is terminal. Running out of questions
    /// while still in progress completes the session.
    pub fn next_question(&mut self) -> Option<Question> {
        if self.status.is_terminal() {
            return None;
        }
        let next = self.remaining.pop_front();
        if next.is_none() {
            self.status = SessionStatus::CompletedAllQuestions;
        }
        next
    }

    /// Apply the resolution of `question` and return the points it earned.
    ///
    /// `AlreadyResolved` and anything applied after a terminal status are
    /// ignored.
    pub fn apply(&mut self, question: &Question, outcome: AnswerOutcome) -> u64 {
        if self.status.is_terminal() {
            return 0;
        }
        match outcome {
            AnswerOutcome::Correct => {
                let points = question.points();
                self.running_score += points;
                self.answered += 1;
                points
            }
            AnswerOutcome::Incorrect => {
                self.answered += 1;
                self.status = SessionStatus::TerminatedOnWrongAnswer;
                0
            }
            AnswerOutcome::TimedOut => {
                self.answered += 1;
                self.status = SessionStatus::TerminatedOnTimeout;
                0
            }
            AnswerOutcome::AlreadyResolved => 0,
        }
    }

    pub fn player(&self) -> &PlayerId {
        &self.player
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn running_score(&self) -> u64 {
        self.running_score
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            player: self.player.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
            running_score: self.running_score,
            status: self.status,
            answered: self.answered,
            skipped_malformed: self.skipped_malformed,
        }
    }
}
