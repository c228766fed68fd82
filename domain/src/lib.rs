//! Domain layer for trivia-bot
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! One complete run of a quiz command for one player, from batch fetch to
//! terminal report. [`SessionState`] is the state machine:
//!
//! ```text
//! InProgress ──┬─> CompletedAllQuestions
//!              ├─> TerminatedOnWrongAnswer
//!              ├─> TerminatedOnTimeout
//!              └─> AbortedOnGenerationFailure
//! ```
//!
//! ## Scoring
//!
//! Correct answers earn points by [`Difficulty`] tier (Easy 5, Medium 10,
//! Hard 15). Cumulative scores live in a [`ScoreTable`].

pub mod config;
pub mod core;
pub mod prompt;
pub mod quiz;
pub mod scoring;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    player::PlayerId,
    question::{MalformedQuestion, Question, RawQuestion},
};
pub use prompt::QuizPromptTemplate;
pub use quiz::{
    batch::{QuestionBatch, RejectedQuestion},
    difficulty::Difficulty,
    outcome::AnswerOutcome,
    parsing::{ParseBatchError, parse_question_batch},
    session::{SessionReport, SessionState, SessionStatus},
};
pub use scoring::{ScoreEntry, ScoreTable};
