//! Application layer for trivia-bot
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::QuizParams;
pub use ports::{
    event_logger::{NoQuizEventLogger, QuizEvent, QuizEventLogger},
    presenter::{PlayerResponse, PresentError, QuestionSlot, QuizPresenter, ResponseStream},
    question_generator::{GenerationError, GenerationRequest, QuestionGenerator},
    score_store::{ScoreStore, StoreError},
};
pub use use_cases::answer_collector::{AnswerCollector, AnswerHandle};
pub use use_cases::run_quiz::{QuizRun, RunQuizError, RunQuizInput, RunQuizUseCase};
pub use use_cases::score_ledger::{LedgerError, ScoreLedger};
pub use use_cases::show_leaderboard::{ShowLeaderboardUseCase, DEFAULT_LEADERBOARD_SIZE};
