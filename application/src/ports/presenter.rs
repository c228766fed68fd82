//! Presentation port
//!
//! The chat platform (or any other front end) renders questions and feeds
//! player choices back as a [`ResponseStream`]. The session controller treats
//! the stream purely as an event source for the answer collector.
//!
//! # Flow
//!
//! ```text
//! RunQuizUseCase ──present()──> QuizPresenter ──renders──> player
//!       ▲                                                    │
//!       └──────────── ResponseStream (chosen index) <────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use trivia_domain::{AnswerOutcome, Difficulty, PlayerId, Question, SessionReport};

/// Errors raised by a presenter
#[derive(Error, Debug)]
pub enum PresentError {
    #[error("Presentation channel closed")]
    ChannelClosed,

    #[error("I/O error: {0}")]
    Io(String),
}

/// A player's choice, stamped with the time the front end received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResponse {
    pub chosen_index: usize,
    pub at: DateTime<Utc>,
}

impl PlayerResponse {
    pub fn now(chosen_index: usize) -> Self {
        Self {
            chosen_index,
            at: Utc::now(),
        }
    }
}

/// Handle for receiving player responses to one presented question.
///
/// Wraps an `mpsc::Receiver<PlayerResponse>`. Dropping the stream closes the
/// channel, which tells the presenter to stop collecting input.
pub struct ResponseStream {
    receiver: mpsc::Receiver<PlayerResponse>,
}

impl ResponseStream {
    pub fn new(receiver: mpsc::Receiver<PlayerResponse>) -> Self {
        Self { receiver }
    }

    /// Create a connected sender / stream pair.
    pub fn channel(capacity: usize) -> (mpsc::Sender<PlayerResponse>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::new(rx))
    }

    /// Next response, or `None` once the presenter side is gone.
    pub async fn recv(&mut self) -> Option<PlayerResponse> {
        self.receiver.recv().await
    }
}

/// Where a question sits in its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSlot {
    pub player: PlayerId,
    /// 1-based position in the batch.
    pub number: usize,
    pub total: usize,
    pub deadline: Duration,
}

/// Port for rendering a session to its player.
///
/// Only [`present`](Self::present) is required; the notification hooks
/// default to no-ops.
#[async_trait]
pub trait QuizPresenter: Send + Sync {
    /// Called once the session starts fetching its batch.
    async fn on_session_start(
        &self,
        _player: &PlayerId,
        _category: &str,
        _difficulty: Difficulty,
    ) {
    }

    /// Show `question` with `choice_labels` and return the stream its
    /// answers arrive on.
    async fn present(
        &self,
        slot: &QuestionSlot,
        question: &Question,
        choice_labels: &[String],
    ) -> Result<ResponseStream, PresentError>;

    /// Called when a question resolves, with the points it earned.
    async fn on_resolved(
        &self,
        _slot: &QuestionSlot,
        _question: &Question,
        _outcome: AnswerOutcome,
        _awarded: u64,
    ) {
    }

    /// Called for a response that arrived after the question resolved.
    async fn on_duplicate_response(&self, _slot: &QuestionSlot) {}

    /// Called when the batch could not be produced.
    async fn on_generation_failure(&self, _player: &PlayerId, _reason: &str) {}

    /// Called with the final report of every session.
    async fn on_report(&self, _report: &SessionReport) {}
}
