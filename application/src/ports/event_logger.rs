//! Port for structured quiz event logging.
//!
//! Defines the [`QuizEventLogger`] trait for recording session events
//! (question presented, answer resolved, points awarded, final report) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable session transcript (JSONL).

use serde_json::Value;

/// A structured session event.
pub struct QuizEvent {
    /// Event type identifier (e.g., "question_presented", "answer_resolved").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl QuizEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging session events.
///
/// `log` is synchronous and non-fallible; logging failures never disturb
/// a running session.
pub trait QuizEventLogger: Send + Sync {
    fn log(&self, event: QuizEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoQuizEventLogger;

impl QuizEventLogger for NoQuizEventLogger {
    fn log(&self, _event: QuizEvent) {}
}
