//! Quiz session parameters for loop and deadline control.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use trivia_domain::DomainError;

/// Session parameters, fixed for the lifetime of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizParams {
    /// How long the player has to answer each question.
    pub deadline: Duration,
    /// Questions requested from the generator when the command gives none.
    pub question_count: usize,
    /// Upper bound accepted for a requested question count.
    pub max_question_count: usize,
}

impl Default for QuizParams {
    fn default() -> Self {
        Self {
            deadline: Duration::from_secs(20),
            question_count: 5,
            max_question_count: 20,
        }
    }
}

impl QuizParams {
    // ==================== Builder Methods ====================

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_max_question_count(mut self, max: usize) -> Self {
        self.max_question_count = max;
        self
    }

    /// Resolve the count for one session: the requested count, or the
    /// default, checked against `1..=max_question_count`.
    pub fn resolve_count(&self, requested: Option<usize>) -> Result<usize, DomainError> {
        let count = requested.unwrap_or(self.question_count);
        if count == 0 || count > self.max_question_count {
            return Err(DomainError::InvalidQuestionCount {
                count,
                max: self.max_question_count,
            });
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = QuizParams::default();
        assert_eq!(params.deadline, Duration::from_secs(20));
        assert_eq!(params.question_count, 5);
    }

    #[test]
    fn test_resolve_count() {
        let params = QuizParams::default().with_max_question_count(10);
        assert_eq!(params.resolve_count(None).unwrap(), 5);
        assert_eq!(params.resolve_count(Some(10)).unwrap(), 10);
        assert!(params.resolve_count(Some(0)).is_err());
        assert!(params.resolve_count(Some(11)).is_err());
    }
}
