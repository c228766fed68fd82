//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid difficulty: {0} (expected easy, medium or hard)")]
    InvalidDifficulty(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid question count: {count} (expected 1..={max})")]
    InvalidQuestionCount { count: usize, max: usize },

    #[error("Invalid player id: {0}")]
    InvalidPlayer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_count_display() {
        let error = DomainError::InvalidQuestionCount { count: 0, max: 20 };
        assert_eq!(
            error.to_string(),
            "Invalid question count: 0 (expected 1..=20)"
        );
    }

    #[test]
    fn test_difficulty_display() {
        let error = DomainError::InvalidDifficulty("impossible".to_string());
        assert!(error.to_string().contains("easy, medium or hard"));
    }
}
