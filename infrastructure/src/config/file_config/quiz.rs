//! Quiz configuration from TOML (`[quiz]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use trivia_application::QuizParams;
use trivia_domain::{ConfigIssue, ConfigIssueCode, Severity};

/// Session settings.
///
/// # Example
///
/// ```toml
/// [quiz]
/// deadline_secs = 15
/// question_count = 5
/// max_question_count = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuizConfig {
    /// Seconds a player has to answer each question.
    pub deadline_secs: u64,
    /// Questions per session when the command gives no count.
    pub question_count: usize,
    /// Largest count a command may request.
    pub max_question_count: usize,
}

impl Default for FileQuizConfig {
    fn default() -> Self {
        let params = QuizParams::default();
        Self {
            deadline_secs: params.deadline.as_secs(),
            question_count: params.question_count,
            max_question_count: params.max_question_count,
        }
    }
}

impl FileQuizConfig {
    /// Convert to [`QuizParams`], returning validation issues.
    ///
    /// Each invalid value falls back to its default and yields a warning.
    pub fn to_quiz_params(&self) -> (QuizParams, Vec<ConfigIssue>) {
        let defaults = QuizParams::default();
        let mut params = defaults.clone();
        let mut issues = Vec::new();

        if self.deadline_secs == 0 {
            issues.push(out_of_range("quiz.deadline_secs", 0, "must be at least 1"));
        } else {
            params.deadline = Duration::from_secs(self.deadline_secs);
        }

        if self.max_question_count == 0 {
            issues.push(out_of_range(
                "quiz.max_question_count",
                0,
                "must be at least 1",
            ));
        } else {
            params.max_question_count = self.max_question_count;
        }

        if self.question_count == 0 || self.question_count > params.max_question_count {
            issues.push(out_of_range(
                "quiz.question_count",
                self.question_count as u64,
                &format!("must be between 1 and {}", params.max_question_count),
            ));
            params.question_count = defaults.question_count.min(params.max_question_count);
        } else {
            params.question_count = self.question_count;
        }

        (params, issues)
    }
}

fn out_of_range(field: &str, value: u64, constraint: &str) -> ConfigIssue {
    ConfigIssue {
        severity: Severity::Warning,
        code: ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value,
        },
        message: format!("{}: {} {}, using default", field, value, constraint),
    }
}
