//! Question batch entity

use crate::core::question::{MalformedQuestion, Question, RawQuestion};
use crate::quiz::difficulty::Difficulty;
use std::collections::VecDeque;

/// A generator record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedQuestion {
    /// Zero-based position in the generator's output.
    pub position: usize,
    pub reason: MalformedQuestion,
}

/// Ordered, immutable sequence of validated questions for one session.
///
/// Built once from the generator's records and consumed front-to-back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBatch {
    questions: Vec<Question>,
}

impl QuestionBatch {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Validate generator records, keeping the valid ones in order.
    ///
    /// Returns the batch plus every rejected record with its reason.
    pub fn from_raw(
        records: Vec<RawQuestion>,
        fallback: Difficulty,
    ) -> (Self, Vec<RejectedQuestion>) {
        let mut questions = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (position, record) in records.into_iter().enumerate() {
            match record.validate(fallback) {
                Ok(q) => questions.push(q),
                Err(reason) => rejected.push(RejectedQuestion { position, reason }),
            }
        }

        (Self { questions }, rejected)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub(crate) fn into_queue(self) -> VecDeque<Question> {
        self.questions.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, correct_index: i64, difficulty: Option<&str>) -> RawQuestion {
        RawQuestion {
            text: text.to_string(),
            choices: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_index: Some(correct_index),
            difficulty: difficulty.map(str::to_string),
            category: None,
        }
    }

    #[test]
    fn test_from_raw_keeps_order_and_drops_invalid() {
        let (batch, rejected) = QuestionBatch::from_raw(
            vec![
                record("first", 0, Some("easy")),
                record("broken", 7, None),
                record("third", 2, Some("hard")),
            ],
            Difficulty::Medium,
        );

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.questions()[0].text(), "first");
        assert_eq!(batch.questions()[1].text(), "third");
        assert_eq!(batch.questions()[0].points(), 5);
        assert_eq!(batch.questions()[1].points(), 15);

        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].position, 1);
        assert!(matches!(
            rejected[0].reason,
            MalformedQuestion::CorrectIndexOutOfRange { index: 7, len: 3 }
        ));
    }

    #[test]
    fn test_all_invalid_yields_empty_batch() {
        let (batch, rejected) =
            QuestionBatch::from_raw(vec![record("", 0, None)], Difficulty::Easy);
        assert!(batch.is_empty());
        assert_eq!(rejected.len(), 1);
    }
}
