//! Prompt templates for question generation

use crate::quiz::difficulty::Difficulty;

/// Templates for asking a language model for a question batch
pub struct QuizPromptTemplate;

impl QuizPromptTemplate {
    /// System prompt pinning the reply format
    pub fn system() -> &'static str {
        r#"You are a trivia question writer for a chat quiz game.
You reply with JSON only: no commentary, no markdown outside a single ```json block.
Every question has exactly one correct choice and plausible wrong choices.
Keep questions short enough to read in a few seconds."#
    }

    /// User prompt requesting `count` questions
    pub fn generate(category: &str, difficulty: Difficulty, count: usize) -> String {
        format!(
            r#"Write {count} short multiple-choice questions about "{category}" at {difficulty} difficulty.
Each question must have 4 choices. "correct_index" is the zero-based index of the correct choice.

Reply with a JSON array in exactly this shape:
[
  {{"text": "...", "choices": ["...", "...", "...", "..."], "correct_index": 0, "difficulty": "{difficulty}"}}
]"#
        )
    }
}
