//! Prompt templates for the question generation service

mod template;

pub use template::QuizPromptTemplate;
