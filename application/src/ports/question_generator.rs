//! Question generator port
//!
//! Defines the interface for the external question-generation service.

use async_trait::async_trait;
use thiserror::Error;
use trivia_domain::{Difficulty, RawQuestion};

/// Errors that can occur while producing a question batch
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Unparsable response: {0}")]
    Unparsable(String),

    #[error("No usable questions in the generated batch")]
    EmptyBatch,

    #[error("Timeout")]
    Timeout,

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// One batch request: `count` questions about `category` at `difficulty`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub category: String,
    pub difficulty: Difficulty,
    pub count: usize,
}

impl GenerationRequest {
    pub fn new(category: impl Into<String>, difficulty: Difficulty, count: usize) -> Self {
        Self {
            category: category.into(),
            difficulty,
            count,
        }
    }
}

/// Source of question batches
///
/// Implementations return question-shaped records without validating them;
/// the session controller checks every record before use.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<RawQuestion>, GenerationError>;
}
