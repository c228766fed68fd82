//! Question bank stored as a local JSON file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use trivia_application::{GenerationError, GenerationRequest, QuestionGenerator};
use trivia_domain::{RawQuestion, parse_question_batch};

/// Serves questions from a JSON file.
///
/// The file holds an array of question records (or `{"questions": [...]}`).
/// Records that name a category are only served for that category, matched
/// case-insensitively; records without one match every category. The file
/// is re-read on each request so edits apply to the next session.
pub struct FileQuestionGenerator {
    path: PathBuf,
}

impl FileQuestionGenerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionGenerator for FileQuestionGenerator {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<Vec<RawQuestion>, GenerationError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            GenerationError::Configuration(format!(
                "cannot read question bank {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let records = parse_question_batch(&content)
            .map_err(|e| GenerationError::Unparsable(format!("{}: {}", self.path.display(), e)))?;
        let available = records.len();

        let selected: Vec<RawQuestion> = records
            .into_iter()
            .filter(|record| {
                record
                    .category
                    .as_deref()
                    .is_none_or(|c| c.trim().eq_ignore_ascii_case(request.category.trim()))
            })
            .take(request.count)
            .collect();

        debug!(
            "Selected {} of {} banked questions for {}",
            selected.len(),
            available,
            request.category
        );
        Ok(selected)
    }
}
