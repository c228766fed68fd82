//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod generator;
mod logging;
mod output;
mod quiz;
mod store;

pub use generator::{FileGeneratorConfig, FileOpenAiConfig, GeneratorProvider};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use quiz::FileQuizConfig;
pub use store::FileStoreConfig;

use serde::{Deserialize, Serialize};
use trivia_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session settings
    pub quiz: FileQuizConfig,
    /// Question source
    pub generator: FileGeneratorConfig,
    /// Score persistence
    pub store: FileStoreConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Extra log sinks
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks quiz bounds, the generator provider and its required
    /// settings, and the store path.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.quiz.to_quiz_params().1);
        issues.extend(self.generator.validate());

        if self.store.path.trim().is_empty() {
            issues.push(ConfigIssue {
                severity: trivia_domain::Severity::Error,
                code: trivia_domain::ConfigIssueCode::MissingValue {
                    field: "store.path".to_string(),
                },
                message: "store.path cannot be empty".to_string(),
            });
        }

        issues
    }
}
