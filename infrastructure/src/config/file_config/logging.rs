//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Optional log sinks in addition to stderr.
///
/// # Example
///
/// ```toml
/// [logging]
/// dir = "~/.local/state/trivia-bot/logs"
/// events_file = "quiz-events.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily rolling log files
    pub dir: Option<String>,
    /// JSONL file receiving one record per quiz event
    pub events_file: Option<String>,
}
