//! Output formatter trait

use crate::output::console::ConsoleFormatter;
use trivia_domain::{OutputFormat, ScoreEntry, SessionReport};

/// Renders session results for the chosen output format
pub trait OutputFormatter {
    /// Format the final report of a session
    fn format_report(&self, report: &SessionReport) -> String;

    /// Format the leaderboard, highest score first
    fn format_leaderboard(&self, entries: &[ScoreEntry]) -> String;
}

/// Machine-readable output via `serde_json`
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &SessionReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_leaderboard(&self, entries: &[ScoreEntry]) -> String {
        let ranked: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                serde_json::json!({
                    "rank": i + 1,
                    "player": entry.player,
                    "score": entry.score,
                })
            })
            .collect();
        serde_json::to_string_pretty(&ranked).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Pick the formatter for `format`.
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
