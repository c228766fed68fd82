//! Presentation layer for trivia-bot
//!
//! This crate contains CLI definitions, output formatters and the
//! interactive terminal quiz presenter.

pub mod cli;
pub mod output;
pub mod quiz;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{JsonFormatter, OutputFormatter, formatter_for};
pub use quiz::{ConsoleQuizPresenter, parse_choice};
