//! Configuration file loading for trivia-bot
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./trivia.toml` or `./.trivia.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/trivia-bot/config.toml`
//! 4. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileGeneratorConfig, FileLoggingConfig, FileOpenAiConfig, FileOutputConfig,
    FileQuizConfig, FileStoreConfig, GeneratorProvider,
};
pub use loader::ConfigLoader;
