//! Infrastructure layer for trivia-bot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generator;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileGeneratorConfig, FileLoggingConfig, FileOpenAiConfig,
    FileOutputConfig, FileQuizConfig, FileStoreConfig, GeneratorProvider,
};
pub use generator::{FileQuestionGenerator, OpenAiQuestionGenerator};
pub use logging::JsonlQuizEventLogger;
pub use store::JsonFileScoreStore;
