//! Question generator adapters.
//!
//! - [`OpenAiQuestionGenerator`]: asks a chat completions API for a batch
//! - [`FileQuestionGenerator`]: serves questions from a local JSON bank

mod file;
mod openai;

pub use file::FileQuestionGenerator;
pub use openai::OpenAiQuestionGenerator;
