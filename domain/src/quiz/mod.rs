//! Quiz session domain.
//!
//! - [`difficulty::Difficulty`]: tier that decides the points of a question
//! - [`batch::QuestionBatch`]: the validated questions of one session
//! - [`outcome::AnswerOutcome`]: how a single question resolved
//! - [`session::SessionState`]: the per-session state machine
//! - [`parsing`]: extracting question records from generator output

pub mod batch;
pub mod difficulty;
pub mod outcome;
pub mod parsing;
pub mod session;
