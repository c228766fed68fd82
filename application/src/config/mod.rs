//! Application-level configuration.
//!
//! [`QuizParams`] holds the per-session knobs that control the
//! [`RunQuizUseCase`](crate::use_cases::run_quiz::RunQuizUseCase) loop.

mod quiz_params;

pub use quiz_params::QuizParams;
