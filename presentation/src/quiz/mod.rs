//! Terminal front end for quiz sessions.

mod console_presenter;
mod input;

pub use console_presenter::ConsoleQuizPresenter;
pub use input::parse_choice;
