//! Score store adapters implementing the
//! [`ScoreStore`](trivia_application::ScoreStore) port.

mod json_file;

pub use json_file::JsonFileScoreStore;
