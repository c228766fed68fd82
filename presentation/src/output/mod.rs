//! Output formatting for reports and leaderboards

pub mod console;
pub mod formatter;
