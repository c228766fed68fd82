//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod answer_collector;
pub mod run_quiz;
pub mod score_ledger;
pub mod show_leaderboard;
