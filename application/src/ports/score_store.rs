//! Score store port
//!
//! The persistent player → score mapping. The store only loads and saves
//! whole tables; read-modify-write serialization is the
//! [`ScoreLedger`](crate::use_cases::score_ledger::ScoreLedger)'s job.

use async_trait::async_trait;
use thiserror::Error;
use trivia_domain::ScoreTable;

/// Errors from the storage medium
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Corrupt score data: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Load the full table. A store that was never written loads empty.
    async fn load(&self) -> Result<ScoreTable, StoreError>;

    /// Durably replace the table. Must not return `Ok` before the data
    /// would survive a crash.
    async fn save(&self, table: &ScoreTable) -> Result<(), StoreError>;
}
