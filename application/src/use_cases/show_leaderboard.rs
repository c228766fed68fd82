//! Show Leaderboard use case.

use crate::use_cases::score_ledger::{LedgerError, ScoreLedger};
use std::sync::Arc;
use tracing::info;
use trivia_domain::ScoreEntry;

/// Number of rows shown when the command does not ask for a size.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Use case for reading the top of the leaderboard.
pub struct ShowLeaderboardUseCase {
    ledger: Arc<ScoreLedger>,
}

impl ShowLeaderboardUseCase {
    pub fn new(ledger: Arc<ScoreLedger>) -> Self {
        Self { ledger }
    }

    /// The `size` best players (at least one row is requested).
    pub async fn execute(&self, size: usize) -> Result<Vec<ScoreEntry>, LedgerError> {
        let size = size.max(1);
        let rows = self.ledger.top_n(size).await?;
        info!("Leaderboard: {} of {} requested rows", rows.len(), size);
        Ok(rows)
    }
}
