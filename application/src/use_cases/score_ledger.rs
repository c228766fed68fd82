//! Score ledger: atomic read-modify-write over the score store.
//!
//! The ledger is the only shared mutable resource between sessions. Every
//! increment runs load → add → save under one async lock, so concurrent
//! sessions crediting the same player never lose an update. The lock is
//! per process; two processes sharing one store file are not coordinated.

use crate::ports::score_store::{ScoreStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use trivia_domain::{PlayerId, ScoreEntry, ScoreTable};

/// Errors surfaced by the ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to load scores")]
    Load(#[source] StoreError),

    #[error("Failed to persist scores")]
    Write(#[source] StoreError),
}

impl LedgerError {
    /// The store failure underneath, for one-line log messages.
    pub fn store_error(&self) -> &StoreError {
        match self {
            LedgerError::Load(e) | LedgerError::Write(e) => e,
        }
    }
}

/// Player → cumulative score, built on a [`ScoreStore`].
pub struct ScoreLedger {
    store: Arc<dyn ScoreStore>,
    lock: Mutex<()>,
}

impl ScoreLedger {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Current score of `player`; 0 when the player has no entry.
    ///
    /// Never fails: a store that cannot be read is logged and reads as 0.
    pub async fn get(&self, player: &PlayerId) -> u64 {
        let _guard = self.lock.lock().await;
        match self.store.load().await {
            Ok(table) => table.get(player),
            Err(e) => {
                warn!("Could not read score for {}: {}", player, e);
                0
            }
        }
    }

    /// Add `delta` to `player`'s score and return the new total.
    ///
    /// Returns only after the store has durably saved the new table.
    pub async fn increment(&self, player: &PlayerId, delta: u64) -> Result<u64, LedgerError> {
        let _guard = self.lock.lock().await;

        let mut table = self.store.load().await.map_err(LedgerError::Load)?;
        let total = table.add(player, delta);
        self.store.save(&table).await.map_err(LedgerError::Write)?;

        debug!("Credited {} with {} points (total {})", player, delta, total);
        Ok(total)
    }

    /// The `n` best players, score descending, ties in first-scored order.
    pub async fn top_n(&self, n: usize) -> Result<Vec<ScoreEntry>, LedgerError> {
        Ok(self.all().await?.top_n(n))
    }

    /// The whole table.
    pub async fn all(&self) -> Result<ScoreTable, LedgerError> {
        let _guard = self.lock.lock().await;
        self.store.load().await.map_err(LedgerError::Load)
    }
}
