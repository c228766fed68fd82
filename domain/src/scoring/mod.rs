//! Cumulative player scores.
//!
//! [`ScoreTable`] is the unit the score store loads and saves. Entries keep
//! the order in which players first scored, which is what breaks ties on the
//! leaderboard.

use crate::core::player::PlayerId;
use serde::{Deserialize, Serialize};

/// One player's cumulative score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: PlayerId,
    pub score: u64,
}

/// Insertion-ordered mapping from player to cumulative score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreTable {
    entries: Vec<ScoreEntry>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score of `player`, 0 when absent.
    pub fn get(&self, player: &PlayerId) -> u64 {
        self.entries
            .iter()
            .find(|e| &e.player == player)
            .map_or(0, |e| e.score)
    }

    /// Add `delta` to `player`'s score, creating the entry on first award,
    /// and return the new total.
    pub fn add(&mut self, player: &PlayerId, delta: u64) -> u64 {
        match self.entries.iter_mut().find(|e| &e.player == player) {
            Some(entry) => {
                entry.score = entry.score.saturating_add(delta);
                entry.score
            }
            None => {
                self.entries.push(ScoreEntry {
                    player: player.clone(),
                    score: delta,
                });
                delta
            }
        }
    }

    /// The `n` best entries, score descending; ties keep insertion order.
    pub fn top_n(&self, n: usize) -> Vec<ScoreEntry> {
        let mut sorted = self.entries.clone();
        // sort_by is stable
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(n);
        sorted
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PlayerId, u64)> for ScoreTable {
    /// Later duplicates of a player are merged into the first entry.
    fn from_iter<I: IntoIterator<Item = (PlayerId, u64)>>(iter: I) -> Self {
        let mut table = ScoreTable::new();
        for (player, score) in iter {
            table.add(&player, score);
        }
        table
    }
}
