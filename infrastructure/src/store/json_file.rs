//! Score table persisted as a JSON object of `player id → score`.
//!
//! ```json
//! {
//!   "player-1": 35,
//!   "player-2": 10
//! }
//! ```
//!
//! Saves go to a sibling temp file that is synced and then renamed over the
//! target, so a crash leaves either the old or the new table on disk.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use trivia_application::{ScoreStore, StoreError};
use trivia_domain::{PlayerId, ScoreTable};

pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "scores.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn parse_table(content: &str) -> Result<ScoreTable, StoreError> {
    if content.trim().is_empty() {
        return Ok(ScoreTable::new());
    }

    let map: Map<String, Value> =
        serde_json::from_str(content).map_err(|e| StoreError::Corrupt(e.to_string()))?;

    map.into_iter()
        .map(|(id, score)| {
            let player = id
                .parse::<PlayerId>()
                .map_err(|e| StoreError::Corrupt(e.to_string()))?;
            let score = score.as_u64().ok_or_else(|| {
                StoreError::Corrupt(format!("score of '{}' is not a whole number: {}", id, score))
            })?;
            Ok((player, score))
        })
        .collect()
}

fn render_table(table: &ScoreTable) -> Result<String, StoreError> {
    let map: Map<String, Value> = table
        .entries()
        .iter()
        .map(|entry| (entry.player.to_string(), Value::from(entry.score)))
        .collect();
    serde_json::to_string_pretty(&map).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl ScoreStore for JsonFileScoreStore {
    async fn load(&self) -> Result<ScoreTable, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No score file at {}, starting empty", self.path.display());
                return Ok(ScoreTable::new());
            }
            Err(e) => {
                return Err(StoreError::Io(format!("{}: {}", self.path.display(), e)));
            }
        };
        parse_table(&content)
    }

    async fn save(&self, table: &ScoreTable) -> Result<(), StoreError> {
        let json = render_table(table)?;
        let io_err = |e: std::io::Error| StoreError::Io(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let temp = self.temp_path();
        let mut file = tokio::fs::File::create(&temp).await.map_err(io_err)?;
        file.write_all(json.as_bytes()).await.map_err(io_err)?;
        file.write_all(b"\n").await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        drop(file);

        tokio::fs::rename(&temp, &self.path).await.map_err(io_err)?;
        debug!("Saved {} scores to {}", table.len(), self.path.display());
        Ok(())
    }
}
