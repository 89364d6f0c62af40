/// Session score and the persisted top-five table.
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::constants::HIGH_SCORE_SLOTS;
use crate::error::{GameError, GameResult};

#[derive(Debug, Clone)]
pub struct ScoreManager {
    /// Current session score.  Penalties can push it below zero.
    pub score: i64,
    /// Best scores, highest first, at most `HIGH_SCORE_SLOTS` entries.
    pub high_scores: Vec<i64>,
    path: PathBuf,
}

impl ScoreManager {
    /// Start a manager backed by `path`, reading whatever table is there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let high_scores = load_high_scores(&path);
        Self {
            score: 0,
            high_scores,
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_score(&mut self, points: i64) {
        self.score += points;
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Insert the current score into the table and rewrite the file.
    /// The in-memory table is updated even if the write fails.
    pub fn save_high_score(&mut self) -> GameResult<()> {
        insert_high_score(&mut self.high_scores, self.score);

        let json = serde_json::to_string(&self.high_scores).map_err(|e| GameError::Io {
            path: self.path.clone(),
            source: e.into(),
        })?;
        std::fs::write(&self.path, json).map_err(|source| GameError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("saved score {} to {}", self.score, self.path.display());
        Ok(())
    }
}

/// Add `score`, keep the table sorted highest first and cut it to size.
pub fn insert_high_score(table: &mut Vec<i64>, score: i64) {
    table.push(score);
    table.sort_unstable_by(|a, b| b.cmp(a));
    table.truncate(HIGH_SCORE_SLOTS);
}

/// Read the table from disk.  A missing or unreadable file is an empty table.
pub fn load_high_scores(path: &Path) -> Vec<i64> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => {
            info!("no high score file at {}", path.display());
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<i64>>(&contents) {
        Ok(mut table) => {
            table.sort_unstable_by(|a, b| b.cmp(a));
            table.truncate(HIGH_SCORE_SLOTS);
            table
        }
        Err(e) => {
            warn!("ignoring corrupt high score file {}: {e}", path.display());
            Vec::new()
        }
    }
}
