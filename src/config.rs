/// Runtime configuration loaded from `void_raiders.toml`.
///
/// Every key is optional; anything missing falls back to the compiled
/// default.  A missing file is not an error.  A malformed one is handed
/// back next to the defaults so the caller can log it once logging is up.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use crate::constants::TARGET_FPS;
use crate::error::{GameError, GameResult};

pub const CONFIG_FILE: &str = "void_raiders.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding `sprites/` and the sound files.
    pub assets_dir: PathBuf,
    pub high_score_path: PathBuf,
    pub log_path: PathBuf,
    pub fps: u32,
    /// Logical units covered by one character of sprite art.
    pub cell_width: u32,
    pub cell_height: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            high_score_path: PathBuf::from("high_scores.json"),
            log_path: PathBuf::from("void_raiders.log"),
            fps: TARGET_FPS,
            cell_width: 10,
            cell_height: 20,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(path: &Path, contents: &str) -> GameResult<Self> {
        let mut config: GameConfig = toml::from_str(contents).map_err(|e| GameError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if config.fps == 0 {
            config.fps = TARGET_FPS;
        }
        config.cell_width = config.cell_width.max(1);
        config.cell_height = config.cell_height.max(1);
        Ok(config)
    }

    /// Load `path` if present, otherwise return the defaults.  A file that
    /// fails to parse also yields the defaults, along with the parse error.
    pub fn load_or_default(path: &Path) -> (Self, Option<GameError>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(path, &contents) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
            Err(_) => (Self::default(), None),
        }
    }

    pub fn sprites_dir(&self) -> PathBuf {
        self.assets_dir.join("sprites")
    }
}
