/// Error types for the game.
///
/// Only failures the session cannot substitute a default for travel through
/// [`GameError`].  Missing sound files and unreadable high-score files are
/// recovered where they happen and merely logged.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum GameError {
    /// A required asset (sprite art) is not on disk.
    MissingAsset {
        path: PathBuf,
    },

    /// An asset exists but cannot be used, e.g. sprite art with no opaque cell.
    InvalidAsset {
        path: PathBuf,
        reason: String,
    },

    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configuration file exists but could not be parsed.
    Config {
        path: PathBuf,
        reason: String,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::MissingAsset { path } => {
                write!(f, "required asset '{}' not found", path.display())
            }
            GameError::InvalidAsset { path, reason } => {
                write!(f, "asset '{}' is unusable: {}", path.display(), reason)
            }
            GameError::Io { path, source } => {
                write!(f, "i/o error on '{}': {}", path.display(), source)
            }
            GameError::Config { path, reason } => {
                write!(f, "invalid config '{}': {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;
