/// Errors surfaced by the terminal viewer
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("cannot open log file {}: {source}", path.display())]
    LogFile { path: PathBuf, source: io::Error },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Piece(#[from] polyblock_core::Error),
}
