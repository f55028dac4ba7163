//! Error types

use std::path::PathBuf;

use crate::theme::Theme;

/// Fatal errors that end the game loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal or audio device I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme assets could not be loaded.
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration rejected.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Theme loading errors.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt theme manifest {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("theme {theme} is unusable: {reason}")]
    Invalid { theme: Theme, reason: String },
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Invalid(String),
}
