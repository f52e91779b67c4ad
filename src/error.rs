use std::path::PathBuf;

use crate::game::{MoveError, Player};

/// Errors raised by the AI engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    #[error("cannot choose a move: the position is already decided")]
    TerminalPosition,
}

/// Errors that can occur while driving a game session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),

    #[error("the game is already over")]
    GameOver,

    #[error("it is the {expected:?}'s turn")]
    NotYourTurn { expected: Player },

    #[error("difficulty cannot be changed while a game is in progress")]
    DifficultyLocked,

    #[error("the session has ended; restart to play again")]
    SessionEnded,

    #[error("AI error: {0}")]
    Ai(#[from] AiError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
