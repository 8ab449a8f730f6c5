// Error types for the bot
//
// Every failure here is fatal for the run: nothing in the bot retries. Ordinary
// "this move is unsafe" answers are not errors, see safety::MoveCheck.

use thiserror::Error;

/// All unrecoverable conditions the bot can hit
#[derive(Debug, Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("connection lost: {0}")]
    ConnectionLost(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed message: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("invalid game state: {0}")]
    InvalidSnapshot(String),

    #[error("player '{0}' not found in the game state")]
    PlayerMissing(String),

    #[error("invalid direction encountered: {0}")]
    InvalidDirection(String),
}

/// Shorthand result type used throughout the crate
pub type Result<T> = std::result::Result<T, BotError>;
