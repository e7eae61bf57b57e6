//! Error types for the slot core

use thiserror::Error;

/// Slot core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    /// No configuration registered under this game id
    #[error("Unknown game: {0}")]
    UnknownGame(String),

    /// Grid shape does not match the game configuration; fatal, indicates
    /// a bug upstream rather than bad input
    #[error(
        "Malformed grid for {game}: expected {expected_reels} reels of {expected_rows} symbols, got {got}"
    )]
    MalformedGrid {
        game: String,
        expected_reels: usize,
        expected_rows: usize,
        got: String,
    },

    /// Configuration rejected at registration or import
    #[error("Invalid config for {game}: {reason}")]
    InvalidConfig { game: String, reason: String },
}

/// Result type for slot operations
pub type SlotResult<T> = Result<T, SlotError>;
