//! Error types for setup, configuration and tile selection.

use crate::board::TileIndex;

/// Failures when dealing a new board. Fatal to starting the round.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("not enough items: {required} pairs requested but only {available} distinct items available")]
    InsufficientItems { required: usize, available: usize },

    #[error("invalid layout: {reason}")]
    InvalidLayout { reason: String },
}

/// Rejected match configuration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid {rows}x{cols} has an odd number of tiles")]
    OddGrid { rows: usize, cols: usize },

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("grid {rows}x{cols} is too large")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("cannot parse grid size {input:?}, expected ROWSxCOLS")]
    UnparsableGrid { input: String },

    #[error("participant count must be between 1 and 255, got {count}")]
    ParticipantCount { count: usize },
}

/// Failures when creating a session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// A selection the board ignores.
///
/// These model impossible UI states (clicking a face-up tile, clicking
/// during the mismatch pause). Callers drop them; they are never shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSelection {
    #[error("board is locked while a mismatch is shown")]
    Locked,

    #[error("two tiles are already pending comparison")]
    PairPending,

    #[error("tile {0} is already face up")]
    AlreadyRevealed(TileIndex),

    #[error("tile {0} is already matched")]
    AlreadyResolved(TileIndex),
}
