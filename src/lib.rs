//! # memory-match
//!
//! Engine for a tile-matching memory game with local turn-taking, plus a
//! small WebSocket relay that fans move/match messages out to the other
//! clients of a session.
//!
//! ## Design Principles
//!
//! 1. **Separated ownership**: the board engine owns tiles, the turn
//!    coordinator owns participants. They communicate only through
//!    match/mismatch outcomes.
//!
//! 2. **N-Participant**: one participant is plain solitaire; more take
//!    turns. No code path assumes two.
//!
//! 3. **Deterministic**: every deal comes from a seeded RNG, and the
//!    mismatch pause is an explicit scheduled transition, never a sleep
//!    inside the engine.
//!
//! ## Modules
//!
//! - `core`: Items, participants, configuration, errors, RNG
//! - `board`: Board engine and tile state machine
//! - `turns`: Turn coordinator, scoring, round wins
//! - `session`: Session wiring board and turns across rounds, async driver
//! - `relay`: WebSocket fan-out server

pub mod board;
pub mod core;
pub mod relay;
pub mod session;
pub mod turns;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameRng, GameRngState, GridSize, InvalidSelection, Item, MatchConfig, MediaKind,
    Participant, ParticipantId, SessionError, SetupError,
};

pub use crate::board::{BoardEngine, BoardEvent, Reveal, ScheduledFlip, Tile, TileIndex, TileState};

pub use crate::turns::{Outcome, RoundResult, TurnCoordinator};

pub use crate::session::{MatchSession, RoundSummary, SessionUpdate};
