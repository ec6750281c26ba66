//! Core types: items, participants, configuration, errors, RNG.
//!
//! These are shared by the board engine, the turn coordinator and the
//! session that wires them together.

pub mod config;
pub mod error;
pub mod item;
pub mod participant;
pub mod rng;

pub use config::{GridSize, MatchConfig, DEFAULT_MISMATCH_DELAY, DEFAULT_NEXT_ROUND_DELAY, MAX_TILES};
pub use error::{ConfigError, InvalidSelection, SessionError, SetupError};
pub use item::{Item, MediaKind};
pub use participant::{Participant, ParticipantId};
pub use rng::{GameRng, GameRngState};
