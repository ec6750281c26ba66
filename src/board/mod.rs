//! Board engine: the deck of paired items and the flip/match state machine.
//!
//! The engine exclusively owns tile state. It reports what happened through
//! [`BoardEvent`]s and never reaches into participant state; the session
//! forwards match/mismatch outcomes to the turn coordinator.

pub mod engine;
pub mod event;
pub mod tile;

pub use engine::{BoardEngine, BoardEvents, Reveal};
pub use event::{BoardEvent, ScheduledFlip};
pub use tile::{Tile, TileIndex, TileState};
