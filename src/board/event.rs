//! Outcome events emitted by the board engine.
//!
//! The engine never renders anything. Renderers subscribe to these events
//! and the session forwards match/mismatch outcomes to the turn coordinator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TileIndex;

/// Something observable that happened on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BoardEvent {
    /// A tile was turned face up.
    Revealed { tile: TileIndex },
    /// The two compared tiles hold the same item and are now resolved.
    Matched { first: TileIndex, second: TileIndex },
    /// The two compared tiles differed and have flipped back face down.
    Mismatched { first: TileIndex, second: TileIndex },
    /// Every pair on the board is resolved.
    RoundComplete,
}

impl BoardEvent {
    /// The tiles involved in a comparison outcome, if any.
    #[must_use]
    pub fn pair(&self) -> Option<[TileIndex; 2]> {
        match *self {
            BoardEvent::Matched { first, second } | BoardEvent::Mismatched { first, second } => {
                Some([first, second])
            }
            BoardEvent::Revealed { .. } | BoardEvent::RoundComplete => None,
        }
    }
}

/// A pending flip-back after a mismatch.
///
/// The host waits `delay` and then hands this back to
/// [`BoardEngine::conceal`](super::BoardEngine::conceal). Only the flip the
/// engine is currently waiting on is honoured, so it fires exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFlip {
    pub(crate) token: u64,
    pub tiles: [TileIndex; 2],
    pub delay: Duration,
}
