//! Board slots and their per-tile state machine.
//!
//! ```text
//! Hidden ──reveal──▶ Revealed ──match──▶ Resolved
//!    ▲                   │
//!    └────mismatch───────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Item;

/// Position of a tile on the board (0-based, stable for the round).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileIndex(pub u16);

impl TileIndex {
    /// Create a new tile index.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Get the raw index as a `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Face state of a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileState {
    /// Face down.
    #[default]
    Hidden,
    /// Face up, part of the current comparison.
    Revealed,
    /// Matched. Terminal for the round.
    Resolved,
}

/// One board slot bound to an item for the whole round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    index: TileIndex,
    item: Item,
    state: TileState,
}

impl Tile {
    pub(crate) fn new(index: TileIndex, item: Item) -> Self {
        Self {
            index,
            item,
            state: TileState::Hidden,
        }
    }

    #[must_use]
    pub fn index(&self) -> TileIndex {
        self.index
    }

    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    #[must_use]
    pub fn state(&self) -> TileState {
        self.state
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == TileState::Hidden
    }

    pub(crate) fn set_state(&mut self, state: TileState) {
        self.state = state;
    }
}
