//! The board engine: dealing, flip sequencing and pair resolution.
//!
//! ## Flow
//!
//! 1. `reveal()` turns a hidden tile face up and records it as the first or
//!    second half of the current comparison.
//! 2. When the second tile is revealed the move counter increments and the
//!    two items are compared.
//! 3. A match resolves both tiles immediately. A mismatch locks the board
//!    and hands back a [`ScheduledFlip`]; the host calls `conceal()` with it
//!    once the pause has elapsed.
//!
//! While locked every `reveal()` is ignored, so at most one comparison is
//! ever in flight and at most two tiles are face up.

use std::time::Duration;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use smallvec::SmallVec;

use crate::core::{GameRng, InvalidSelection, Item, SetupError, MAX_TILES};

use super::event::{BoardEvent, ScheduledFlip};
use super::tile::{Tile, TileIndex, TileState};

/// Events produced by a single `reveal()`.
///
/// At most three: the reveal itself, a match, and round completion.
pub type BoardEvents = SmallVec<[BoardEvent; 3]>;

/// Result of an accepted `reveal()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    /// Events in the order they happened.
    pub events: BoardEvents,
    /// Set when the reveal produced a mismatch; run it after its delay.
    pub scheduled: Option<ScheduledFlip>,
}

impl Reveal {
    /// Whether this reveal completed a matching pair.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, BoardEvent::Matched { .. }))
    }

    /// Whether this reveal finished the round.
    #[must_use]
    pub fn completes_round(&self) -> bool {
        self.events.contains(&BoardEvent::RoundComplete)
    }
}

/// Owns the tiles of one round and all flip/match state.
#[derive(Clone, Debug, Serialize)]
pub struct BoardEngine {
    tiles: Vec<Tile>,

    /// Tiles of the current comparison, in reveal order.
    pending: SmallVec<[TileIndex; 2]>,

    /// Pending flip-back. `Some` means the board is locked.
    lock: Option<ScheduledFlip>,

    next_token: u64,
    moves: u32,
    matched_pairs: usize,
    mismatch_delay: Duration,
}

impl BoardEngine {
    /// Deal a new board of `pairs` pairs drawn from `pool`.
    ///
    /// Items are sampled uniformly without replacement, each is duplicated,
    /// and the `2 * pairs` tiles are shuffled so every ordering is equally
    /// likely. Pool entries sharing a locator count as one item.
    pub fn deal(
        pool: &[Item],
        pairs: usize,
        mismatch_delay: Duration,
        rng: &mut GameRng,
    ) -> Result<Self, SetupError> {
        if pairs == 0 {
            return Err(SetupError::InvalidLayout {
                reason: "a board needs at least one pair".to_string(),
            });
        }

        let mut seen = FxHashSet::default();
        let distinct: Vec<&Item> = pool
            .iter()
            .filter(|item| seen.insert(item.locator.as_str()))
            .collect();

        if distinct.len() < pairs {
            return Err(SetupError::InsufficientItems {
                required: pairs,
                available: distinct.len(),
            });
        }

        let mut items: Vec<Item> = rng
            .sample_indices(distinct.len(), pairs)
            .into_iter()
            .flat_map(|i| [distinct[i].clone(), distinct[i].clone()])
            .collect();
        rng.shuffle(&mut items);

        Self::from_tiles(items, mismatch_delay)
    }

    /// Build a board with tiles in exactly the given order.
    ///
    /// Every locator must appear exactly twice.
    pub fn from_layout(items: Vec<Item>, mismatch_delay: Duration) -> Result<Self, SetupError> {
        if items.is_empty() {
            return Err(SetupError::InvalidLayout {
                reason: "a board needs at least one pair".to_string(),
            });
        }

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for item in &items {
            *counts.entry(item.locator.as_str()).or_default() += 1;
        }
        if let Some((locator, count)) = counts.iter().find(|&(_, &count)| count != 2) {
            return Err(SetupError::InvalidLayout {
                reason: format!("item {locator:?} appears {count} times, expected 2"),
            });
        }

        Self::from_tiles(items, mismatch_delay)
    }

    fn from_tiles(items: Vec<Item>, mismatch_delay: Duration) -> Result<Self, SetupError> {
        if items.len() > MAX_TILES {
            return Err(SetupError::InvalidLayout {
                reason: format!("{} tiles do not fit on a board", items.len()),
            });
        }

        let tiles = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Tile::new(TileIndex::new(i as u16), item))
            .collect();

        Ok(Self {
            tiles,
            pending: SmallVec::new(),
            lock: None,
            next_token: 0,
            moves: 0,
            matched_pairs: 0,
            mismatch_delay,
        })
    }

    /// Replace this board with a freshly dealt one.
    ///
    /// On error the current board is left untouched. Flips scheduled on the
    /// old board are never honoured by the new one.
    pub fn redeal(&mut self, pool: &[Item], pairs: usize, rng: &mut GameRng) -> Result<(), SetupError> {
        let next_token = self.next_token;
        *self = Self::deal(pool, pairs, self.mismatch_delay, rng)?;
        self.next_token = next_token;
        Ok(())
    }

    // === Selection ===

    /// Turn a tile face up.
    ///
    /// Returns `Err` without touching any state when the board is locked,
    /// a comparison is already pending, or the tile is not face down.
    ///
    /// # Panics
    ///
    /// If `index` is not on the board.
    pub fn reveal(&mut self, index: TileIndex) -> Result<Reveal, InvalidSelection> {
        assert!(
            index.index() < self.tiles.len(),
            "tile index {} out of range for board of {} tiles",
            index,
            self.tiles.len()
        );

        if self.lock.is_some() {
            return Err(InvalidSelection::Locked);
        }
        if self.pending.len() >= 2 {
            return Err(InvalidSelection::PairPending);
        }
        match self.tiles[index.index()].state() {
            TileState::Hidden => {}
            TileState::Revealed => return Err(InvalidSelection::AlreadyRevealed(index)),
            TileState::Resolved => return Err(InvalidSelection::AlreadyResolved(index)),
        }

        self.tiles[index.index()].set_state(TileState::Revealed);
        self.pending.push(index);

        let mut events = BoardEvents::new();
        events.push(BoardEvent::Revealed { tile: index });

        let mut scheduled = None;
        if let [first, second] = self.pending[..] {
            self.moves += 1;

            if self.tile(first).item().same_content(self.tile(second).item()) {
                self.resolve_match(first, second, &mut events);
            } else {
                scheduled = Some(self.schedule_flip(first, second));
            }
        }

        Ok(Reveal { events, scheduled })
    }

    fn resolve_match(&mut self, first: TileIndex, second: TileIndex, events: &mut BoardEvents) {
        self.tiles[first.index()].set_state(TileState::Resolved);
        self.tiles[second.index()].set_state(TileState::Resolved);
        self.pending.clear();
        self.matched_pairs += 1;

        events.push(BoardEvent::Matched { first, second });
        if self.is_round_complete() {
            events.push(BoardEvent::RoundComplete);
        }
    }

    fn schedule_flip(&mut self, first: TileIndex, second: TileIndex) -> ScheduledFlip {
        self.next_token += 1;
        let flip = ScheduledFlip {
            token: self.next_token,
            tiles: [first, second],
            delay: self.mismatch_delay,
        };
        self.lock = Some(flip);
        flip
    }

    /// Run a scheduled flip-back: both tiles return face down and the board
    /// unlocks.
    ///
    /// Returns `None` for any flip other than the one currently pending, so
    /// running the same flip twice has no effect.
    pub fn conceal(&mut self, flip: ScheduledFlip) -> Option<BoardEvent> {
        if self.lock != Some(flip) {
            return None;
        }

        let [first, second] = flip.tiles;
        self.tiles[first.index()].set_state(TileState::Hidden);
        self.tiles[second.index()].set_state(TileState::Hidden);
        self.pending.clear();
        self.lock = None;

        Some(BoardEvent::Mismatched { first, second })
    }

    // === Queries ===

    /// All tiles in board order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a tile.
    ///
    /// # Panics
    ///
    /// If `index` is not on the board.
    #[must_use]
    pub fn tile(&self, index: TileIndex) -> &Tile {
        &self.tiles[index.index()]
    }

    /// Number of tiles (`2 * pairs`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a dealt board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pairs(&self) -> usize {
        self.tiles.len() / 2
    }

    /// Comparison attempts so far this round.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Pairs resolved so far this round. Never decreases.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Whether a mismatch is on display and reveals are ignored.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// The flip-back the board is waiting on, if any.
    #[must_use]
    pub fn pending_flip(&self) -> Option<ScheduledFlip> {
        self.lock
    }

    /// Number of tiles currently face up and unresolved. At most 2.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.state() == TileState::Revealed)
            .count()
    }

    /// True once every pair is resolved.
    #[must_use]
    pub fn is_round_complete(&self) -> bool {
        self.matched_pairs == self.pairs()
    }
}
