//! A playing session: one board engine and one turn coordinator over
//! successive rounds.
//!
//! The session is the only place the two components meet. It forwards
//! match/mismatch outcomes from the board to the coordinator and records a
//! summary each time a round completes. It never sleeps: mismatch pauses
//! are handed to the caller as [`ScheduledFlip`]s.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::board::{BoardEngine, BoardEvent, BoardEvents, ScheduledFlip, TileIndex};
use crate::core::{
    GameRng, GameRngState, InvalidSelection, Item, MatchConfig, Participant, SessionError,
    SetupError,
};
use crate::turns::{Outcome, RoundResult, TurnCoordinator};

/// Record of a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Round number, starting at 1.
    pub round: u32,
    /// Comparison attempts it took.
    pub moves: u32,
    pub result: RoundResult,
}

/// What a single selection changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionUpdate {
    pub events: BoardEvents,
    /// Present after a mismatch; pass to [`MatchSession::conceal`] after its delay.
    pub scheduled: Option<ScheduledFlip>,
    /// Present when this selection finished the round.
    pub round: Option<RoundSummary>,
}

/// Session state across rounds.
#[derive(Clone, Debug)]
pub struct MatchSession {
    config: MatchConfig,
    pool: Vec<Item>,
    rng: GameRng,
    board: BoardEngine,
    turns: TurnCoordinator,
    round: u32,
    total_pairs_matched: u64,
    history: Vec<RoundSummary>,
}

impl MatchSession {
    /// Validate `config` and deal the first round from `pool`.
    pub fn new(config: MatchConfig, pool: Vec<Item>) -> Result<Self, SessionError> {
        config.validate()?;

        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let board = BoardEngine::deal(&pool, config.pairs(), config.mismatch_delay, &mut rng)?;
        let turns = TurnCoordinator::with_count(config.participants);

        info!(
            grid = %config.grid,
            participants = config.participants,
            seed = rng.seed(),
            "session started"
        );

        Ok(Self {
            config,
            pool,
            rng,
            board,
            turns,
            round: 1,
            total_pairs_matched: 0,
            history: Vec::new(),
        })
    }

    /// Deal a fresh board and give the first turn to the first participant.
    ///
    /// Scores and round wins carry over. On error the current board is kept.
    pub fn start_round(&mut self) -> Result<(), SetupError> {
        self.board
            .redeal(&self.pool, self.config.pairs(), &mut self.rng)
            .inspect_err(|err| debug!(%err, "could not deal next round"))?;
        self.turns.begin_round();
        self.round += 1;

        debug!(round = self.round, pairs = self.board.pairs(), "round dealt");
        Ok(())
    }

    /// Replace the item pool used for subsequent rounds.
    pub fn set_pool(&mut self, pool: Vec<Item>) {
        self.pool = pool;
    }

    /// Handle a tile activation from the renderer.
    ///
    /// Ignored selections come back as `Err` and change nothing.
    pub fn select(&mut self, tile: TileIndex) -> Result<SessionUpdate, InvalidSelection> {
        let reveal = self
            .board
            .reveal(tile)
            .inspect_err(|reason| trace!(%tile, %reason, "selection ignored"))?;

        let mut round = None;
        for event in &reveal.events {
            match event {
                BoardEvent::Matched { .. } => {
                    self.turns.on_outcome(Outcome::Match);
                    self.total_pairs_matched += 1;
                }
                BoardEvent::RoundComplete => round = Some(self.finish_round()),
                BoardEvent::Revealed { .. } | BoardEvent::Mismatched { .. } => {}
            }
        }

        Ok(SessionUpdate {
            events: reveal.events,
            scheduled: reveal.scheduled,
            round,
        })
    }

    /// Run a scheduled flip-back and pass the turn.
    ///
    /// Returns `None` if the flip was stale or already run.
    pub fn conceal(&mut self, flip: ScheduledFlip) -> Option<BoardEvent> {
        let event = self.board.conceal(flip)?;
        self.turns.on_outcome(Outcome::Mismatch);

        trace!(next = %self.turns.active_id(), "turn passed");
        Some(event)
    }

    fn finish_round(&mut self) -> RoundSummary {
        let summary = RoundSummary {
            round: self.round,
            moves: self.board.moves(),
            result: self.turns.on_round_complete(),
        };

        info!(
            round = summary.round,
            moves = summary.moves,
            winners = ?summary.result.winners(),
            "round complete"
        );
        self.history.push(summary.clone());
        summary
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &BoardEngine {
        &self.board
    }

    #[must_use]
    pub fn turns(&self) -> &TurnCoordinator {
        &self.turns
    }

    /// The participant whose turn it is.
    #[must_use]
    pub fn active(&self) -> &Participant {
        self.turns.active()
    }

    /// Current round number, starting at 1.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Pairs matched over every round of the session.
    #[must_use]
    pub fn total_pairs_matched(&self) -> u64 {
        self.total_pairs_matched
    }

    /// Finished rounds, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Seed of the session RNG, for replaying deals.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Position of the session RNG. A [`GameRng`] restored from it deals
    /// the same boards this session will deal next.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}
