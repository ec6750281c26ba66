//! Match configuration types.
//!
//! A session is configured once at startup:
//! - `GridSize`: board dimensions, which fix the number of pairs
//! - `MatchConfig`: grid, participant count, pauses, seed
//!
//! The caller validates configuration before starting a round; the board
//! and turn coordinator assume it is sound.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How long a mismatched pair stays face up before flipping back.
pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(1000);

/// How long a finished board stays on screen before the next deal.
pub const DEFAULT_NEXT_ROUND_DELAY: Duration = Duration::from_millis(800);

/// Largest board a [`TileIndex`](crate::board::TileIndex) can address.
pub const MAX_TILES: usize = u16::MAX as usize + 1;

/// Board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    /// Create a grid size. Use `validate()` before dealing.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of tiles. Saturates for grids too large to validate.
    #[must_use]
    pub const fn tiles(self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Number of pairs on the board.
    #[must_use]
    pub const fn pairs(self) -> usize {
        self.tiles() / 2
    }

    /// Check that the grid is non-empty, fits on a board and has an even
    /// tile count.
    pub fn validate(self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let tiles = self
            .rows
            .checked_mul(self.cols)
            .filter(|&tiles| tiles <= MAX_TILES)
            .ok_or(ConfigError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
            })?;
        if tiles % 2 != 0 {
            return Err(ConfigError::OddGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for GridSize {
    type Err = ConfigError;

    /// Parse `"ROWSxCOLS"`, e.g. `"4x4"` or `"6x6"`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let unparsable = || ConfigError::UnparsableGrid {
            input: input.to_string(),
        };

        let (rows, cols) = input
            .trim()
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(unparsable)?;
        let rows = rows.trim().parse().map_err(|_| unparsable())?;
        let cols = cols.trim().parse().map_err(|_| unparsable())?;

        Ok(Self::new(rows, cols))
    }
}

/// Configuration for a whole session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Board dimensions for every round.
    pub grid: GridSize,

    /// Number of participants taking turns. 1 is solitaire.
    pub participants: usize,

    /// Pause before a mismatched pair flips back.
    pub mismatch_delay: Duration,

    /// Pause between finishing a round and dealing the next one.
    /// `None` leaves the next deal to the host.
    pub next_round_delay: Option<Duration>,

    /// RNG seed. `None` picks one from the OS.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            participants: 1,
            mismatch_delay: DEFAULT_MISMATCH_DELAY,
            next_round_delay: Some(DEFAULT_NEXT_ROUND_DELAY),
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create the default configuration (4x4, one participant).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid size.
    #[must_use]
    pub fn with_grid(mut self, grid: GridSize) -> Self {
        self.grid = grid;
        self
    }

    /// Set the participant count.
    #[must_use]
    pub fn with_participants(mut self, count: usize) -> Self {
        self.participants = count;
        self
    }

    /// Set the mismatch pause.
    #[must_use]
    pub fn with_mismatch_delay(mut self, delay: Duration) -> Self {
        self.mismatch_delay = delay;
        self
    }

    /// Set the pause before the next deal, or `None` to deal only on request.
    #[must_use]
    pub fn with_next_round_delay(mut self, delay: Option<Duration>) -> Self {
        self.next_round_delay = delay;
        self
    }

    /// Fix the RNG seed for reproducible deals.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of pairs dealt per round.
    #[must_use]
    pub fn pairs(&self) -> usize {
        self.grid.pairs()
    }

    /// Check grid parity and participant count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if !(1..=255).contains(&self.participants) {
            return Err(ConfigError::ParticipantCount {
                count: self.participants,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pairs() {
        assert_eq!(GridSize::new(4, 4).pairs(), 8);
        assert_eq!(GridSize::new(6, 6).pairs(), 18);
        assert_eq!(GridSize::new(2, 3).pairs(), 3);
    }

    #[test]
    fn test_grid_parse() {
        assert_eq!("4x4".parse::<GridSize>(), Ok(GridSize::new(4, 4)));
        assert_eq!(" 6X5 ".parse::<GridSize>(), Ok(GridSize::new(6, 5)));
        assert!(matches!(
            "four by four".parse::<GridSize>(),
            Err(ConfigError::UnparsableGrid { .. })
        ));
        assert!("4x".parse::<GridSize>().is_err());
    }

    #[test]
    fn test_grid_display_round_trips_through_parse() {
        let grid = GridSize::new(3, 4);
        assert_eq!(grid.to_string(), "3x4");
        assert_eq!(grid.to_string().parse::<GridSize>(), Ok(grid));
    }

    #[test]
    fn test_grid_validation() {
        assert!(GridSize::new(4, 4).validate().is_ok());
        assert_eq!(
            GridSize::new(3, 3).validate(),
            Err(ConfigError::OddGrid { rows: 3, cols: 3 })
        );
        assert_eq!(GridSize::new(0, 4).validate(), Err(ConfigError::EmptyGrid));
    }

    #[test]
    fn test_grid_validation_rejects_huge_grids() {
        let grid: GridSize = "9999999999999x9999999999999".parse().unwrap();
        assert_eq!(
            grid.validate(),
            Err(ConfigError::GridTooLarge {
                rows: 9_999_999_999_999,
                cols: 9_999_999_999_999
            })
        );
        assert_eq!(grid.tiles(), usize::MAX);

        assert!(GridSize::new(256, 256).validate().is_ok());
        assert!(matches!(
            GridSize::new(256, 258).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_match_config_builder() {
        let config = MatchConfig::new()
            .with_grid(GridSize::new(2, 2))
            .with_participants(3)
            .with_mismatch_delay(Duration::from_millis(250))
            .with_seed(99);

        assert_eq!(config.pairs(), 2);
        assert_eq!(config.participants, 3);
        assert_eq!(config.mismatch_delay, Duration::from_millis(250));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.next_round_delay, Some(DEFAULT_NEXT_ROUND_DELAY));
        assert!(config.validate().is_ok());

        let manual = config.with_next_round_delay(None);
        assert_eq!(manual.next_round_delay, None);
    }

    #[test]
    fn test_match_config_rejects_participant_counts() {
        assert_eq!(
            MatchConfig::new().with_participants(0).validate(),
            Err(ConfigError::ParticipantCount { count: 0 })
        );
        assert!(MatchConfig::new().with_participants(256).validate().is_err());
    }
}
