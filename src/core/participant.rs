//! Participant identification and per-participant records.
//!
//! ## ParticipantId
//!
//! Type-safe identifier supporting 1-255 participants, stable for the
//! whole session.
//!
//! ## Participant
//!
//! Display name plus the two counters that survive between rounds:
//! cumulative score and round wins.

use serde::{Deserialize, Serialize};

/// Participant identifier supporting 1-255 participants.
///
/// Indices are 0-based: the first participant is `ParticipantId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw participant index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all participant IDs for `count` participants.
    ///
    /// ```
    /// use memory_match::core::ParticipantId;
    ///
    /// let ids: Vec<_> = ParticipantId::all(3).collect();
    /// assert_eq!(ids, vec![ParticipantId(0), ParticipantId(1), ParticipantId(2)]);
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = ParticipantId> {
        (0..count as u8).map(ParticipantId)
    }
}

impl std::fmt::Display for ParticipantId {
    /// Displayed 1-based, the way players are numbered on screen.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

/// A scored player entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Pairs matched over the whole session.
    pub score: u32,
    /// Rounds in which this participant held the top score.
    pub round_wins: u32,
}

impl Participant {
    /// Create a participant with zeroed counters.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            round_wins: 0,
        }
    }

    /// Create a participant named after its position ("Player 1", ...).
    pub fn numbered(id: ParticipantId) -> Self {
        Self::new(id, id.to_string())
    }
}
