//! Turn rotation, scoring and round wins.
//!
//! ## Rules
//!
//! - A match scores a point for the active participant, who keeps the turn.
//! - A mismatch passes the turn to the next participant (wrapping).
//! - When a round completes, every participant holding the top cumulative
//!   score gets one round win. Ties credit everyone tied.
//!
//! Scores are cumulative for the whole session; only the active pointer is
//! reset between rounds.

use serde::{Deserialize, Serialize};

use crate::core::{Participant, ParticipantId};

use super::result::{Outcome, RoundResult};

/// Owns participants and whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCoordinator {
    participants: Vec<Participant>,
    active: usize,
}

impl TurnCoordinator {
    /// Create a coordinator for the named participants, in turn order.
    ///
    /// # Panics
    ///
    /// If `names` is empty or has more than 255 entries.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let participants: Vec<_> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                assert!(i < 255, "At most 255 participants supported");
                Participant::new(ParticipantId::new(i as u8), name)
            })
            .collect();
        assert!(!participants.is_empty(), "Must have at least 1 participant");

        Self {
            participants,
            active: 0,
        }
    }

    /// Create `count` participants named "Player 1" .. "Player N".
    pub fn with_count(count: usize) -> Self {
        assert!(count > 0, "Must have at least 1 participant");
        assert!(count <= 255, "At most 255 participants supported");

        Self {
            participants: ParticipantId::all(count).map(Participant::numbered).collect(),
            active: 0,
        }
    }

    // === Events ===

    /// Apply the turn rule for one comparison outcome.
    pub fn on_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Match => self.participants[self.active].score += 1,
            Outcome::Mismatch => self.active = (self.active + 1) % self.participants.len(),
        }
    }

    /// Credit a round win to every leader and report who they were.
    pub fn on_round_complete(&mut self) -> RoundResult {
        let leaders = self.leaders();
        for id in &leaders {
            self.participants[id.index()].round_wins += 1;
        }
        RoundResult::from_leaders(leaders)
    }

    /// Hand the first turn of a new round to the first participant.
    ///
    /// Scores and round wins are kept.
    pub fn begin_round(&mut self) {
        self.active = 0;
    }

    // === Queries ===

    /// The participant whose turn it is.
    #[must_use]
    pub fn active(&self) -> &Participant {
        &self.participants[self.active]
    }

    #[must_use]
    pub fn active_id(&self) -> ParticipantId {
        self.participants[self.active].id
    }

    /// Participants holding the maximum score, in turn order.
    #[must_use]
    pub fn leaders(&self) -> Vec<ParticipantId> {
        let top = self
            .participants
            .iter()
            .map(|p| p.score)
            .max()
            .unwrap_or_default();

        self.participants
            .iter()
            .filter(|p| p.score == top)
            .map(|p| p.id)
            .collect()
    }

    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// # Panics
    ///
    /// If `id` is not a participant.
    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> &Participant {
        &self.participants[id.index()]
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Change a participant's display name.
    pub fn rename(&mut self, id: ParticipantId, name: impl Into<String>) {
        self.participants[id.index()].name = name.into();
    }
}
