//! Comparison outcomes and round results.

use serde::{Deserialize, Serialize};

use crate::core::ParticipantId;

/// Outcome of one pair comparison, as seen by the turn coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Match,
    Mismatch,
}

/// Who led when the round's last pair was matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    /// Single leader.
    Winner(ParticipantId),
    /// Several participants shared the top score. All are credited.
    Tie(Vec<ParticipantId>),
}

impl RoundResult {
    /// Build a result from the set of leaders.
    ///
    /// # Panics
    ///
    /// If `leaders` is empty.
    pub(crate) fn from_leaders(mut leaders: Vec<ParticipantId>) -> Self {
        assert!(!leaders.is_empty(), "A round always has at least one leader");

        if leaders.len() == 1 {
            RoundResult::Winner(leaders.remove(0))
        } else {
            RoundResult::Tie(leaders)
        }
    }

    /// Check if a participant was credited with the round.
    #[must_use]
    pub fn is_winner(&self, participant: ParticipantId) -> bool {
        match self {
            RoundResult::Winner(p) => *p == participant,
            RoundResult::Tie(ps) => ps.contains(&participant),
        }
    }

    /// Every credited participant.
    #[must_use]
    pub fn winners(&self) -> &[ParticipantId] {
        match self {
            RoundResult::Winner(p) => std::slice::from_ref(p),
            RoundResult::Tie(ps) => ps.as_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_result_is_winner() {
        let result = RoundResult::Winner(ParticipantId::new(1));
        assert!(!result.is_winner(ParticipantId::new(0)));
        assert!(result.is_winner(ParticipantId::new(1)));

        let tie = RoundResult::Tie(vec![ParticipantId::new(0), ParticipantId::new(2)]);
        assert!(tie.is_winner(ParticipantId::new(0)));
        assert!(!tie.is_winner(ParticipantId::new(1)));
        assert!(tie.is_winner(ParticipantId::new(2)));
    }

    #[test]
    fn test_from_leaders() {
        assert_eq!(
            RoundResult::from_leaders(vec![ParticipantId::new(3)]),
            RoundResult::Winner(ParticipantId::new(3))
        );

        let tie = RoundResult::from_leaders(vec![ParticipantId::new(0), ParticipantId::new(1)]);
        assert_eq!(tie.winners(), &[ParticipantId::new(0), ParticipantId::new(1)]);
    }

    #[test]
    #[should_panic(expected = "at least one leader")]
    fn test_from_no_leaders() {
        let _ = RoundResult::from_leaders(Vec::new());
    }
}
