//! Turn coordinator: participants, the active pointer, scores and round wins.
//!
//! The coordinator only learns about the board through [`Outcome`]s; it
//! never inspects tiles.

pub mod coordinator;
pub mod result;

pub use coordinator::TurnCoordinator;
pub use result::{Outcome, RoundResult};
