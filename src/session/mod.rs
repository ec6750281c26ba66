//! Sessions: successive rounds played by a fixed set of participants.
//!
//! - `MatchSession`: synchronous core wiring board and turns together
//! - `drive`: tokio host loop that owns the mismatch timer

pub mod driver;
pub mod match_session;

pub use driver::{drive, Command, Notice};
pub use match_session::{MatchSession, RoundSummary, SessionUpdate};
