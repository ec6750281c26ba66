//! Async host loop for a session.
//!
//! Runs a [`MatchSession`] on a single task: tile selections arrive on a
//! channel, outcomes leave on another, and the delayed transitions (the
//! mismatch flip-back and the next deal after a finished round) are timers
//! owned by the same loop. Each selection is fully processed before the
//! next is read, and at most one timer is ever pending.

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::board::{BoardEvent, ScheduledFlip, TileIndex};
use crate::core::{ParticipantId, SetupError};

use super::match_session::{MatchSession, RoundSummary};

/// Input from the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A tile was clicked.
    Select(TileIndex),
    /// Deal the next round.
    NextRound,
}

/// Output for the renderer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Notice {
    Board { event: BoardEvent },
    TurnChanged { active: ParticipantId },
    RoundFinished { summary: RoundSummary },
    RoundDealt { round: u32 },
    Ignored { tile: TileIndex, reason: String },
    SetupFailed { reason: String },
}

impl From<SetupError> for Notice {
    fn from(err: SetupError) -> Self {
        Notice::SetupFailed {
            reason: err.to_string(),
        }
    }
}

/// A delayed transition waiting on the driver's timer.
#[derive(Clone, Copy, Debug)]
enum Timer {
    FlipBack(ScheduledFlip),
    NextDeal,
}

/// Wait for the pending timer, or forever if there is none.
async fn timer_due(pending: Option<(Timer, Instant)>) -> Timer {
    match pending {
        Some((timer, at)) => {
            sleep_until(at).await;
            timer
        }
        None => std::future::pending().await,
    }
}

fn deal_next(session: &mut MatchSession, notify: impl Fn(Notice)) {
    match session.start_round() {
        Ok(()) => {
            notify(Notice::RoundDealt { round: session.round() });
            notify(Notice::TurnChanged { active: session.active().id });
        }
        Err(err) => notify(err.into()),
    }
}

/// Drive `session` until the command channel closes, then return it.
///
/// When a round finishes and the config has a `next_round_delay`, the next
/// board is dealt once it elapses; `Command::NextRound` deals at once.
/// Notices are best-effort: if the receiver is gone they are dropped.
pub async fn drive(
    mut session: MatchSession,
    mut commands: mpsc::Receiver<Command>,
    notices: mpsc::UnboundedSender<Notice>,
) -> MatchSession {
    let mut pending: Option<(Timer, Instant)> = None;
    let notify = |notice: Notice| {
        let _ = notices.send(notice);
    };

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };

                match command {
                    Command::Select(tile) => match session.select(tile) {
                        Ok(update) => {
                            for event in update.events {
                                notify(Notice::Board { event });
                            }
                            if let Some(flip) = update.scheduled {
                                pending = Some((Timer::FlipBack(flip), Instant::now() + flip.delay));
                            }
                            if let Some(summary) = update.round {
                                notify(Notice::RoundFinished { summary });
                                if let Some(delay) = session.config().next_round_delay {
                                    pending = Some((Timer::NextDeal, Instant::now() + delay));
                                }
                            }
                        }
                        Err(err) => notify(Notice::Ignored { tile, reason: err.to_string() }),
                    },
                    Command::NextRound => {
                        // Any pending timer belongs to the old board.
                        pending = None;
                        deal_next(&mut session, notify);
                    }
                }
            }
            timer = timer_due(pending) => {
                pending = None;
                match timer {
                    Timer::FlipBack(flip) => {
                        if let Some(event) = session.conceal(flip) {
                            notify(Notice::Board { event });
                            notify(Notice::TurnChanged { active: session.active().id });
                        }
                    }
                    Timer::NextDeal => deal_next(&mut session, notify),
                }
            }
        }
    }

    debug!(round = session.round(), "session driver stopped");
    session
}
