//! Process-wide session registry.
//!
//! ## Lifecycle
//!
//! - Created once when the relay starts and shared by every connection.
//! - A session entry appears on the first `join` for its game id.
//! - Connections leave on disconnect (or on joining another session); the
//!   entry is discarded as soon as its last member leaves.
//! - Cleared when the relay shuts down. Nothing is persisted.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;

use super::protocol::ServerMessage;

/// Identifies one live connection.
pub type ConnectionId = u64;

/// Outbound queue of a connection. Preserves send order.
pub type Outbox = mpsc::UnboundedSender<ServerMessage>;

/// Mapping from game id to the connections in that session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<FxHashMap<String, FxHashMap<ConnectionId, Outbox>>>,
    next_id: AtomicU64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a new connection.
    pub fn next_connection_id(&self) -> ConnectionId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Add a connection to a session, creating the session if needed.
    pub fn join(&self, game_id: &str, connection: ConnectionId, outbox: Outbox) {
        self.sessions
            .lock()
            .entry(game_id.to_string())
            .or_default()
            .insert(connection, outbox);
    }

    /// Remove a connection from a session.
    ///
    /// Returns true if the session became empty and was discarded.
    pub fn leave(&self, game_id: &str, connection: ConnectionId) -> bool {
        let mut sessions = self.sessions.lock();
        let Some(members) = sessions.get_mut(game_id) else {
            return false;
        };

        members.remove(&connection);
        if members.is_empty() {
            sessions.remove(game_id);
            true
        } else {
            false
        }
    }

    /// Send `message` to every member of `game_id` except `sender`.
    ///
    /// Members whose queue is closed are skipped silently. Returns the
    /// number of queues the message was handed to.
    pub fn broadcast(&self, game_id: &str, sender: ConnectionId, message: &ServerMessage) -> usize {
        let sessions = self.sessions.lock();
        let Some(members) = sessions.get(game_id) else {
            return 0;
        };

        members
            .iter()
            .filter(|&(&id, _)| id != sender)
            .filter(|(_, outbox)| outbox.send(message.clone()).is_ok())
            .count()
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Number of connections in a session (0 if it does not exist).
    pub fn member_count(&self, game_id: &str) -> usize {
        self.sessions.lock().get(game_id).map_or(0, |m| m.len())
    }

    /// Drop every session. Used at shutdown.
    pub fn clear(&self) {
        self.sessions.lock().clear();
    }
}
