//! Per-connection relay logic, independent of the socket.
//!
//! A `Connection` tracks which session it belongs to and turns client
//! messages into broadcasts. Dropping it removes the connection from the
//! registry, so a disconnect always cleans up.

use std::sync::Arc;

use tracing::debug;

use super::protocol::{ClientMessage, ServerMessage};
use super::registry::{ConnectionId, Outbox, SessionRegistry};
use super::RelayError;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Membership {
    game_id: String,
    player_id: String,
}

/// One client connection.
#[derive(Debug)]
pub struct Connection {
    id: ConnectionId,
    registry: Arc<SessionRegistry>,
    outbox: Outbox,
    membership: Option<Membership>,
}

impl Connection {
    /// Register a new connection whose outbound messages go to `outbox`.
    pub fn open(registry: Arc<SessionRegistry>, outbox: Outbox) -> Self {
        let id = registry.next_connection_id();
        Self {
            id,
            registry,
            outbox,
            membership: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Game id of the joined session, if any.
    #[must_use]
    pub fn game_id(&self) -> Option<&str> {
        self.membership.as_ref().map(|m| m.game_id.as_str())
    }

    /// Parse and handle one text frame.
    pub fn handle_text(&mut self, text: &str) -> Result<(), RelayError> {
        let message = ClientMessage::parse(text)?;
        self.handle(message)
    }

    /// Handle one parsed message.
    ///
    /// `move` and `match` before `join` are rejected with `NotJoined`.
    pub fn handle(&mut self, message: ClientMessage) -> Result<(), RelayError> {
        match message {
            ClientMessage::Join { game_id, player_id } => {
                self.join(game_id, player_id);
                Ok(())
            }
            ClientMessage::Move { tile_index } => self.forward("move", |player_id| {
                ServerMessage::Move {
                    player_id,
                    tile_index,
                }
            }),
            ClientMessage::Match { tiles } => {
                self.forward("match", |player_id| ServerMessage::Match { player_id, tiles })
            }
        }
    }

    fn join(&mut self, game_id: String, player_id: String) {
        self.leave();

        self.registry.join(&game_id, self.id, self.outbox.clone());
        debug!(connection = self.id, %game_id, %player_id, "joined session");
        self.membership = Some(Membership { game_id, player_id });
    }

    fn forward(
        &self,
        kind: &'static str,
        build: impl FnOnce(String) -> ServerMessage,
    ) -> Result<(), RelayError> {
        let membership = self
            .membership
            .as_ref()
            .ok_or(RelayError::NotJoined { kind })?;

        let message = build(membership.player_id.clone());
        let delivered = self.registry.broadcast(&membership.game_id, self.id, &message);
        debug!(connection = self.id, kind, delivered, "relayed");
        Ok(())
    }

    fn leave(&mut self) {
        if let Some(membership) = self.membership.take() {
            let discarded = self.registry.leave(&membership.game_id, self.id);
            debug!(
                connection = self.id,
                game_id = %membership.game_id,
                discarded,
                "left session"
            );
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.leave();
    }
}
