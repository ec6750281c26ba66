//! Move relay: fan-out of game messages between clients in the same session.
//!
//! The relay performs no validation of game state and keeps nothing on
//! disk. It delivers each client message to the other members of the
//! sender's session, in the order that sender sent them.
//!
//! - `protocol`: JSON message types
//! - `registry`: process-wide game id → connections map
//! - `connection`: per-connection join/move/match handling
//! - `server`: axum WebSocket endpoint
//! - `config`: listen address from the environment

pub mod config;
pub mod connection;
pub mod protocol;
pub mod registry;
pub mod server;

pub use config::{RelayConfig, DEFAULT_PORT};
pub use connection::Connection;
pub use protocol::{ClientMessage, ServerMessage};
pub use registry::{ConnectionId, Outbox, SessionRegistry};
pub use server::{router, serve, serve_on};

/// Relay errors. None of them close a connection.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("malformed message: {reason}")]
    MalformedMessage {
        reason: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} received before join")]
    NotJoined { kind: &'static str },

    #[error("cannot encode message")]
    Encode(#[source] serde_json::Error),

    #[error("invalid {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

impl RelayError {
    pub(crate) fn malformed(source: serde_json::Error) -> Self {
        RelayError::MalformedMessage {
            reason: source.to_string(),
            source,
        }
    }
}
