//! Relay wire format.
//!
//! JSON text frames tagged by `type`:
//!
//! ```text
//! client → relay   {"type":"join","gameId":"g1","playerId":"p1"}
//!                  {"type":"move","tileIndex":3}
//!                  {"type":"match","tiles":[3,7]}
//! relay → others   {"type":"move","playerId":"p1","tileIndex":3}
//!                  {"type":"match","playerId":"p1","tiles":[3,7]}
//! ```
//!
//! Only the envelope is checked: `type` and the field names. Payloads such
//! as `tileIndex` and `tiles` are passed through as whatever JSON the client
//! sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RelayError;

/// Messages a client sends to the relay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Associate this connection with a session. Not acknowledged.
    Join { game_id: String, player_id: String },
    /// A tile was selected.
    Move { tile_index: Value },
    /// A pair was matched.
    Match { tiles: Value },
}

impl ClientMessage {
    /// Parse one text frame.
    pub fn parse(text: &str) -> Result<Self, RelayError> {
        serde_json::from_str(text).map_err(RelayError::malformed)
    }
}

/// Messages the relay forwards to the other members of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Move { player_id: String, tile_index: Value },
    Match { player_id: String, tiles: Value },
}

impl ServerMessage {
    /// Serialize to a text frame.
    pub fn to_json(&self) -> Result<String, RelayError> {
        serde_json::to_string(self).map_err(RelayError::Encode)
    }
}
