//! Messages exchanged between the two clients of a match.
//!
//! The relay forwards these untouched; only the clients parse them.

use domino_server::infrastructure::dto::websocket::ControlMessage;
use serde::{Deserialize, Serialize};

use crate::{domain::Move, error::ClientError};

/// Client-to-client payload, tagged with `type`.
///
/// ```json
/// {"type":"deal","seed":42}
/// {"type":"move","action":"place","player":1,"left":3,"right":5,"side":"left"}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PeerMessage {
    /// Sent once by seat one; both sides derive the same deal from the seed
    Deal { seed: u64 },
    Move(Move),
}

impl PeerMessage {
    pub fn to_json(&self) -> Result<String, ClientError> {
        serde_json::to_string(self).map_err(|e| ClientError::Protocol(e.to_string()))
    }
}

/// Anything a transport can hand to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    Control(ControlMessage),
    Peer(PeerMessage),
}

/// Classify one text frame from the relay
pub fn parse_frame(text: &str) -> Result<TransportEvent, ClientError> {
    if let Ok(control) = serde_json::from_str::<ControlMessage>(text) {
        Ok(TransportEvent::Control(control))
    } else if let Ok(peer) = serde_json::from_str::<PeerMessage>(text) {
        Ok(TransportEvent::Peer(peer))
    } else {
        Err(ClientError::Protocol(format!("unrecognized frame: {}", text)))
    }
}
