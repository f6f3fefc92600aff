//! Control notifications sent by the relay over the WebSocket.
//!
//! Relayed game payloads never go through these types; the relay forwards
//! them as opaque text. Clients tell the two apart by the `type` tag.

use serde::{Deserialize, Serialize};

use crate::domain::Frame;

/// Server-to-client lifecycle notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlMessage {
    /// Sent to the first participant of a forming pair.
    Waiting,
    /// Sent to both participants once paired.
    Start,
    /// Sent to the remaining participant when its match is torn down.
    OpponentLeft,
}

impl ControlMessage {
    /// Wire representation of the notification.
    pub fn to_json(self) -> String {
        // unit variants with an internal tag always serialize
        serde_json::to_string(&self).expect("control message serialization is infallible")
    }

    /// Text frame pushed to the participant.
    pub fn to_frame(self) -> Frame {
        Frame::Text(self.to_json())
    }
}
