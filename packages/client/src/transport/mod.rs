//! Move transports: how one seat's moves reach the other seat.
//!
//! - `websocket`: through the match relay
//! - `local`: through a same-device key-value broadcast store

pub mod local;
pub mod websocket;

use async_trait::async_trait;

use crate::{
    error::ClientError,
    protocol::{PeerMessage, TransportEvent},
};

pub use local::{LAST_MOVE_KEY, LocalTransport, SharedStore};
pub use websocket::WebSocketTransport;

/// Delivers peer messages in order and surfaces lifecycle notifications.
#[async_trait]
pub trait MoveTransport: Send {
    /// Send one message to the opponent
    async fn send(&mut self, message: PeerMessage) -> Result<(), ClientError>;

    /// Next event, or `None` once the transport has ended
    async fn recv(&mut self) -> Result<Option<TransportEvent>, ClientError>;

    /// Release the transport once the match is over
    async fn close(&mut self) {}
}
