//! Error types for the domino client.

use thiserror::Error;

use crate::domain::TurnError;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not reach the relay
    #[error("Connection error: {0}")]
    Connection(String),

    /// The transport failed mid-match
    #[error("Transport error: {0}")]
    Transport(String),

    /// A frame that is neither a control notification nor a peer message,
    /// or one that arrived out of sequence
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The transport ended before the match finished
    #[error("Connection closed before the match finished")]
    Closed,

    #[error("Opponent left the match")]
    OpponentLeft,

    /// The local player proposed a move the state machine refused
    #[error("Refused local move: {0}")]
    LocalMove(TurnError),

    /// A relayed move could not be applied; both copies have diverged
    #[error("Peer move rejected, match desynchronized: {0}")]
    Desync(TurnError),
}
