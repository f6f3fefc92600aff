//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{LobbyError, ParticipantId};

/// 参加者接続のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Lobby への参加に失敗した
    #[error("Failed to join the lobby: {0}")]
    Lobby(#[from] LobbyError),
}

/// 中継のエラー
///
/// どちらも送信者には通知せず、ログを残して破棄する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// 送信者がマッチに所属していない（未ペア、またはマッチ破棄済み）
    #[error("Participant '{0}' has no active match")]
    ParticipantUnknown(ParticipantId),

    /// 相手のチャンネルが閉じている
    #[error("Peer '{0}' is not available")]
    PeerUnavailable(ParticipantId),
}
