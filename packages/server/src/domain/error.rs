//! ドメイン層のエラー型

use thiserror::Error;

use super::ParticipantId;

/// Lobby（ペアリング状態）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LobbyError {
    /// 既に待機中またはマッチ中の参加者が再度 join した
    #[error("Participant '{0}' has already joined the lobby")]
    AlreadyJoined(ParticipantId),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 参加者がレジストリに存在しない
    #[error("Participant '{0}' is not registered")]
    ClientNotFound(ParticipantId),

    /// 参加者のチャンネルが既に閉じている
    #[error("Channel of participant '{0}' is closed")]
    ChannelClosed(ParticipantId),

    /// 参加者の送信キューが一杯（読み出しが追いついていない）
    #[error("Queue of participant '{0}' is full")]
    QueueFull(ParticipantId),
}
