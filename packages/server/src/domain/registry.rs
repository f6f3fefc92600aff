//! Connection Registry trait 定義
//!
//! 接続中の参加者とそのチャンネルを管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{MessagePushError, ParticipantId};

/// 参加者ごとの送信キューの上限。溢れた分は破棄する
pub const PUSHER_QUEUE_CAPACITY: usize = 64;

/// 中継・通知されるデータフレーム（中身は解釈しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    Binary(Vec<u8>),
}

/// 参加者へのフレーム送信用チャンネル（`PUSHER_QUEUE_CAPACITY` で有界）
pub type PusherChannel = mpsc::Sender<Frame>;

/// Connection Registry trait
///
/// ゲームのルールやマッチについては何も知らない。
/// 保持するのは参加者 ID とチャンネルの対応だけ。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 新しい参加者を登録し、ID を払い出す（失敗しない）
    async fn register(&self, channel: PusherChannel) -> ParticipantId;

    /// 参加者を削除する（冪等）
    async fn unregister(&self, participant_id: &ParticipantId);

    /// 参加者のチャンネルが送信可能かどうか
    async fn is_open(&self, participant_id: &ParticipantId) -> bool;

    /// 参加者にフレームを送信する。キューが一杯なら待たずに失敗する
    async fn push_to(
        &self,
        participant_id: &ParticipantId,
        frame: Frame,
    ) -> Result<(), MessagePushError>;

    /// 接続中の参加者数
    async fn count(&self) -> usize;
}
