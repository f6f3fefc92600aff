//! WebSocket を使った ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 参加者ごとの有界な `Sender` を管理
//! - 参加者へのメッセージ送信（push_to）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `Sender` を受け取り、フレーム送信に使用します。
//! 送信は `try_send` で行い、読み出しが遅い参加者のキューが一杯なら破棄します。
//! 参加者を登録解除すると sender が drop され、UI 層の送信ループが終了します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{ConnectionRegistry, Frame, MessagePushError, ParticipantId, PusherChannel};

/// WebSocket を使った ConnectionRegistry 実装
///
/// ## 使用例
///
/// ```ignore
/// let clients = Arc::new(Mutex::new(HashMap::new()));
/// let registry = WebSocketConnectionRegistry::new(clients.clone());
///
/// let (tx, rx) = tokio::sync::mpsc::channel(PUSHER_QUEUE_CAPACITY);
/// let id = registry.register(tx).await;
/// registry.push_to(&id, Frame::Text("{\"type\":\"waiting\"}".into())).await?;
/// ```
pub struct WebSocketConnectionRegistry {
    /// 接続中の参加者の sender
    clients: Arc<Mutex<HashMap<ParticipantId, PusherChannel>>>,
}

impl WebSocketConnectionRegistry {
    /// 新しい WebSocketConnectionRegistry を作成
    pub fn new(clients: Arc<Mutex<HashMap<ParticipantId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl ConnectionRegistry for WebSocketConnectionRegistry {
    async fn register(&self, channel: PusherChannel) -> ParticipantId {
        let participant_id = ParticipantId::generate();
        let mut clients = self.clients.lock().await;
        clients.insert(participant_id, channel);
        tracing::debug!("Participant '{}' registered", participant_id);
        participant_id
    }

    async fn unregister(&self, participant_id: &ParticipantId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(participant_id).is_some() {
            tracing::debug!("Participant '{}' unregistered", participant_id);
        }
    }

    async fn is_open(&self, participant_id: &ParticipantId) -> bool {
        let clients = self.clients.lock().await;
        clients
            .get(participant_id)
            .is_some_and(|sender| !sender.is_closed())
    }

    async fn push_to(
        &self,
        participant_id: &ParticipantId,
        frame: Frame,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        let sender = clients
            .get(participant_id)
            .ok_or(MessagePushError::ClientNotFound(*participant_id))?;
        sender.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => MessagePushError::QueueFull(*participant_id),
            TrySendError::Closed(_) => MessagePushError::ChannelClosed(*participant_id),
        })?;
        tracing::debug!("Pushed message to participant '{}'", participant_id);
        Ok(())
    }

    async fn count(&self) -> usize {
        let clients = self.clients.lock().await;
        clients.len()
    }
}
