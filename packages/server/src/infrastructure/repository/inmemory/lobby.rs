//! InMemory Lobby Repository 実装
//!
//! ドメイン層が定義する LobbyRepository trait の具体的な実装。
//! `Lobby` ドメインモデルを 1 つの Mutex で保護し、待機プールとマッチ表の
//! 更新をすべて同じクリティカルセクションで行います。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Departure, Lobby, LobbyError, LobbyRepository, LobbyStats, Pairing, ParticipantId, Timestamp,
};

/// インメモリ Lobby Repository 実装
pub struct InMemoryLobbyRepository {
    /// Lobby ドメインモデル
    lobby: Arc<Mutex<Lobby>>,
}

impl InMemoryLobbyRepository {
    /// 新しい InMemoryLobbyRepository を作成
    pub fn new(lobby: Arc<Mutex<Lobby>>) -> Self {
        Self { lobby }
    }
}

#[async_trait]
impl LobbyRepository for InMemoryLobbyRepository {
    async fn join(
        &self,
        participant_id: ParticipantId,
        at: Timestamp,
    ) -> Result<Pairing, LobbyError> {
        let mut lobby = self.lobby.lock().await;
        lobby.join(participant_id, at)
    }

    async fn leave(&self, participant_id: &ParticipantId) -> Departure {
        let mut lobby = self.lobby.lock().await;
        lobby.leave(participant_id)
    }

    async fn opponent_of(&self, participant_id: &ParticipantId) -> Option<ParticipantId> {
        let lobby = self.lobby.lock().await;
        lobby.opponent_of(participant_id)
    }

    async fn stats(&self) -> LobbyStats {
        let lobby = self.lobby.lock().await;
        lobby.stats()
    }
}
