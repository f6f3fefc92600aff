//! UseCase: ロビー状態の取得（デバッグ用）

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, LobbyRepository, LobbyStats};

/// 接続数とロビーの統計
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LobbySnapshot {
    pub connected: usize,
    pub lobby: LobbyStats,
}

/// ロビー状態取得のユースケース
pub struct GetLobbyStatsUseCase {
    repository: Arc<dyn LobbyRepository>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetLobbyStatsUseCase {
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            repository,
            registry,
        }
    }

    pub async fn execute(&self) -> LobbySnapshot {
        LobbySnapshot {
            connected: self.registry.count().await,
            lobby: self.repository.stats().await,
        }
    }
}
