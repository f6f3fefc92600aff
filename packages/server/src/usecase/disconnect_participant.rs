//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 待機中の切断、マッチ中の切断（相手への通知と接続終了）
//!
//! ### なぜこのテストが必要か
//! - マッチは 2 人揃っているか存在しないかのどちらか
//! - 残った参加者を Paired のまま放置しない
//!
//! ### どのような状況を想定しているか
//! - 正常系：待機中の切断、マッチ中の切断
//! - エッジケース：既に切断済みの参加者（冪等）

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, Departure, LobbyRepository, ParticipantId},
    infrastructure::dto::websocket::ControlMessage,
};

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（ペアリング状態の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// Registry（接続中の参加者とチャンネル）
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// 参加者切断を実行（冪等）
    ///
    /// 1. Registry から登録解除（以降この参加者への中継は破棄される）
    /// 2. Lobby から外す（マッチがあれば破棄）
    /// 3. 相手がいれば opponent-left を通知し、相手の接続も終了させる
    ///
    /// # Returns
    ///
    /// Lobby から外した結果
    pub async fn execute(&self, participant_id: &ParticipantId) -> Departure {
        self.registry.unregister(participant_id).await;

        let departure = self.repository.leave(participant_id).await;
        match &departure {
            Departure::LeftPool => {
                tracing::info!("Participant '{}' left the waiting pool", participant_id);
            }
            Departure::MatchClosed { match_id, opponent } => {
                tracing::info!(
                    "Match '{}' closed: '{}' disconnected, notifying '{}'",
                    match_id,
                    participant_id,
                    opponent
                );
                if let Err(e) = self
                    .registry
                    .push_to(opponent, ControlMessage::OpponentLeft.to_frame())
                    .await
                {
                    tracing::debug!("Opponent '{}' already gone: {}", opponent, e);
                }
                // 送信済みの通知を流し切った後、相手の送信ループが終了する
                self.registry.unregister(opponent).await;
            }
            Departure::Unknown => {
                tracing::debug!("Participant '{}' had no session to close", participant_id);
            }
        }

        departure
    }
}
