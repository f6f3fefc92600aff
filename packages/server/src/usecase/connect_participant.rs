//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 登録、待機プールへの投入、ペアリング、通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目は waiting、2 人目で両者に start
//! - エッジケース：3 人目は新しい待機プールに入る

use std::sync::Arc;

use domino_shared::time::{millis_to_rfc3339, now_millis};

use crate::{
    domain::{ConnectionRegistry, LobbyRepository, Pairing, ParticipantId, PusherChannel, Timestamp},
    infrastructure::dto::websocket::ControlMessage,
};

use super::error::ConnectError;

/// 接続処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connected {
    /// 払い出された参加者 ID
    pub participant_id: ParticipantId,
    /// ペアリングの結果
    pub pairing: Pairing,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（ペアリング状態の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// Registry（接続中の参加者とチャンネル）
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `channel` - 参加者へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Connected)` - 参加者 ID とペアリング結果
    /// * `Err(ConnectError)` - Lobby への参加に失敗
    pub async fn execute(&self, channel: PusherChannel) -> Result<Connected, ConnectError> {
        // 1. Registry に登録（失敗しない）
        let participant_id = self.registry.register(channel).await;

        // 2. Lobby に参加（待機 or ペア成立）
        let pairing = match self
            .repository
            .join(participant_id, Timestamp::new(now_millis()))
            .await
        {
            Ok(pairing) => pairing,
            Err(e) => {
                self.registry.unregister(&participant_id).await;
                return Err(e.into());
            }
        };

        // 3. 通知
        match &pairing {
            Pairing::Waiting => {
                tracing::info!("Participant '{}' is waiting for an opponent", participant_id);
                self.notify(&participant_id, ControlMessage::Waiting).await;
            }
            Pairing::Paired(m) => {
                tracing::info!(
                    "Match '{}' started at {}: seat 1 '{}', seat 2 '{}'",
                    m.id,
                    millis_to_rfc3339(m.created_at.value()),
                    m.participants()[0],
                    m.participants()[1]
                );
                // seat 2 を先に通知する。seat 1 は start を受け取ってから
                // deal を送るので、seat 2 のチャンネルでは常に start が先になる
                for seat_holder in m.participants().into_iter().rev() {
                    self.notify(&seat_holder, ControlMessage::Start).await;
                }
            }
        }

        Ok(Connected {
            participant_id,
            pairing,
        })
    }

    async fn notify(&self, participant_id: &ParticipantId, message: ControlMessage) {
        if let Err(e) = self
            .registry
            .push_to(participant_id, message.to_frame())
            .await
        {
            tracing::warn!("Failed to notify {:?}: {}", message, e);
        }
    }
}
