//! UseCase: 手の中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMoveUseCase::execute() メソッド
//! - 同じマッチの相手にだけ、ペイロードがそのまま届くこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：マッチ中の相手に中継
//! - 異常系：未ペアの送信者（ParticipantUnknown）、閉じた相手・キューが一杯の相手（PeerUnavailable）
//!
//! 中継はペイロードを解析・検証しない。テキストでもバイナリでもそのまま転送する。
//! 手の合法性は各クライアントのターン状態機械だけが判断する。

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, Frame, LobbyRepository, ParticipantId};

use super::error::RelayError;

/// 手の中継のユースケース
pub struct RelayMoveUseCase {
    /// Repository（ペアリング状態の抽象化）
    repository: Arc<dyn LobbyRepository>,
    /// Registry（接続中の参加者とチャンネル）
    registry: Arc<dyn ConnectionRegistry>,
}

impl RelayMoveUseCase {
    /// 新しい RelayMoveUseCase を作成
    pub fn new(
        repository: Arc<dyn LobbyRepository>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            repository,
            registry,
        }
    }

    /// 中継を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信者の参加者 ID
    /// * `payload` - 相手にそのまま転送するフレーム
    ///
    /// # Returns
    ///
    /// * `Ok(ParticipantId)` - 転送先の参加者 ID
    /// * `Err(RelayError)` - 転送しなかった理由（呼び出し側は破棄するだけ）
    pub async fn execute(
        &self,
        sender: &ParticipantId,
        payload: Frame,
    ) -> Result<ParticipantId, RelayError> {
        let opponent = self
            .repository
            .opponent_of(sender)
            .await
            .ok_or(RelayError::ParticipantUnknown(*sender))?;

        if !self.registry.is_open(&opponent).await {
            return Err(RelayError::PeerUnavailable(opponent));
        }

        self.registry
            .push_to(&opponent, payload)
            .await
            .map_err(|e| {
                tracing::debug!("Push to '{}' failed: {}", opponent, e);
                RelayError::PeerUnavailable(opponent)
            })?;

        tracing::debug!("Relayed payload from '{}' to '{}'", sender, opponent);
        Ok(opponent)
    }
}
