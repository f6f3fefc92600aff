//! Repository trait 定義
//!
//! ペアリング状態（Lobby）へのアクセスインターフェース。
//! UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。

use async_trait::async_trait;

use super::{Departure, LobbyError, LobbyStats, Pairing, ParticipantId, Timestamp};

/// Lobby Repository trait
///
/// 各メソッドは 1 つのクリティカルセクションとして実行される。
/// 待機プールとマッチ表の更新（enqueue / pair / teardown）は互いに排他。
#[async_trait]
pub trait LobbyRepository: Send + Sync {
    /// 参加者を待機プールに入れる、または待機中の参加者とペアにする
    async fn join(
        &self,
        participant_id: ParticipantId,
        at: Timestamp,
    ) -> Result<Pairing, LobbyError>;

    /// 参加者を待機プールまたはマッチから外す
    async fn leave(&self, participant_id: &ParticipantId) -> Departure;

    /// 同じマッチの相手を取得
    async fn opponent_of(&self, participant_id: &ParticipantId) -> Option<ParticipantId>;

    /// 待機数とマッチ数
    async fn stats(&self) -> LobbyStats;
}
