//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLobbyStatsUseCase,
    RelayMoveUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続とペアリング）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断とマッチ破棄）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// RelayMoveUseCase（手の中継）
    pub relay_move_usecase: Arc<RelayMoveUseCase>,
    /// GetLobbyStatsUseCase（ロビー状態の取得）
    pub get_lobby_stats_usecase: Arc<GetLobbyStatsUseCase>,
}
