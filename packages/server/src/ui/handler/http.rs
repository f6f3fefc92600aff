//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{infrastructure::dto::http::LobbyStatsDto, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to get current lobby counters
pub async fn debug_lobby_state(State(state): State<Arc<AppState>>) -> Json<LobbyStatsDto> {
    let snapshot = state.get_lobby_stats_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(LobbyStatsDto {
        connected: snapshot.connected,
        waiting: snapshot.lobby.waiting,
        active_matches: snapshot.lobby.active_matches,
    })
}
