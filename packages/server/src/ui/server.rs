//! Server execution logic.

use std::{collections::HashMap, sync::Arc};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::TraceLayer;

use crate::{
    domain::Lobby,
    infrastructure::{registry::WebSocketConnectionRegistry, repository::InMemoryLobbyRepository},
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetLobbyStatsUseCase,
        RelayMoveUseCase,
    },
};

use super::{
    handler::{debug_lobby_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket match relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_participant_usecase,
///     disconnect_participant_usecase,
///     relay_move_usecase,
///     get_lobby_stats_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// RelayMoveUseCase（手の中継のユースケース）
    relay_move_usecase: Arc<RelayMoveUseCase>,
    /// GetLobbyStatsUseCase（ロビー状態取得のユースケース）
    get_lobby_stats_usecase: Arc<GetLobbyStatsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        connect_participant_usecase: Arc<ConnectParticipantUseCase>,
        disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
        relay_move_usecase: Arc<RelayMoveUseCase>,
        get_lobby_stats_usecase: Arc<GetLobbyStatsUseCase>,
    ) -> Self {
        Self {
            connect_participant_usecase,
            disconnect_participant_usecase,
            relay_move_usecase,
            get_lobby_stats_usecase,
        }
    }

    /// Server backed by a fresh in-memory lobby and WebSocket registry.
    pub fn in_memory() -> Self {
        let repository = Arc::new(InMemoryLobbyRepository::new(Arc::new(Mutex::new(
            Lobby::new(),
        ))));
        let registry = Arc::new(WebSocketConnectionRegistry::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));

        Self::new(
            Arc::new(ConnectParticipantUseCase::new(
                repository.clone(),
                registry.clone(),
            )),
            Arc::new(DisconnectParticipantUseCase::new(
                repository.clone(),
                registry.clone(),
            )),
            Arc::new(RelayMoveUseCase::new(repository.clone(), registry.clone())),
            Arc::new(GetLobbyStatsUseCase::new(repository, registry)),
        )
    }

    /// Build the axum router with all endpoints.
    pub fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_participant_usecase: self.connect_participant_usecase,
            disconnect_participant_usecase: self.disconnect_participant_usecase,
            relay_move_usecase: self.relay_move_usecase,
            get_lobby_stats_usecase: self.get_lobby_stats_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/lobby", get(debug_lobby_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Domino relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until the process ends.
    ///
    /// Used by tests that bind port 0 and need the actual address.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        axum::serve(listener, self.router()).await
    }
}
