//! UseCase 層
//!
//! ドメインの trait を組み合わせて、接続・切断・中継の各処理を実装します。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_lobby_stats;
mod relay_move;

pub use connect_participant::{ConnectParticipantUseCase, Connected};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, RelayError};
pub use get_lobby_stats::{GetLobbyStatsUseCase, LobbySnapshot};
pub use relay_move::RelayMoveUseCase;
