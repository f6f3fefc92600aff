//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /debug/lobby`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyStatsDto {
    /// Participants currently holding an open connection
    pub connected: usize,
    /// Participants waiting for an opponent (0 or 1)
    pub waiting: usize,
    /// Matches with two live participants
    pub active_matches: usize,
}
