//! Client entry points used by the binary.

use crate::{
    error::ClientError,
    player::AutoPlayer,
    session::{MatchReport, MatchSession},
    transport::{LocalTransport, WebSocketTransport},
};

/// Play one match against whoever the relay pairs us with
pub async fn run_client(url: String) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Connecting to {}", url);

    let transport = WebSocketTransport::connect(&url).await?;
    match MatchSession::new(transport, AutoPlayer).run().await {
        Ok(report) => {
            log_report(&report);
            Ok(())
        }
        Err(ClientError::OpponentLeft) => {
            tracing::warn!("Opponent left, match abandoned");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Play both seats in-process over the same-device transport
pub async fn run_local() -> Result<(), Box<dyn std::error::Error>> {
    let (one, two) = LocalTransport::pair();

    let first = tokio::spawn(MatchSession::new(one, AutoPlayer).run());
    let second = tokio::spawn(MatchSession::new(two, AutoPlayer).run());

    let first = first.await??;
    let second = second.await??;

    log_report(&first);
    if first.game != second.game {
        return Err(Box::new(ClientError::Protocol(
            "seats finished with different match states".to_string(),
        )));
    }
    tracing::info!("Both seats agree on the final state");

    Ok(())
}

fn log_report(report: &MatchReport) {
    tracing::info!(
        "Match over for {}: {:?}, {} tiles placed, open ends {:?}",
        report.seat,
        report.game.status(),
        report.game.placed().len(),
        report.game.board_ends()
    );
}
