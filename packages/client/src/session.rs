//! Match session: handshake, deal and the turn loop over one transport.

use domino_server::{domain::Seat, infrastructure::dto::websocket::ControlMessage};

use crate::{
    domain::Game,
    error::ClientError,
    player::GameView,
    protocol::{PeerMessage, TransportEvent},
    transport::MoveTransport,
};

/// Final state of a finished match as seen by one seat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    pub seat: Seat,
    pub game: Game,
}

/// Drives one seat through a match
pub struct MatchSession<T, V> {
    transport: T,
    view: V,
}

impl<T: MoveTransport, V: GameView> MatchSession<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self { transport, view }
    }

    /// Play until the match ends or the opponent goes away
    pub async fn run(mut self) -> Result<MatchReport, ClientError> {
        let result = self.play().await;
        self.transport.close().await;
        result
    }

    async fn play(&mut self) -> Result<MatchReport, ClientError> {
        let seat = self.await_seat().await?;
        tracing::info!("Match started, playing as {}", seat);

        let mut game = match seat {
            Seat::One => {
                let seed = rand::random::<u64>();
                self.transport.send(PeerMessage::Deal { seed }).await?;
                tracing::debug!("Dealt with seed {}", seed);
                Game::from_seed(seed)
            }
            Seat::Two => self.await_deal().await?,
        };
        self.view.on_start(seat, &game);

        while !game.is_over() {
            if game.current_player() == seat {
                let mv = self.view.choose_move(seat, &game);
                // 送る前に自分の状態機械で検証する
                game.attempt_move(seat, &mv)
                    .map_err(ClientError::LocalMove)?;
                self.transport.send(PeerMessage::Move(mv)).await?;
                self.view.on_move(&mv, &game);
                continue;
            }

            match self.next_event().await? {
                TransportEvent::Peer(PeerMessage::Move(mv)) => {
                    game.apply_move(&mv).map_err(ClientError::Desync)?;
                    self.view.on_move(&mv, &game);
                }
                TransportEvent::Peer(PeerMessage::Deal { .. }) => {
                    return Err(ClientError::Protocol(
                        "deal received after the match started".to_string(),
                    ));
                }
                TransportEvent::Control(ControlMessage::OpponentLeft) => {
                    return Err(ClientError::OpponentLeft);
                }
                TransportEvent::Control(other) => {
                    tracing::debug!("Ignoring {:?} during play", other);
                }
            }
        }

        self.view.on_finish(seat, &game);
        Ok(MatchReport { seat, game })
    }

    async fn next_event(&mut self) -> Result<TransportEvent, ClientError> {
        self.transport.recv().await?.ok_or(ClientError::Closed)
    }

    /// `waiting` then `start` makes this seat one, `start` alone seat two
    async fn await_seat(&mut self) -> Result<Seat, ClientError> {
        let mut waited = false;
        loop {
            match self.next_event().await? {
                TransportEvent::Control(ControlMessage::Waiting) => {
                    tracing::info!("Waiting for an opponent...");
                    waited = true;
                }
                TransportEvent::Control(ControlMessage::Start) => {
                    return Ok(if waited { Seat::One } else { Seat::Two });
                }
                TransportEvent::Control(ControlMessage::OpponentLeft) => {
                    return Err(ClientError::OpponentLeft);
                }
                TransportEvent::Peer(message) => {
                    return Err(ClientError::Protocol(format!(
                        "{:?} received before the match started",
                        message
                    )));
                }
            }
        }
    }

    async fn await_deal(&mut self) -> Result<Game, ClientError> {
        match self.next_event().await? {
            TransportEvent::Peer(PeerMessage::Deal { seed }) => Ok(Game::from_seed(seed)),
            TransportEvent::Control(ControlMessage::OpponentLeft) => Err(ClientError::OpponentLeft),
            other => Err(ClientError::Protocol(format!(
                "expected a deal, got {:?}",
                other
            ))),
        }
    }
}
