//! Move transport over the match relay.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    error::ClientError,
    protocol::{PeerMessage, TransportEvent, parse_frame},
};

use super::MoveTransport;

pub struct WebSocketTransport {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketTransport {
    /// Connect to the relay, e.g. `ws://127.0.0.1:8080/ws`
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| ClientError::Connection(e.to_string()))?;

        tracing::info!("Connected to relay at {}", url);

        Ok(Self { stream })
    }
}

#[async_trait]
impl MoveTransport for WebSocketTransport {
    async fn send(&mut self, message: PeerMessage) -> Result<(), ClientError> {
        let json = message.to_json()?;
        self.stream
            .send(Message::Text(json.into()))
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))
    }

    async fn recv(&mut self) -> Result<Option<TransportEvent>, ClientError> {
        while let Some(message) = self.stream.next().await {
            match message {
                Ok(Message::Text(text)) => return parse_frame(text.as_str()).map(Some),
                Ok(Message::Binary(data)) => {
                    tracing::debug!("Ignoring {} byte binary frame", data.len());
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Relay closed the connection");
                    return Ok(None);
                }
                Ok(_) => {}
                Err(e) => return Err(ClientError::Transport(e.to_string())),
            }
        }
        Ok(None)
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            tracing::debug!("Close handshake failed: {}", e);
        }
    }
}
