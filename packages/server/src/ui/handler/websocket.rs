//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Frame, PUSHER_QUEUE_CAPACITY, ParticipantId},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: control notifications and
/// payloads relayed from the opponent (via rx channel) are sent to this
/// participant's WebSocket connection, text as text and binary as binary.
/// When the registry drops the sending half, the remaining messages are
/// flushed and the socket is closed.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages addressed to this participant
/// * `sender` - WebSocket sink to send messages to this participant
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<Frame>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let msg = match frame {
                Frame::Text(text) => Message::Text(text.into()),
                Frame::Binary(data) => Message::Binary(data.into()),
            };
            if sender.send(msg).await.is_err() {
                return;
            }
        }
        // Registry から外された（マッチ終了）
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Create a bounded channel for this participant to receive messages
    let (tx, rx) = mpsc::channel(PUSHER_QUEUE_CAPACITY);

    // Register, then wait in the pool or start a match
    let participant_id = match state.connect_participant_usecase.execute(tx).await {
        Ok(connected) => {
            tracing::info!(
                "Participant '{}' connected and registered",
                connected.participant_id
            );
            connected.participant_id
        }
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };

    // Spawn a task to push notifications and relayed payloads to this participant
    let mut send_task = pusher_loop(rx, sender);

    // Spawn a task to receive payloads from this participant and relay them
    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", participant_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let frame = Frame::Text(text.as_str().to_string());
                    relay(&state_clone, &participant_id, frame).await;
                }
                Message::Binary(data) => {
                    let frame = Frame::Binary(data.to_vec());
                    relay(&state_clone, &participant_id, frame).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Participant '{}' requested close", participant_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Unregister, tear down the match and notify the opponent
    let departure = state
        .disconnect_participant_usecase
        .execute(&participant_id)
        .await;
    tracing::info!(
        "Participant '{}' disconnected ({:?})",
        participant_id,
        departure
    );
}

/// Forward one data frame to the opponent; failures are dropped silently.
async fn relay(state: &AppState, sender: &ParticipantId, payload: Frame) {
    if let Err(e) = state.relay_move_usecase.execute(sender, payload).await {
        tracing::debug!("Dropped payload: {}", e);
    }
}
