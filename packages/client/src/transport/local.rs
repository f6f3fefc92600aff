//! Same-device move transport.
//!
//! Both seats share one key-value store. Writing the "last move" record
//! under [`LAST_MOVE_KEY`] broadcasts a change event that only the other seat
//! reacts to, like a storage event between two browser tabs.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
};

use async_trait::async_trait;
use domino_server::{domain::Seat, infrastructure::dto::websocket::ControlMessage};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, broadcast};

use crate::{
    error::ClientError,
    protocol::{PeerMessage, TransportEvent},
};

use super::MoveTransport;

/// Key the latest move record is written under
pub const LAST_MOVE_KEY: &str = "domino:last-move";
/// Key written when a seat's handle goes away
const PRESENCE_KEY: &str = "domino:presence";
const EVENT_CAPACITY: usize = 256;

/// Change notification for one write
#[derive(Debug, Clone)]
pub struct StorageEvent {
    pub key: String,
    pub value: String,
    pub origin: Seat,
}

/// Shared key-value store with change notifications
#[derive(Clone)]
pub struct SharedStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    events: broadcast::Sender<StorageEvent>,
}

impl SharedStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            values: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    pub async fn set_item(&self, origin: Seat, key: &str, value: String) {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.clone());
        // 購読者がいなければ誰にも届かないだけ
        let _ = self.events.send(StorageEvent {
            key: key.to_string(),
            value,
            origin,
        });
    }

    pub async fn get_item(&self, key: &str) -> Option<String> {
        self.values.lock().await.get(key).cloned()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.events.subscribe()
    }

    fn announce_departure(&self, origin: Seat) {
        let _ = self.events.send(StorageEvent {
            key: PRESENCE_KEY.to_string(),
            value: "left".to_string(),
            origin,
        });
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Value stored under [`LAST_MOVE_KEY`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MoveRecord {
    /// Increases by one per write from the same seat
    seq: u64,
    message: PeerMessage,
}

/// One seat's handle on a [`SharedStore`]
pub struct LocalTransport {
    seat: Seat,
    store: SharedStore,
    events: broadcast::Receiver<StorageEvent>,
    /// Notifications the relay would have sent
    pending: VecDeque<ControlMessage>,
    next_seq: u64,
    last_seen: u64,
}

impl LocalTransport {
    pub fn new(store: SharedStore, seat: Seat) -> Self {
        // relay と同じ通知順: seat 1 は waiting → start、seat 2 は start のみ
        let pending = match seat {
            Seat::One => VecDeque::from([ControlMessage::Waiting, ControlMessage::Start]),
            Seat::Two => VecDeque::from([ControlMessage::Start]),
        };

        Self {
            seat,
            events: store.subscribe(),
            store,
            pending,
            next_seq: 1,
            last_seen: 0,
        }
    }

    /// Handles for both seats on a fresh store: `(seat one, seat two)`
    pub fn pair() -> (Self, Self) {
        let store = SharedStore::new();
        (
            Self::new(store.clone(), Seat::One),
            Self::new(store, Seat::Two),
        )
    }
}

#[async_trait]
impl MoveTransport for LocalTransport {
    async fn send(&mut self, message: PeerMessage) -> Result<(), ClientError> {
        let record = MoveRecord {
            seq: self.next_seq,
            message,
        };
        let value =
            serde_json::to_string(&record).map_err(|e| ClientError::Protocol(e.to_string()))?;

        self.store.set_item(self.seat, LAST_MOVE_KEY, value).await;
        self.next_seq += 1;
        Ok(())
    }

    async fn recv(&mut self) -> Result<Option<TransportEvent>, ClientError> {
        if let Some(control) = self.pending.pop_front() {
            return Ok(Some(TransportEvent::Control(control)));
        }

        loop {
            let event = match self.events.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Closed) => return Ok(None),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    return Err(ClientError::Transport(format!(
                        "missed {} store events",
                        missed
                    )));
                }
            };

            // 自分の書き込みは見ない
            if event.origin == self.seat {
                continue;
            }

            match event.key.as_str() {
                PRESENCE_KEY => {
                    return Ok(Some(TransportEvent::Control(ControlMessage::OpponentLeft)));
                }
                LAST_MOVE_KEY => {
                    let record: MoveRecord = serde_json::from_str(&event.value)
                        .map_err(|e| ClientError::Protocol(e.to_string()))?;
                    if record.seq <= self.last_seen {
                        tracing::debug!(
                            "{} skipping already seen record {}",
                            self.seat,
                            record.seq
                        );
                        continue;
                    }
                    self.last_seen = record.seq;
                    return Ok(Some(TransportEvent::Peer(record.message)));
                }
                _ => {}
            }
        }
    }
}

impl Drop for LocalTransport {
    fn drop(&mut self) {
        self.store.announce_departure(self.seat);
    }
}
