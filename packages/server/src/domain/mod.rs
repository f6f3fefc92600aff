//! ドメイン層
//!
//! 参加者・マッチ・ロビーのモデルと、インフラ層が実装する trait を定義します。

pub mod entity;
pub mod error;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{Departure, Lobby, LobbyStats, Match, Pairing, SessionState};
pub use error::{LobbyError, MessagePushError};
pub use registry::{ConnectionRegistry, Frame, PUSHER_QUEUE_CAPACITY, PusherChannel};
pub use repository::LobbyRepository;
pub use value_object::{MatchId, ParticipantId, Seat, Timestamp};
