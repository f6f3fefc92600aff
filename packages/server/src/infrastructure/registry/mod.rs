//! Connection Registry の実装
//!
//! - `websocket`: WebSocket 接続ごとの 有界な `Sender` を管理する実装

pub mod websocket;

pub use websocket::WebSocketConnectionRegistry;
