//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: control notifications pushed to clients
//! - `http`: HTTP API response DTOs

pub mod http;
pub mod websocket;
