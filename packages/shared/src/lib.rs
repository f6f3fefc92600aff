//! Utilities shared by the domino relay server and client.

pub mod logger;
pub mod time;
