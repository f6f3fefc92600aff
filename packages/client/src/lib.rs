//! Domino client library.
//!
//! The turn state machine, the peer message protocol and the move transports
//! that keep two clients of one match in step.

pub mod domain;
pub mod error;
pub mod player;
pub mod protocol;
pub mod runner;
pub mod session;
pub mod transport;

pub use runner::{run_client, run_local};
