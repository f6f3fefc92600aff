//! Match relay for the domino game.
//!
//! Pairs WebSocket clients two at a time into matches and forwards their
//! move payloads verbatim to the opponent. The relay has no knowledge of the
//! game rules; each client runs its own turn state machine.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
