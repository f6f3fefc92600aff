//! Client domain: tiles, moves and the turn state machine.

pub mod action;
pub mod error;
pub mod game;
pub mod tile;

pub use action::Move;
pub use error::TurnError;
pub use game::{Game, GameStatus, validate_move};
pub use tile::{BoardEnds, Deal, Side, Tile};
