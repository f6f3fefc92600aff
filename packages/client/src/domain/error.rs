//! Turn state machine errors.

use domino_server::domain::Seat;
use thiserror::Error;

use super::{game::GameStatus, tile::Tile};

/// Reasons a move is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("The match is already over ({0:?})")]
    MatchOver(GameStatus),

    #[error("It is {current}'s turn, not {attempted}'s")]
    NotYourTurn { current: Seat, attempted: Seat },

    #[error("Tile {0} has already been placed")]
    DuplicateTile(Tile),

    #[error("Tile {0} matches neither open end")]
    IllegalMove(Tile),

    #[error("Tile {tile} is not in {player}'s hand")]
    TileNotInHand { tile: Tile, player: Seat },

    /// Drawing is only allowed with no playable tile and a non-empty boneyard
    #[error("{0} cannot draw")]
    CannotDraw(Seat),

    /// Passing is only allowed with no playable tile and an empty boneyard
    #[error("{0} cannot pass")]
    CannotPass(Seat),
}
