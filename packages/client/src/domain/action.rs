//! Moves a seat can make on its turn.

use std::fmt;

use domino_server::domain::Seat;
use serde::{Deserialize, Serialize};

use super::tile::{Side, Tile};

/// One turn action, serialized with an `action` tag.
///
/// ```json
/// {"action":"place","player":1,"left":3,"right":5,"side":"left"}
/// {"action":"draw","player":2}
/// {"action":"pass","player":2}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Move {
    Place {
        player: Seat,
        left: u8,
        right: u8,
        side: Side,
    },
    Draw {
        player: Seat,
    },
    Pass {
        player: Seat,
    },
}

impl Move {
    pub fn place(player: Seat, tile: Tile, side: Side) -> Self {
        Move::Place {
            player,
            left: tile.left,
            right: tile.right,
            side,
        }
    }

    pub fn player(&self) -> Seat {
        match self {
            Move::Place { player, .. } | Move::Draw { player } | Move::Pass { player } => *player,
        }
    }

    /// The tile being placed, if this is a placement
    pub fn tile(&self) -> Option<Tile> {
        match self {
            Move::Place { left, right, .. } => Some(Tile::new(*left, *right)),
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place {
                player,
                left,
                right,
                side,
            } => write!(
                f,
                "{} places {} on the {:?} end",
                player,
                Tile::new(*left, *right),
                side
            ),
            Move::Draw { player } => write!(f, "{} draws", player),
            Move::Pass { player } => write!(f, "{} passes", player),
        }
    }
}
