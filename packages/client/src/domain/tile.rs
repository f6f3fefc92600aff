//! Tiles, open board ends and the seeded double-six deal.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

/// Highest pip value of a double-six set
pub const MAX_PIP: u8 = 6;
/// Tiles dealt to each seat
pub const HAND_SIZE: usize = 7;

/// A domino tile as the player laid it down.
///
/// `[3|5]` and `[5|3]` are the same physical piece; use [`Tile::same_piece`]
/// when identity matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub left: u8,
    pub right: u8,
}

impl Tile {
    pub fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    /// Total pip count
    pub fn pips(&self) -> u8 {
        self.left + self.right
    }

    /// Whether either half shows `value`
    pub fn matches(&self, value: u8) -> bool {
        self.left == value || self.right == value
    }

    /// The pip left exposed when the half showing `value` is joined to the board
    pub fn other_end(&self, value: u8) -> Option<u8> {
        if self.left == value {
            Some(self.right)
        } else if self.right == value {
            Some(self.left)
        } else {
            None
        }
    }

    /// Orientation-independent identity
    pub fn same_piece(&self, other: &Tile) -> bool {
        (self.left == other.left && self.right == other.right)
            || (self.left == other.right && self.right == other.left)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.left, self.right)
    }
}

/// End of the chain a tile is laid against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    Left,
    Right,
}

/// The two exposed pip values of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardEnds {
    pub left: u8,
    pub right: u8,
}

impl BoardEnds {
    pub fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Side the tile joins: the requested one if it fits there, otherwise the
    /// first matching end checking left before right.
    pub fn resolve_side(&self, tile: &Tile, requested: Side) -> Option<Side> {
        if tile.matches(self.get(requested)) {
            Some(requested)
        } else if tile.matches(self.left) {
            Some(Side::Left)
        } else if tile.matches(self.right) {
            Some(Side::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for BoardEnds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.left, self.right)
    }
}

/// Every tile of a double-six set, 28 in total
pub fn double_six() -> Vec<Tile> {
    (0..=MAX_PIP)
        .flat_map(|left| (left..=MAX_PIP).map(move |right| Tile::new(left, right)))
        .collect()
}

/// Opening hands and boneyard derived from one seed.
///
/// Both peers run the same shuffle from the seed seat one announces, so they
/// hold identical copies without ever sending the tiles themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Tile>; 2],
    pub boneyard: Vec<Tile>,
}

impl Deal {
    pub fn from_seed(seed: u64) -> Self {
        let mut tiles = double_six();
        let mut rng = StdRng::seed_from_u64(seed);
        tiles.shuffle(&mut rng);

        let boneyard = tiles.split_off(HAND_SIZE * 2);
        let seat_two = tiles.split_off(HAND_SIZE);

        Self {
            hands: [tiles, seat_two],
            boneyard,
        }
    }
}
