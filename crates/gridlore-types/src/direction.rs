//! The 8 compass directions and their integer grid offsets.
//!
//! Movement patterns draw from three direction pools: [`Direction::ALL`]
//! for free movers, [`Direction::CARDINAL`] for orthogonal movers, and
//! [`Direction::DIAGONAL`] for diagonal movers. The pools are `const`
//! arrays so sampling is a plain slice choice with no allocation.

use serde::{Deserialize, Serialize};

/// A compass direction on the grid.
///
/// The grid origin is the top-left corner: `North` decreases `y`,
/// `East` increases `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Up: `(0, -1)`.
    North,
    /// Up-right: `(1, -1)`.
    NorthEast,
    /// Right: `(1, 0)`.
    East,
    /// Down-right: `(1, 1)`.
    SouthEast,
    /// Down: `(0, 1)`.
    South,
    /// Down-left: `(-1, 1)`.
    SouthWest,
    /// Left: `(-1, 0)`.
    West,
    /// Up-left: `(-1, -1)`.
    NorthWest,
}

impl Direction {
    /// All 8 compass directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    /// The 4 cardinal directions (north, east, south, west).
    pub const CARDINAL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// The 4 diagonal directions.
    pub const DIAGONAL: [Self; 4] = [
        Self::NorthEast,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// Return the `(dx, dy)` grid offset of one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Return the direction whose offset signs match `(dx, dy)`, if the
    /// deltas are not both zero.
    ///
    /// Used to turn a coordinate delta into a single homing step.
    pub const fn from_deltas(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Self::North),
            (1, -1) => Some(Self::NorthEast),
            (1, 0) => Some(Self::East),
            (1, 1) => Some(Self::SouthEast),
            (0, 1) => Some(Self::South),
            (-1, 1) => Some(Self::SouthWest),
            (-1, 0) => Some(Self::West),
            (-1, -1) => Some(Self::NorthWest),
            _ => None,
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::NorthEast => "north-east",
            Self::East => "east",
            Self::SouthEast => "south-east",
            Self::South => "south",
            Self::SouthWest => "south-west",
            Self::West => "west",
            Self::NorthWest => "north-west",
        };
        write!(f, "{name}")
    }
}
