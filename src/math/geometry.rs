//! Integer tile coordinates and the fixed 8-slot neighbor ordering
//!
//! Coordinates are signed so that `coordinate ± 1` lookups at the grid border
//! produce an out-of-range value instead of wrapping. Rows grow northwards:
//! `South` is `row - 1` and `North` is `row + 1`.

use num_traits::Float;
use std::fmt;

/// Column/row address of a tile within a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coordinate {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

impl Coordinate {
    /// Create a coordinate from a column and a row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate of the adjacent tile in the given direction
    #[must_use]
    pub const fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Sum of the absolute axis differences
    pub const fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the 8 neighbor slots of a tile
///
/// The discriminant is the slot index inside a tile's neighbor array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Increasing column
    East = 0,
    /// Decreasing column
    West = 1,
    /// Decreasing row
    South = 2,
    /// Increasing row
    North = 3,
    /// Increasing column, decreasing row
    SouthEast = 4,
    /// Decreasing column, decreasing row
    SouthWest = 5,
    /// Increasing column, increasing row
    NorthEast = 6,
    /// Decreasing column, increasing row
    NorthWest = 7,
}

impl Direction {
    /// All directions in slot order
    pub const ALL: [Self; 8] = [
        Self::East,
        Self::West,
        Self::South,
        Self::North,
        Self::SouthEast,
        Self::SouthWest,
        Self::NorthEast,
        Self::NorthWest,
    ];

    /// The four axis-aligned directions in slot order
    pub const CARDINALS: [Self; 4] = [Self::East, Self::West, Self::South, Self::North];

    /// Column and row delta of a single step in this direction
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::South => (0, -1),
            Self::North => (0, 1),
            Self::SouthEast => (1, -1),
            Self::SouthWest => (-1, -1),
            Self::NorthEast => (1, 1),
            Self::NorthWest => (-1, 1),
        }
    }

    /// Direction pointing back the way this one came
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::East => Self::West,
            Self::West => Self::East,
            Self::South => Self::North,
            Self::North => Self::South,
            Self::SouthEast => Self::NorthWest,
            Self::SouthWest => Self::NorthEast,
            Self::NorthEast => Self::SouthWest,
            Self::NorthWest => Self::SouthEast,
        }
    }

    /// Whether the step changes both column and row
    pub const fn is_diagonal(self) -> bool {
        (self as usize) >= 4
    }

    /// Slot index in a tile's neighbor array
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// Convert one world axis to a cell index using `floor((value - origin) / size)`
///
/// Returns `None` when the computation is not finite or does not fit an `i64`.
pub fn world_to_cell<F: Float>(value: F, origin: F, tile_size: F) -> Option<i64> {
    let cell = ((value - origin) / tile_size).floor();
    if !cell.is_finite() {
        return None;
    }
    cell.to_i64()
}
