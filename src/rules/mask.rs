//! Neighbor bitmask used to select autotile variants
//!
//! The low byte holds one "has" bit per direction and the high byte holds the
//! matching "not-has" bit. A computed mask always sets exactly one of the two
//! for every direction; rules may require either half independently.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use crate::math::geometry::Direction;

/// 16-bit neighbor pattern of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborMask(u16);

impl NeighborMask {
    /// No bit set
    pub const NONE: Self = Self(0);

    /// Same-category neighbor to the north-east
    pub const HAS_NORTH_EAST: Self = Self(1);
    /// Same-category neighbor to the south-east
    pub const HAS_SOUTH_EAST: Self = Self(1 << 1);
    /// Same-category neighbor to the south-west
    pub const HAS_SOUTH_WEST: Self = Self(1 << 2);
    /// Same-category neighbor to the north-west
    pub const HAS_NORTH_WEST: Self = Self(1 << 3);
    /// Same-category neighbor to the north
    pub const HAS_NORTH: Self = Self(1 << 4);
    /// Same-category neighbor to the east
    pub const HAS_EAST: Self = Self(1 << 5);
    /// Same-category neighbor to the south
    pub const HAS_SOUTH: Self = Self(1 << 6);
    /// Same-category neighbor to the west
    pub const HAS_WEST: Self = Self(1 << 7);

    /// Every "has" bit
    pub const HAS_ALL: Self = Self(0x00ff);

    /// No same-category neighbor to the north-east
    pub const NOT_HAS_NORTH_EAST: Self = Self(1 << 8);
    /// No same-category neighbor to the south-east
    pub const NOT_HAS_SOUTH_EAST: Self = Self(1 << 9);
    /// No same-category neighbor to the south-west
    pub const NOT_HAS_SOUTH_WEST: Self = Self(1 << 10);
    /// No same-category neighbor to the north-west
    pub const NOT_HAS_NORTH_WEST: Self = Self(1 << 11);
    /// No same-category neighbor to the north
    pub const NOT_HAS_NORTH: Self = Self(1 << 12);
    /// No same-category neighbor to the east
    pub const NOT_HAS_EAST: Self = Self(1 << 13);
    /// No same-category neighbor to the south
    pub const NOT_HAS_SOUTH: Self = Self(1 << 14);
    /// No same-category neighbor to the west
    pub const NOT_HAS_WEST: Self = Self(1 << 15);

    /// Mask from raw bits
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The "has" bit of a direction
    pub const fn has(direction: Direction) -> Self {
        match direction {
            Direction::NorthEast => Self::HAS_NORTH_EAST,
            Direction::SouthEast => Self::HAS_SOUTH_EAST,
            Direction::SouthWest => Self::HAS_SOUTH_WEST,
            Direction::NorthWest => Self::HAS_NORTH_WEST,
            Direction::North => Self::HAS_NORTH,
            Direction::East => Self::HAS_EAST,
            Direction::South => Self::HAS_SOUTH,
            Direction::West => Self::HAS_WEST,
        }
    }

    /// The "not-has" bit of a direction
    pub const fn not_has(direction: Direction) -> Self {
        Self(Self::has(direction).0 << 8)
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for NeighborMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for NeighborMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for NeighborMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for NeighborMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Tile payloads grouped into visual categories for autotiling
pub trait TileCategory {
    /// Whether `other` belongs to the same category as `self`
    fn same_tile_category(&self, other: &Self) -> bool;
}
