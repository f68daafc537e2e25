//! Tile identity, neighbor links, and tick membership
//!
//! Neighbors are stored as flat indices into the owning grid's tile array and
//! resolved back through the grid, so tiles never hold references to each
//! other. A missing slot means the grid ends in that direction.

use glam::Vec3;

use crate::math::geometry::{Coordinate, Direction};

/// Tile payloads that advance with the simulation clock
pub trait Tickable {
    /// Advance by one tick; `ticks` counts ticks since start-up
    fn tick(&mut self, ticks: u64);
}

/// A single addressable grid cell carrying a payload of type `T`
#[derive(Debug, Clone)]
pub struct Tile<T> {
    coordinate: Coordinate,
    local_coordinate: Coordinate,
    index: usize,
    chunk_index: usize,
    position: Vec3,
    neighbors: [Option<usize>; 8],
    is_active_tickable: bool,
    payload: T,
}

impl<T> Tile<T> {
    pub(crate) const fn new(
        coordinate: Coordinate,
        local_coordinate: Coordinate,
        index: usize,
        chunk_index: usize,
        position: Vec3,
        payload: T,
    ) -> Self {
        Self {
            coordinate,
            local_coordinate,
            index,
            chunk_index,
            position,
            neighbors: [None; 8],
            is_active_tickable: false,
            payload,
        }
    }

    /// Grid coordinate, unique within the grid
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    /// Coordinate relative to the owning chunk
    pub const fn local_coordinate(&self) -> Coordinate {
        self.local_coordinate
    }

    /// Flat row-major index in the grid's tile array
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Index of the owning chunk
    pub const fn chunk_index(&self) -> usize {
        self.chunk_index
    }

    /// World-space center of the tile
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Flat index of the neighbor in `direction`, if the grid continues there
    pub fn neighbor_index(&self, direction: Direction) -> Option<usize> {
        self.neighbors.get(direction.slot()).copied().flatten()
    }

    /// Whether a neighbor exists in `direction`
    pub fn has_neighbor(&self, direction: Direction) -> bool {
        self.neighbor_index(direction).is_some()
    }

    /// Whether the tile is in its chunk's active tick list
    pub const fn is_active_tickable(&self) -> bool {
        self.is_active_tickable
    }

    /// Caller-defined tile data
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Mutable caller-defined tile data
    pub const fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// First column of the grid
    pub fn is_left_edge(&self) -> bool {
        !self.has_neighbor(Direction::West)
    }

    /// Last column of the grid
    pub fn is_right_edge(&self) -> bool {
        !self.has_neighbor(Direction::East)
    }

    /// First row of the grid
    pub fn is_bottom_edge(&self) -> bool {
        !self.has_neighbor(Direction::South)
    }

    /// Last row of the grid
    pub fn is_top_edge(&self) -> bool {
        !self.has_neighbor(Direction::North)
    }

    /// Whether the grid ends in `direction`
    ///
    /// For diagonals this holds when the grid ends along either adjacent axis.
    pub fn is_edge_towards(&self, direction: Direction) -> bool {
        match direction {
            Direction::East => self.is_right_edge(),
            Direction::West => self.is_left_edge(),
            Direction::South => self.is_bottom_edge(),
            Direction::North => self.is_top_edge(),
            Direction::SouthEast => self.is_bottom_edge() || self.is_right_edge(),
            Direction::SouthWest => self.is_bottom_edge() || self.is_left_edge(),
            Direction::NorthEast => self.is_top_edge() || self.is_right_edge(),
            Direction::NorthWest => self.is_top_edge() || self.is_left_edge(),
        }
    }

    /// On any grid border
    pub fn is_edge(&self) -> bool {
        self.is_left_edge() || self.is_right_edge() || self.is_top_edge() || self.is_bottom_edge()
    }

    /// Bottom-left grid corner
    pub fn is_bottom_left_corner(&self) -> bool {
        self.is_bottom_edge() && self.is_left_edge()
    }

    /// Bottom-right grid corner
    pub fn is_bottom_right_corner(&self) -> bool {
        self.is_bottom_edge() && self.is_right_edge()
    }

    /// Top-left grid corner
    pub fn is_top_left_corner(&self) -> bool {
        self.is_top_edge() && self.is_left_edge()
    }

    /// Top-right grid corner
    pub fn is_top_right_corner(&self) -> bool {
        self.is_top_edge() && self.is_right_edge()
    }

    /// On any of the four grid corners
    pub fn is_corner(&self) -> bool {
        self.is_bottom_left_corner()
            || self.is_bottom_right_corner()
            || self.is_top_left_corner()
            || self.is_top_right_corner()
    }

    pub(crate) const fn set_neighbors(&mut self, neighbors: [Option<usize>; 8]) {
        self.neighbors = neighbors;
    }

    pub(crate) const fn set_active_tickable(&mut self, active: bool) {
        self.is_active_tickable = active;
    }
}
