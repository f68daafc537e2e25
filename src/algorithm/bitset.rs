use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over a grid's flat tile indices
///
/// Used as the visited/closed marker of the path searches. Provides O(1)
/// membership testing without hashing tiles.
#[derive(Clone, Debug)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(tile_count: usize) -> Self {
        Self {
            bits: bitvec![0; tile_count],
        }
    }

    /// Insert a tile index; returns false if it was already present
    ///
    /// Indices past the capacity are ignored.
    pub fn insert(&mut self, tile: usize) -> bool {
        if tile >= self.bits.len() || self.contains(tile) {
            return false;
        }
        self.bits.set(tile, true);
        true
    }

    /// Remove a tile index
    pub fn remove(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, false);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all tile indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
