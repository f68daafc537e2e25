//! Ordered rule table mapping neighbor masks to visual variants

use crate::math::geometry::{Coordinate, Direction};
use crate::rules::mask::{NeighborMask, TileCategory};
use crate::spatial::grid::Grid;

/// A required neighbor pattern and the variant it selects
#[derive(Debug, Clone, PartialEq)]
pub struct TileRule<V> {
    /// Bits that must all be present in a tile's computed mask
    pub mask: NeighborMask,
    /// Variant selected when the rule matches
    pub output: V,
}

impl<V> TileRule<V> {
    /// Create a rule
    pub const fn new(mask: NeighborMask, output: V) -> Self {
        Self { mask, output }
    }

    /// Whether every required bit is present in `mask`
    ///
    /// Extra bits in `mask` do not prevent a match.
    pub const fn matches(&self, mask: NeighborMask) -> bool {
        mask.contains(self.mask)
    }
}

/// First-match-wins rule table for one tile category
#[derive(Debug, Clone, PartialEq)]
pub struct TileRuleResolver<V> {
    rules: Vec<TileRule<V>>,
}

impl<V> Default for TileRuleResolver<V> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<V> TileRuleResolver<V> {
    /// Create an empty rule table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; earlier rules take precedence
    pub fn add_rule(&mut self, mask: NeighborMask, output: V) {
        self.rules.push(TileRule::new(mask, output));
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[TileRule<V>] {
        &self.rules
    }

    /// First rule matching the tile's current neighbor mask
    ///
    /// `None` if the coordinate is outside the grid or no rule matches.
    pub fn matched_rule<T: TileCategory>(
        &self,
        grid: &Grid<T>,
        coordinate: Coordinate,
    ) -> Option<&TileRule<V>> {
        let mask = neighbors_to_mask(grid, coordinate)?;
        self.rules.iter().find(|rule| rule.matches(mask))
    }

    /// Output variant of the first matching rule
    pub fn output<T: TileCategory>(&self, grid: &Grid<T>, coordinate: Coordinate) -> Option<&V> {
        self.matched_rule(grid, coordinate).map(|rule| &rule.output)
    }
}

impl<V> FromIterator<(NeighborMask, V)> for TileRuleResolver<V> {
    fn from_iter<I: IntoIterator<Item = (NeighborMask, V)>>(iter: I) -> Self {
        Self {
            rules: iter
                .into_iter()
                .map(|(mask, output)| TileRule::new(mask, output))
                .collect(),
        }
    }
}

/// Compute the 16-bit neighbor mask of the tile at `coordinate`
///
/// A direction gets its "has" bit when the grid ends in that direction, or
/// when the neighbor there shares the tile's category; otherwise it gets its
/// "not-has" bit. Diagonals count as ending when either adjacent side is a
/// grid edge.
pub fn neighbors_to_mask<T: TileCategory>(
    grid: &Grid<T>,
    coordinate: Coordinate,
) -> Option<NeighborMask> {
    let tile = grid.tile_at(coordinate)?;

    let mask = Direction::ALL
        .into_iter()
        .fold(NeighborMask::NONE, |mask, direction| {
            let same = tile.is_edge_towards(direction)
                || grid
                    .neighbor(tile, direction)
                    .is_some_and(|neighbor| tile.payload().same_tile_category(neighbor.payload()));
            if same {
                mask | NeighborMask::has(direction)
            } else {
                mask | NeighborMask::not_has(direction)
            }
        });

    Some(mask)
}
