//! Remaining-distance estimates for A* ordering

use crate::spatial::tile::Tile;

/// Distance estimate between a frontier tile and the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Tile steps between the coordinates, each charged at the cheapest
    /// walkable cost; never exceeds the true remaining cost
    #[default]
    Manhattan,
    /// `|ax + bx| + |ay + by|` over world positions, kept for compatibility
    /// with older search results; it is not a distance and can make A*
    /// return costlier paths
    LegacyCoordinateSum,
}

impl Heuristic {
    /// Evaluate the estimate from `from` to `to`
    ///
    /// `cheapest_step` is the lowest movement cost of any walkable tile in
    /// the grid. Only `Manhattan` uses it.
    pub fn estimate<T>(self, from: &Tile<T>, to: &Tile<T>, cheapest_step: u32) -> f32 {
        match self {
            Self::Manhattan => {
                from.coordinate().manhattan_distance(to.coordinate()) as f32 * cheapest_step as f32
            }
            Self::LegacyCoordinateSum => {
                let (a, b) = (from.position(), to.position());
                (a.x + b.x).abs() + (a.y + b.y).abs()
            }
        }
    }
}
