//! Movement-cost payloads and cost visualisation

use glam::Vec2;

use crate::math::cost::{MAX_MOVEMENT_COST, MIN_MOVEMENT_COST, MovementCost, clamp_movement_cost};
use crate::math::geometry::Coordinate;
use crate::spatial::grid::Grid;
use crate::spatial::rect::Rect2D;

/// Tile payload carrying a movement cost that can be temporarily blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementTile {
    cost: u32,
    blocked: bool,
}

impl MovementTile {
    /// Create an unblocked tile with a clamped cost
    pub fn new(cost: u32) -> Self {
        Self {
            cost: clamp_movement_cost(cost),
            blocked: false,
        }
    }

    /// Create an impassable tile
    pub const fn wall() -> Self {
        Self {
            cost: MAX_MOVEMENT_COST,
            blocked: false,
        }
    }

    /// Replace the underlying cost, clamped to the supported range
    pub fn update_cost(&mut self, cost: u32) {
        self.cost = clamp_movement_cost(cost);
    }

    /// Make the tile impassable without forgetting its cost
    pub const fn block(&mut self) {
        self.blocked = true;
    }

    /// Restore the underlying cost
    pub const fn unblock(&mut self) {
        self.blocked = false;
    }

    /// Whether the tile is currently blocked
    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Cost ignoring any block
    pub const fn base_cost(&self) -> u32 {
        self.cost
    }
}

impl MovementCost for MovementTile {
    fn movement_cost(&self) -> u32 {
        if self.blocked {
            MAX_MOVEMENT_COST
        } else {
            self.cost
        }
    }
}

/// Strategy turning a movement cost into the UV rect used to display it
pub trait CostShader {
    /// UV rect for a tile with the given cost
    fn shade(&self, cost: u32) -> Rect2D;
}

impl<F> CostShader for F
where
    F: Fn(u32) -> Rect2D,
{
    fn shade(&self, cost: u32) -> Rect2D {
        self(cost)
    }
}

/// Horizontal gradient lookup into a palette texture
///
/// Cheap tiles sample towards `u = 1`, impassable tiles at `u = 0`, all on
/// the palette row `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostShading {
    /// Palette row sampled by every tile
    pub v: f32,
}

impl CostShading {
    /// Create a shading that samples palette row `v`
    pub const fn new(v: f32) -> Self {
        Self { v }
    }

    /// Gradient position of a cost in `0.0..=1.0`
    pub fn gradient(cost: u32) -> f32 {
        let range = (MAX_MOVEMENT_COST - MIN_MOVEMENT_COST) as f32;
        1.0 - (clamp_movement_cost(cost) - MIN_MOVEMENT_COST) as f32 / range
    }
}

impl Default for CostShading {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl CostShader for CostShading {
    fn shade(&self, cost: u32) -> Rect2D {
        Rect2D::solid(Vec2::new(Self::gradient(cost), self.v))
    }
}

/// Paint every tile of `grid` with the UV rect its movement cost maps to
///
/// Returns the number of tiles shaded.
pub fn shade_movement_costs<T, S>(grid: &mut Grid<T>, shader: &S) -> usize
where
    T: MovementCost,
    S: CostShader + ?Sized,
{
    let shades: Vec<(Coordinate, Rect2D)> = grid
        .iter()
        .map(|tile| (tile.coordinate(), shader.shade(tile.payload().movement_cost())))
        .collect();

    let mut shaded = 0;
    for (coordinate, uv_rect) in &shades {
        if grid.set_tile_uvs(*coordinate, uv_rect) {
            shaded += 1;
        }
    }
    shaded
}
