//! Terrain definitions and autotiled terrain payloads
//!
//! Terrains are shared definitions handed out by `Arc`; two tiles belong to
//! the same autotile category only when they point at the very same
//! definition.

use std::sync::Arc;

use tracing::trace;

use crate::math::cost::{MAX_MOVEMENT_COST, MovementCost, clamp_movement_cost};
use crate::math::geometry::{Coordinate, Direction};
use crate::rules::mask::{NeighborMask, TileCategory};
use crate::rules::resolver::TileRuleResolver;
use crate::spatial::grid::Grid;
use crate::spatial::rect::Rect2D;

/// A paintable ground type with its sprite and autotile rules
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    name: String,
    sprite: Rect2D,
    movement_cost: u32,
    fertility: f32,
    elevation: i32,
    rules: TileRuleResolver<Rect2D>,
}

impl Terrain {
    /// Create a terrain with no rules, zero cost, fertility, and elevation
    pub fn new(name: impl Into<String>, sprite: Rect2D) -> Self {
        Self {
            name: name.into(),
            sprite,
            movement_cost: 0,
            fertility: 0.0,
            elevation: 0,
            rules: TileRuleResolver::new(),
        }
    }

    /// Set the movement cost, clamped to the supported range
    #[must_use]
    pub fn with_movement_cost(mut self, cost: u32) -> Self {
        self.movement_cost = clamp_movement_cost(cost);
        self
    }

    /// Set the fertility, clamped to `0.0..=10.0`
    #[must_use]
    pub fn with_fertility(mut self, fertility: f32) -> Self {
        self.fertility = fertility.clamp(0.0, 10.0);
        self
    }

    /// Set the elevation
    #[must_use]
    pub const fn with_elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    /// Append an autotile rule selecting `uv_rect`
    #[must_use]
    pub fn with_rule(mut self, mask: NeighborMask, uv_rect: Rect2D) -> Self {
        self.rules.add_rule(mask, uv_rect);
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// UV rect painted before any rule is applied
    pub const fn sprite(&self) -> &Rect2D {
        &self.sprite
    }

    /// Cost of entering a tile of this terrain
    pub const fn movement_cost(&self) -> u32 {
        self.movement_cost
    }

    /// Fertility in `0.0..=10.0`
    pub const fn fertility(&self) -> f32 {
        self.fertility
    }

    /// Elevation level
    pub const fn elevation(&self) -> i32 {
        self.elevation
    }

    /// Autotile rules of this terrain
    pub const fn rules(&self) -> &TileRuleResolver<Rect2D> {
        &self.rules
    }
}

/// Tile payload holding an optional shared terrain
#[derive(Debug, Clone, Default)]
pub struct TerrainTile {
    terrain: Option<Arc<Terrain>>,
}

impl TerrainTile {
    /// Create a payload painted with `terrain`
    pub const fn new(terrain: Option<Arc<Terrain>>) -> Self {
        Self { terrain }
    }

    /// Current terrain, if painted
    pub const fn terrain(&self) -> Option<&Arc<Terrain>> {
        self.terrain.as_ref()
    }

    /// Replace the terrain without touching render buffers
    pub fn set_terrain(&mut self, terrain: Option<Arc<Terrain>>) {
        self.terrain = terrain;
    }
}

impl TileCategory for TerrainTile {
    fn same_tile_category(&self, other: &Self) -> bool {
        match (&self.terrain, &other.terrain) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl MovementCost for TerrainTile {
    fn movement_cost(&self) -> u32 {
        self.terrain
            .as_ref()
            .map_or(MAX_MOVEMENT_COST, |terrain| terrain.movement_cost())
    }
}

/// Set a tile's terrain and paint its base sprite
///
/// Painting `None` clears the terrain and zeroes the tile's UVs. Returns
/// false if the coordinate is outside the grid.
pub fn paint(
    grid: &mut Grid<TerrainTile>,
    coordinate: Coordinate,
    terrain: Option<Arc<Terrain>>,
) -> bool {
    let uv_rect = terrain
        .as_ref()
        .map_or(Rect2D::ZERO, |terrain| *terrain.sprite());

    let Some(tile) = grid.tile_at_mut(coordinate) else {
        return false;
    };
    tile.payload_mut().set_terrain(terrain);
    grid.set_tile_uvs(coordinate, &uv_rect)
}

/// Re-resolve a tile's autotile variant from its current neighbors
///
/// Returns true if a rule matched and the tile's UVs were replaced; an
/// unpainted tile or an unmatched mask leaves the visual unchanged.
pub fn apply_rule(grid: &mut Grid<TerrainTile>, coordinate: Coordinate) -> bool {
    let Some(terrain) = grid
        .tile_at(coordinate)
        .and_then(|tile| tile.payload().terrain().cloned())
    else {
        return false;
    };

    let Some(uv_rect) = terrain.rules().output(grid, coordinate).copied() else {
        trace!(%coordinate, terrain = terrain.name(), "no autotile rule matched");
        return false;
    };
    grid.set_tile_uvs(coordinate, &uv_rect)
}

/// Paint a tile, then re-resolve it and its 8 neighbors
///
/// Returns false if the coordinate is outside the grid.
pub fn paint_and_resolve(
    grid: &mut Grid<TerrainTile>,
    coordinate: Coordinate,
    terrain: Option<Arc<Terrain>>,
) -> bool {
    if !paint(grid, coordinate, terrain) {
        return false;
    }
    apply_rule(grid, coordinate);
    for direction in Direction::ALL {
        apply_rule(grid, coordinate.offset(direction));
    }
    true
}
