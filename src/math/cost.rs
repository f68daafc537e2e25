//! Movement cost capability shared by pathfinding and gameplay tiles

/// Cheapest possible movement cost
pub const MIN_MOVEMENT_COST: u32 = 0;

/// Movement cost marking a tile as impassable
pub const MAX_MOVEMENT_COST: u32 = 10;

/// Tile payloads that can be traversed by the pathfinder
pub trait MovementCost {
    /// Cost of entering this tile, within `MIN_MOVEMENT_COST..=MAX_MOVEMENT_COST`
    fn movement_cost(&self) -> u32;

    /// Whether the tile can be entered at all
    fn is_walkable(&self) -> bool {
        self.movement_cost() < MAX_MOVEMENT_COST
    }
}

/// Clamp an arbitrary cost into the supported range
pub fn clamp_movement_cost(cost: u32) -> u32 {
    cost.clamp(MIN_MOVEMENT_COST, MAX_MOVEMENT_COST)
}
