//! Tests for terrain definitions, painting, and autotile resolution

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec2;
    use tilegrid::map::terrain::{Terrain, TerrainTile, apply_rule, paint, paint_and_resolve};
    use tilegrid::math::cost::{MAX_MOVEMENT_COST, MovementCost};
    use tilegrid::math::geometry::Coordinate;
    use tilegrid::rules::mask::{NeighborMask, TileCategory};
    use tilegrid::spatial::{Grid, GridConfig, MeshRecorder, Rect2D};

    const BASE: Rect2D = Rect2D::solid(Vec2::new(0.5, 0.5));
    const FILL: Rect2D = Rect2D::solid(Vec2::new(0.1, 0.0));
    const ISLAND: Rect2D = Rect2D::solid(Vec2::new(0.2, 0.0));

    fn grass() -> Arc<Terrain> {
        Arc::new(
            Terrain::new("grass", BASE)
                .with_movement_cost(2)
                .with_rule(NeighborMask::HAS_ALL, FILL)
                .with_rule(NeighborMask::NOT_HAS_NORTH, ISLAND),
        )
    }

    fn empty_grid(size: usize) -> Grid<TerrainTile> {
        let config = GridConfig::new(1, 1, size, size, 1.0);
        Grid::new(config, |_, _| TerrainTile::default()).expect("Failed to create grid")
    }

    // Builder values are clamped into their supported ranges
    // Verified by removing the clamps
    #[test]
    fn test_terrain_builder() {
        let terrain = Terrain::new("rock", BASE)
            .with_movement_cost(50)
            .with_fertility(12.5)
            .with_elevation(-3);
        assert_eq!(terrain.name(), "rock");
        assert_eq!(terrain.sprite(), &BASE);
        assert_eq!(terrain.movement_cost(), MAX_MOVEMENT_COST);
        assert!((terrain.fertility() - 10.0).abs() < f32::EPSILON);
        assert_eq!(terrain.elevation(), -3);
        assert!(terrain.rules().rules().is_empty());
    }

    // Category equality is identity of the shared definition
    // Verified by comparing terrain names instead of pointers
    #[test]
    fn test_category_is_definition_identity() {
        let first = grass();
        let twin = grass();
        let a = TerrainTile::new(Some(Arc::clone(&first)));
        let b = TerrainTile::new(Some(first));
        let c = TerrainTile::new(Some(twin));

        assert!(a.same_tile_category(&b));
        assert!(!a.same_tile_category(&c));
        assert!(!a.same_tile_category(&TerrainTile::default()));
        assert!(TerrainTile::default().same_tile_category(&TerrainTile::default()));
    }

    // Verified by returning zero cost for unpainted tiles
    #[test]
    fn test_terrain_tile_movement_cost() {
        assert_eq!(TerrainTile::default().movement_cost(), MAX_MOVEMENT_COST);
        assert_eq!(TerrainTile::new(Some(grass())).movement_cost(), 2);
    }

    // Painting sets the payload and the base sprite, and queues the chunk
    // Verified by skipping the UV write
    #[test]
    fn test_paint_sets_sprite() {
        let mut grid = empty_grid(3);
        grid.update(&mut MeshRecorder::new());

        let center = Coordinate::new(1, 1);
        assert!(paint(&mut grid, center, Some(grass())));
        assert_eq!(grid.tile_uv_rect(center), Some(BASE));
        assert!(grid.tile_at(center).and_then(|t| t.payload().terrain()).is_some());
        assert_eq!(grid.pending_updates().len(), 1);

        assert!(!paint(&mut grid, Coordinate::new(3, 0), Some(grass())));
    }

    // Painting None clears the terrain and zeroes the UVs
    // Verified by leaving the previous sprite in place
    #[test]
    fn test_paint_none_clears() {
        let mut grid = empty_grid(2);
        let corner = Coordinate::new(0, 0);
        paint(&mut grid, corner, Some(grass()));
        assert!(paint(&mut grid, corner, None));
        assert_eq!(grid.tile_uv_rect(corner), Some(Rect2D::ZERO));
        assert!(grid.tile_at(corner).and_then(|t| t.payload().terrain()).is_none());
    }

    // A lone painted tile resolves to its isolated variant
    // Verified by matching rules in reverse order
    #[test]
    fn test_isolated_tile_resolves() {
        let mut grid = empty_grid(3);
        let center = Coordinate::new(1, 1);
        assert!(paint_and_resolve(&mut grid, center, Some(grass())));
        assert_eq!(grid.tile_uv_rect(center), Some(ISLAND));
        assert_eq!(grid.tile_uv_rect(Coordinate::new(0, 0)), Some(Rect2D::UNIT));
    }

    // Filling a region re-resolves earlier tiles as their neighbors change
    // Verified by resolving only the painted tile
    #[test]
    fn test_filled_region_resolves_to_fill() {
        let terrain = grass();
        let mut grid = empty_grid(3);
        for y in 0..3 {
            for x in 0..3 {
                paint_and_resolve(&mut grid, Coordinate::new(x, y), Some(Arc::clone(&terrain)));
            }
        }
        grid.for_each_coordinate(|coordinate| {
            assert_eq!(grid.tile_uv_rect(coordinate), Some(FILL), "{coordinate}");
        });
    }

    // Unpainted tiles and unmatched masks keep their current UVs
    // Verified by writing the base sprite when nothing matches
    #[test]
    fn test_apply_rule_without_match() {
        let bare = Arc::new(Terrain::new("sand", BASE).with_rule(NeighborMask::HAS_EAST, FILL));
        let mut grid = empty_grid(3);
        paint(&mut grid, Coordinate::new(1, 1), Some(bare));

        assert!(!apply_rule(&mut grid, Coordinate::new(1, 1)));
        assert_eq!(grid.tile_uv_rect(Coordinate::new(1, 1)), Some(BASE));
        assert!(!apply_rule(&mut grid, Coordinate::new(0, 0)));
        assert!(!apply_rule(&mut grid, Coordinate::new(-1, 0)));
        assert!(!paint_and_resolve(&mut grid, Coordinate::new(9, 9), None));
    }
}
